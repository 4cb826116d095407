use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchQuery {
    #[validate(length(min = 1))]
    pub school_id: String,
    /// Search radius in km; the configured default applies when absent
    #[serde(default)]
    pub raio_km: Option<f64>,
}
