// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Coordinates, School, Farmer, FeatureKind, MatchResult, CostModel, EnrichmentProfile};
pub use requests::MatchQuery;
pub use responses::{MatchResponse, HealthResponse, ServiceInfo, ServiceEndpoints, ErrorResponse};
