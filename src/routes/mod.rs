// Route exports
pub mod catalog;
pub mod info;
pub mod matches;

use std::sync::Arc;

use actix_web::web;

use crate::config::MatchingSettings;
use crate::core::{Catalog, Matcher};
use crate::error::handle_query_payload_error;

/// Application state shared across all handlers
///
/// The catalog is fully built before the server starts and never mutated.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

impl AppState {
    pub fn new(catalog: Catalog, matcher: Matcher, matching: MatchingSettings) -> Self {
        Self {
            catalog: Arc::new(catalog),
            matcher,
            matching,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(handle_query_payload_error))
        .configure(info::configure)
        .configure(catalog::configure)
        .configure(matches::configure);
}
