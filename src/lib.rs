//! Merenda Match - connects public schools to local family farmers
//!
//! Loads an OpenStreetMap GeoJSON export once, enriches schools and farmers
//! with program data, and ranks farmers near a school by geodesic distance
//! and estimated monthly saving.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Catalog, Enricher, Matcher, MatchError, distance::geodesic_distance_km};
pub use error::ApiError;
pub use models::{Coordinates, School, Farmer, MatchResult, MatchResponse, CostModel, EnrichmentProfile};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let a = Coordinates { longitude: -42.965, latitude: -22.413 };
        let b = Coordinates { longitude: -42.970, latitude: -22.410 };
        assert!(geodesic_distance_km(&a, &b) > 0.0);
        assert!(Catalog::empty().is_empty());
    }
}
