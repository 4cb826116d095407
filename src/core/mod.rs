// Core algorithm exports
pub mod catalog;
pub mod distance;
pub mod enricher;
pub mod filters;
pub mod matcher;
pub mod savings;

pub use catalog::Catalog;
pub use distance::{geodesic_distance_km, round2};
pub use enricher::Enricher;
pub use filters::{matching_products, within_radius};
pub use matcher::{Matcher, MatchError, RankedFarmer};
pub use savings::estimate_saving;
