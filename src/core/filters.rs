use crate::models::{Coordinates, Farmer};
use crate::core::distance::geodesic_distance_km;

/// Return the distance to a farmer when it lies within the radius
///
/// The boundary is inclusive. A NaN radius keeps nothing.
#[inline]
pub fn within_radius(origin: &Coordinates, farmer: &Farmer, radius_km: f64) -> Option<f64> {
    let distance_km = geodesic_distance_km(origin, &farmer.coordinates);

    if distance_km <= radius_km {
        Some(distance_km)
    } else {
        None
    }
}

/// Products from the farmer that serve the school's demand
///
/// A product is relevant when it contains, or is contained by, the demand
/// (case-insensitive). When nothing matches, every product is returned so
/// that nearby registered farmers are still surfaced.
pub fn matching_products(demand: &str, products: &[String]) -> Vec<String> {
    let demand = demand.to_lowercase();

    let matched: Vec<String> = products
        .iter()
        .filter(|product| {
            let product = product.to_lowercase();
            product.contains(&demand) || demand.contains(&product)
        })
        .cloned()
        .collect();

    if matched.is_empty() {
        products.to_vec()
    } else {
        matched
    }
}
