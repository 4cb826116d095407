use thiserror::Error;

use crate::core::{
    catalog::Catalog,
    distance::round2,
    filters::{matching_products, within_radius},
    savings::estimate_saving,
};
use crate::models::{CostModel, Farmer, MatchResponse, MatchResult, School};

/// Errors raised by the matching engine
#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("School '{0}' not found")]
    SchoolNotFound(String),
}

/// Farmer within range, before display rounding
#[derive(Debug, Clone)]
pub struct RankedFarmer<'a> {
    pub farmer: &'a Farmer,
    pub distance_km: f64,
    pub estimated_saving: f64,
    pub matching_products: Vec<String>,
}

/// Matches schools with nearby family farmers
///
/// # Pipeline Stages
/// 1. Resolve the school
/// 2. Geodesic radius filter
/// 3. Product relevance and saving estimate
/// 4. Stable sort, nearest first
#[derive(Debug, Clone)]
pub struct Matcher {
    cost_model: CostModel,
}

impl Matcher {
    pub fn new(cost_model: CostModel) -> Self {
        Self { cost_model }
    }

    pub fn with_default_cost_model() -> Self {
        Self {
            cost_model: CostModel::default(),
        }
    }

    /// Rank farmers within `radius_km` of a school, nearest first
    ///
    /// Values are left unrounded. Farmers at equal distance keep their
    /// catalog order.
    pub fn find_matches<'a>(
        &self,
        school: &School,
        farmers: &'a [Farmer],
        radius_km: f64,
    ) -> Vec<RankedFarmer<'a>> {
        let mut ranked: Vec<RankedFarmer<'a>> = farmers
            .iter()
            .filter_map(|farmer| {
                let distance_km = within_radius(&school.coordinates, farmer, radius_km)?;

                Some(RankedFarmer {
                    farmer,
                    distance_km,
                    estimated_saving: estimate_saving(distance_km, &self.cost_model),
                    matching_products: matching_products(&school.current_demand, &farmer.products),
                })
            })
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| {
            a.distance_km
                .partial_cmp(&b.distance_km)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        ranked
    }

    /// Look up a school in the catalog and build the full match response
    ///
    /// Distance and saving are rounded to 2 decimals here and nowhere else.
    pub fn match_school(
        &self,
        catalog: &Catalog,
        school_id: &str,
        radius_km: f64,
    ) -> Result<MatchResponse, MatchError> {
        let school = catalog
            .school(school_id)
            .ok_or_else(|| MatchError::SchoolNotFound(school_id.to_string()))?;

        let matches: Vec<MatchResult> = self
            .find_matches(school, catalog.farmers(), radius_km)
            .into_iter()
            .map(|ranked| MatchResult {
                farmer: ranked.farmer.clone(),
                distance_km: round2(ranked.distance_km),
                estimated_saving: round2(ranked.estimated_saving),
                matching_products: ranked.matching_products,
            })
            .collect();

        tracing::debug!(
            "School {} matched {} farmers within {}km",
            school.id,
            matches.len(),
            radius_km
        );

        Ok(MatchResponse {
            school_id: school.id.clone(),
            school_name: school.name.clone(),
            raio_km: radius_km,
            total_agricultores_encontrados: matches.len(),
            matches,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_cost_model()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn school_at(lat: f64, lon: f64, demand: &str) -> School {
        School {
            id: "school_001".to_string(),
            name: "Escola Estadual".to_string(),
            coordinates: Coordinates { longitude: lon, latitude: lat },
            monthly_budget: 25_000.0,
            students: 450,
            current_demand: demand.to_string(),
        }
    }

    fn farmer_at(id: &str, lat: f64, lon: f64, products: &[&str]) -> Farmer {
        Farmer {
            id: id.to_string(),
            name: format!("Sítio {}", id),
            coordinates: Coordinates { longitude: lon, latitude: lat },
            products: products.iter().map(|p| p.to_string()).collect(),
            has_dap: true,
            delivery_fee: 0.0,
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_cost_model();
        let school = school_at(-22.413, -42.965, "Cenoura");
        let farmers = vec![
            farmer_at("near", -22.410, -42.970, &["Cenoura", "Caqui"]),
            farmer_at("far", -23.500, -43.500, &["Cenoura"]),
        ];

        let result = matcher.find_matches(&school, &farmers, 10.0);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].farmer.id, "near");
        assert_eq!(result[0].matching_products, vec!["Cenoura"]);
    }

    #[test]
    fn test_matches_sorted_by_distance() {
        let matcher = Matcher::with_default_cost_model();
        let school = school_at(-22.413, -42.965, "Couve");
        let farmers = vec![
            farmer_at("3", -22.450, -42.965, &["Couve"]),
            farmer_at("1", -22.415, -42.965, &["Couve"]),
            farmer_at("2", -22.430, -42.965, &["Couve"]),
        ];

        let result = matcher.find_matches(&school, &farmers, 20.0);
        let ids: Vec<&str> = result.iter().map(|r| r.farmer.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = Matcher::with_default_cost_model();
        let school = school_at(-22.413, -42.965, "Couve");
        let farmers = vec![
            farmer_at("b", -22.420, -42.965, &["Couve"]),
            farmer_at("a", -22.420, -42.965, &["Couve"]),
        ];

        let result = matcher.find_matches(&school, &farmers, 5.0);
        assert_eq!(result[0].farmer.id, "b");
        assert_eq!(result[1].farmer.id, "a");
    }

    #[test]
    fn test_zero_radius_returns_nothing() {
        let matcher = Matcher::with_default_cost_model();
        let school = school_at(-22.413, -42.965, "Couve");
        let farmers = vec![farmer_at("1", -22.415, -42.965, &["Couve"])];

        assert!(matcher.find_matches(&school, &farmers, 0.0).is_empty());
        assert!(matcher.find_matches(&school, &farmers, 0.1).is_empty());
    }

    #[test]
    fn test_unknown_school() {
        let matcher = Matcher::default();
        let result = matcher.match_school(&Catalog::empty(), "school_404", 10.0);
        assert_eq!(result.unwrap_err(), MatchError::SchoolNotFound("school_404".to_string()));
    }

    #[test]
    fn test_match_school_rounds_output() {
        let matcher = Matcher::default();
        let school = school_at(-22.413, -42.965, "Cenoura");
        let farmers = vec![farmer_at("farmer_001", -22.410, -42.970, &["Cenoura", "Caqui"])];
        let catalog = Catalog::new(vec![school], farmers, Catalog::empty().enriched().clone());

        let response = matcher.match_school(&catalog, "school_001", 10.0).unwrap();

        assert_eq!(response.total_agricultores_encontrados, 1);
        let m = &response.matches[0];
        assert_eq!(m.distance_km, round2(m.distance_km));
        assert_eq!(m.estimated_saving, 540.0);
    }

    #[test]
    fn test_no_farmers_is_not_an_error() {
        let matcher = Matcher::default();
        let catalog = Catalog::new(
            vec![school_at(-22.413, -42.965, "Cenoura")],
            vec![],
            Catalog::empty().enriched().clone(),
        );

        let response = matcher.match_school(&catalog, "school_001", 50.0).unwrap();
        assert_eq!(response.total_agricultores_encontrados, 0);
        assert!(response.matches.is_empty());
    }
}
