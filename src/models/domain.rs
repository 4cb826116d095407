use serde::{Deserialize, Serialize};

/// Geographic position in degrees, GeoJSON axis order (longitude, latitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinates {
    /// Build a coordinate pair, rejecting non-finite or out-of-range values
    pub fn new(longitude: f64, latitude: f64) -> Option<Self> {
        if !longitude.is_finite() || !latitude.is_finite() {
            return None;
        }
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return None;
        }
        Some(Self { longitude, latitude })
    }
}

/// Public school enriched with program data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    /// Monthly meal budget in BRL
    #[serde(rename = "orcamento_mensal")]
    pub monthly_budget: f64,
    #[serde(rename = "alunos")]
    pub students: u32,
    #[serde(rename = "demanda_atual")]
    pub current_demand: String,
}

/// Family farmer enriched with program data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(rename = "produtos_disponiveis")]
    pub products: Vec<String>,
    /// Holds a DAP (family farm registration)
    #[serde(rename = "tem_dap", default = "default_true")]
    pub has_dap: bool,
    #[serde(rename = "preco_frete", default)]
    pub delivery_fee: f64,
}

fn default_true() -> bool { true }

/// Kind of a classified feature, written into enriched properties as `tipo`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureKind {
    School,
    Farmer,
}

impl FeatureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::School => "school",
            FeatureKind::Farmer => "farmer",
        }
    }
}

/// A farmer within the search radius of a school
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub farmer: Farmer,
    #[serde(rename = "distancia_km")]
    pub distance_km: f64,
    #[serde(rename = "economia_estimada")]
    pub estimated_saving: f64,
    #[serde(rename = "produtos_em_comum")]
    pub matching_products: Vec<String>,
}

/// Cost model used to estimate monthly savings against a wholesaler
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    pub wholesale_price_per_kg: f64,
    pub local_price_per_kg: f64,
    pub wholesale_freight_per_km: f64,
    pub local_freight_per_km: f64,
    /// Flat distance assumed for the wholesale leg
    pub wholesale_reference_km: f64,
    pub monthly_volume_kg: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            wholesale_price_per_kg: 3.50,
            local_price_per_kg: 2.50,
            wholesale_freight_per_km: 0.80,
            local_freight_per_km: 0.0,
            wholesale_reference_km: 50.0,
            monthly_volume_kg: 500.0,
        }
    }
}

/// Rules for classifying features and synthesizing their business fields
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentProfile {
    /// Lowercase `landuse` values that mark a farmer
    pub farmer_landuse: Vec<String>,
    pub school_products: Vec<String>,
    pub farmer_products: Vec<String>,
    pub budget_min: f64,
    pub budget_max: f64,
    pub students_min: u32,
    pub students_max: u32,
    pub products_min: usize,
    pub products_max: usize,
    pub dap_probability: f64,
}

impl Default for EnrichmentProfile {
    fn default() -> Self {
        let school_products: Vec<String> = [
            "Cenoura", "Beterraba", "Caqui", "Inhame", "Brócolis", "Couve", "Alface",
        ]
        .iter()
        .map(|p| p.to_string())
        .collect();

        let mut farmer_products = school_products.clone();
        farmer_products.push("Tomate".to_string());

        Self {
            farmer_landuse: vec!["farmland".to_string(), "farmyard".to_string()],
            school_products,
            farmer_products,
            budget_min: 15_000.0,
            budget_max: 50_000.0,
            students_min: 200,
            students_max: 800,
            products_min: 2,
            products_max: 5,
            dap_probability: 0.9,
        }
    }
}
