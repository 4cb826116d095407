use std::collections::HashSet;

use geojson::{Feature, FeatureCollection, JsonObject, JsonValue, Value as GeometryValue};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::core::catalog::Catalog;
use crate::models::{Coordinates, EnrichmentProfile, Farmer, FeatureKind, School};

/// Business fields synthesized for a school
#[derive(Debug, Clone, PartialEq)]
struct SchoolFields {
    monthly_budget: f64,
    students: u32,
    current_demand: String,
}

/// Business fields synthesized for a farmer
#[derive(Debug, Clone, PartialEq)]
struct FarmerFields {
    products: Vec<String>,
    has_dap: bool,
    delivery_fee: f64,
}

/// Turns raw OpenStreetMap point features into typed schools and farmers
///
/// # Pipeline
/// 1. Skip anything that is not a valid `Point`
/// 2. Classify by OSM tags (`amenity`, `landuse`, `place`)
/// 3. Assign ids and names from a per-type counter
/// 4. Synthesize budget, demand, products and DAP status
/// 5. Annotate a copy of the feature with the same fields
#[derive(Debug, Clone)]
pub struct Enricher {
    profile: EnrichmentProfile,
}

impl Enricher {
    pub fn new(profile: EnrichmentProfile) -> Self {
        Self { profile: sanitize(profile) }
    }

    pub fn with_default_profile() -> Self {
        Self::new(EnrichmentProfile::default())
    }

    pub fn profile(&self) -> &EnrichmentProfile {
        &self.profile
    }

    /// Decide whether a property bag describes a school, a farmer or neither
    ///
    /// `amenity=school` wins over farm tags when both are present.
    pub fn classify(&self, properties: &JsonObject) -> Option<FeatureKind> {
        if tag(properties, "amenity") == Some("school") {
            return Some(FeatureKind::School);
        }

        let landuse = tag(properties, "landuse").map(str::to_lowercase);
        if let Some(landuse) = landuse {
            if self.profile.farmer_landuse.iter().any(|l| *l == landuse) {
                return Some(FeatureKind::Farmer);
            }
        }

        if tag(properties, "place").map(str::to_lowercase).as_deref() == Some("farm") {
            return Some(FeatureKind::Farmer);
        }

        None
    }

    /// Enrich with a fixed seed; identical input and seed give identical output
    pub fn enrich_seeded(&self, collection: &FeatureCollection, seed: u64) -> Catalog {
        let mut rng = StdRng::seed_from_u64(seed);
        self.enrich(collection, &mut rng)
    }

    /// Run the single enrichment pass over a feature collection
    pub fn enrich<R: Rng + ?Sized>(&self, collection: &FeatureCollection, rng: &mut R) -> Catalog {
        let mut schools: Vec<School> = Vec::new();
        let mut farmers: Vec<Farmer> = Vec::new();
        let mut school_ids = HashSet::new();
        let mut farmer_ids = HashSet::new();
        let mut features = Vec::with_capacity(collection.features.len());

        for feature in &collection.features {
            let coordinates = match point_coordinates(feature) {
                PointLookup::Point(c) => c,
                PointLookup::NotAPoint => continue,
                PointLookup::Invalid => {
                    tracing::warn!("Skipping point feature with invalid coordinates: {:?}", feature.id);
                    continue;
                }
            };

            let empty = JsonObject::new();
            let properties = feature.properties.as_ref().unwrap_or(&empty);
            let mut enriched = feature.clone();

            match self.classify(properties) {
                Some(FeatureKind::School) => {
                    let n = schools.len() + 1;
                    let id = assign_id(properties, "school", n, &mut school_ids);
                    let name = feature_name(properties).unwrap_or_else(|| format!("Escola {}", n));
                    let fields = self.synthesize_school(rng);

                    let props = enriched.properties.get_or_insert_with(JsonObject::new);
                    props.insert("id".to_string(), JsonValue::from(id.clone()));
                    props.insert("tipo".to_string(), JsonValue::from(FeatureKind::School.as_str()));
                    props.insert("orcamento_mensal".to_string(), JsonValue::from(fields.monthly_budget));
                    props.insert("alunos".to_string(), JsonValue::from(fields.students));
                    props.insert("demanda_atual".to_string(), JsonValue::from(fields.current_demand.clone()));

                    schools.push(School {
                        id,
                        name,
                        coordinates,
                        monthly_budget: fields.monthly_budget,
                        students: fields.students,
                        current_demand: fields.current_demand,
                    });
                }
                Some(FeatureKind::Farmer) => {
                    let n = farmers.len() + 1;
                    let id = assign_id(properties, "farmer", n, &mut farmer_ids);
                    let name = feature_name(properties).unwrap_or_else(|| format!("Produtor {}", n));
                    let fields = self.synthesize_farmer(rng);

                    let props = enriched.properties.get_or_insert_with(JsonObject::new);
                    props.insert("id".to_string(), JsonValue::from(id.clone()));
                    props.insert("tipo".to_string(), JsonValue::from(FeatureKind::Farmer.as_str()));
                    props.insert("produtos_disponiveis".to_string(), JsonValue::from(fields.products.clone()));
                    props.insert("tem_dap".to_string(), JsonValue::from(fields.has_dap));
                    props.insert("preco_frete".to_string(), JsonValue::from(fields.delivery_fee));

                    farmers.push(Farmer {
                        id,
                        name,
                        coordinates,
                        products: fields.products,
                        has_dap: fields.has_dap,
                        delivery_fee: fields.delivery_fee,
                    });
                }
                None => {
                    tracing::trace!("Unclassified point feature passed through: {:?}", feature.id);
                }
            }

            features.push(enriched);
        }

        tracing::info!(
            "Enrichment complete: {} schools, {} farmers, {} point features",
            schools.len(),
            farmers.len(),
            features.len()
        );

        let enriched = FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        };

        Catalog::new(schools, farmers, enriched)
    }

    fn synthesize_school<R: Rng + ?Sized>(&self, rng: &mut R) -> SchoolFields {
        let p = &self.profile;

        let budget = rng.gen_range(p.budget_min..=p.budget_max);
        let students = rng.gen_range(p.students_min..=p.students_max);
        let current_demand = p
            .school_products
            .choose(rng)
            .cloned()
            .unwrap_or_else(|| "Cenoura".to_string());

        SchoolFields {
            monthly_budget: (budget * 100.0).round() / 100.0,
            students,
            current_demand,
        }
    }

    fn synthesize_farmer<R: Rng + ?Sized>(&self, rng: &mut R) -> FarmerFields {
        let p = &self.profile;

        let count = rng.gen_range(p.products_min..=p.products_max);
        let products: Vec<String> = p.farmer_products.choose_multiple(rng, count).cloned().collect();
        let has_dap = rng.gen_bool(p.dap_probability);

        FarmerFields {
            products,
            has_dap,
            // No freight for local family farmers
            delivery_fee: 0.0,
        }
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::with_default_profile()
    }
}

enum PointLookup {
    Point(Coordinates),
    NotAPoint,
    Invalid,
}

fn point_coordinates(feature: &Feature) -> PointLookup {
    match feature.geometry.as_ref().map(|g| &g.value) {
        Some(GeometryValue::Point(position)) => {
            if position.len() < 2 {
                return PointLookup::Invalid;
            }
            match Coordinates::new(position[0], position[1]) {
                Some(c) => PointLookup::Point(c),
                None => PointLookup::Invalid,
            }
        }
        _ => PointLookup::NotAPoint,
    }
}

#[inline]
fn tag<'a>(properties: &'a JsonObject, key: &str) -> Option<&'a str> {
    properties.get(key).and_then(JsonValue::as_str)
}

fn feature_name(properties: &JsonObject) -> Option<String> {
    tag(properties, "name")
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
}

/// Explicit `id` property from the source, as a string
fn explicit_id(properties: &JsonObject) -> Option<String> {
    match properties.get("id")? {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Pick a unique id: the explicit one if free, else `{prefix}_{n:03}`
fn assign_id(properties: &JsonObject, prefix: &str, n: usize, taken: &mut HashSet<String>) -> String {
    let generated = format!("{}_{:03}", prefix, n);

    let mut id = match explicit_id(properties) {
        Some(explicit) if !taken.contains(&explicit) => explicit,
        Some(explicit) => {
            tracing::warn!("Duplicate {} id '{}', using generated id", prefix, explicit);
            generated.clone()
        }
        None => generated.clone(),
    };

    let mut suffix = 1;
    while taken.contains(&id) {
        suffix += 1;
        id = format!("{}-{}", generated, suffix);
    }

    taken.insert(id.clone());
    id
}

/// Fix up ranges so synthesis can never panic on a bad configuration
fn sanitize(mut profile: EnrichmentProfile) -> EnrichmentProfile {
    let defaults = EnrichmentProfile::default();

    profile.farmer_landuse = profile.farmer_landuse.iter().map(|l| l.to_lowercase()).collect();

    if profile.school_products.is_empty() {
        profile.school_products = defaults.school_products;
    }
    if profile.farmer_products.is_empty() {
        profile.farmer_products = defaults.farmer_products;
    }
    dedup_in_order(&mut profile.farmer_products);

    if !(profile.budget_min.is_finite() && profile.budget_max.is_finite()) || profile.budget_min < 0.0 {
        profile.budget_min = defaults.budget_min;
        profile.budget_max = defaults.budget_max;
    }
    if profile.budget_min > profile.budget_max {
        std::mem::swap(&mut profile.budget_min, &mut profile.budget_max);
    }
    if profile.students_min > profile.students_max {
        std::mem::swap(&mut profile.students_min, &mut profile.students_max);
    }

    let available = profile.farmer_products.len();
    let products_max = profile.products_max.clamp(1, available);
    if products_max != profile.products_max {
        tracing::warn!(
            "products_max {} adjusted to {} ({} farmer products available)",
            profile.products_max,
            products_max,
            available
        );
        profile.products_max = products_max;
    }
    let products_min = profile.products_min.clamp(1, profile.products_max);
    if products_min != profile.products_min {
        tracing::warn!(
            "products_min {} adjusted to {} (range 1..={})",
            profile.products_min,
            products_min,
            profile.products_max
        );
        profile.products_min = products_min;
    }

    if !(0.0..=1.0).contains(&profile.dap_probability) {
        profile.dap_probability = defaults.dap_probability;
    }

    profile
}

fn dedup_in_order(items: &mut Vec<String>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.clone()));
}
