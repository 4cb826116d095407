use std::collections::HashMap;

use geojson::FeatureCollection;

use crate::models::{Farmer, School};

/// Immutable snapshot of the enriched dataset
///
/// Built once at startup and shared read-only across workers.
#[derive(Debug, Clone)]
pub struct Catalog {
    schools: Vec<School>,
    farmers: Vec<Farmer>,
    enriched: FeatureCollection,
    school_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(schools: Vec<School>, farmers: Vec<Farmer>, enriched: FeatureCollection) -> Self {
        let school_index = schools
            .iter()
            .enumerate()
            .map(|(i, school)| (school.id.clone(), i))
            .collect();

        Self {
            schools,
            farmers,
            enriched,
            school_index,
        }
    }

    /// Catalog used when no dataset could be loaded
    pub fn empty() -> Self {
        Self::new(
            Vec::new(),
            Vec::new(),
            FeatureCollection {
                bbox: None,
                features: Vec::new(),
                foreign_members: None,
            },
        )
    }

    pub fn schools(&self) -> &[School] {
        &self.schools
    }

    pub fn farmers(&self) -> &[Farmer] {
        &self.farmers
    }

    pub fn enriched(&self) -> &FeatureCollection {
        &self.enriched
    }

    pub fn school(&self, id: &str) -> Option<&School> {
        self.school_index.get(id).map(|&i| &self.schools[i])
    }

    pub fn is_empty(&self) -> bool {
        self.schools.is_empty() && self.farmers.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::empty()
    }
}
