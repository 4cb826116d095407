use std::path::{Path, PathBuf};

use geojson::{FeatureCollection, GeoJson};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::core::{Catalog, Enricher};

/// Errors that can occur while loading the source dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    #[error("Dataset is a bare geometry, expected a FeatureCollection")]
    NotACollection,
}

/// Reads the OpenStreetMap GeoJSON export from disk
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file into a feature collection
    ///
    /// A single top-level Feature is accepted as a one-element collection.
    pub async fn load(&self) -> Result<FeatureCollection, DatasetError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DatasetError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(e.into()),
        };

        parse_collection(&contents)
    }
}

/// Parse GeoJSON text into a feature collection
pub fn parse_collection(contents: &str) -> Result<FeatureCollection, DatasetError> {
    match contents.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        GeoJson::Feature(feature) => Ok(FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        }),
        GeoJson::Geometry(_) => Err(DatasetError::NotACollection),
    }
}

/// Load the dataset and run enrichment once
///
/// With a seed the synthesized fields are reproducible; without one the
/// generator is seeded from OS entropy.
pub async fn load_catalog(
    loader: &DatasetLoader,
    enricher: &Enricher,
    seed: Option<u64>,
) -> Result<Catalog, DatasetError> {
    let collection = loader.load().await?;

    tracing::info!(
        "Loaded {} features from {}",
        collection.features.len(),
        loader.path().display()
    );

    let catalog = match seed {
        Some(seed) => enricher.enrich_seeded(&collection, seed),
        None => enricher.enrich(&collection, &mut StdRng::from_entropy()),
    };

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_feature_collection() {
        let text = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-42.965, -22.413]},
                 "properties": {"amenity": "school"}}
            ]
        }"#;

        let collection = parse_collection(text).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_parse_single_feature() {
        let text = r#"{"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]}, "properties": {}}"#;
        let collection = parse_collection(text).unwrap();
        assert_eq!(collection.features.len(), 1);
    }

    #[test]
    fn test_parse_rejects_geometry_and_garbage() {
        let geometry = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(matches!(parse_collection(geometry), Err(DatasetError::NotACollection)));
        assert!(matches!(parse_collection("not json"), Err(DatasetError::Parse(_))));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let loader = DatasetLoader::new("does/not/exist.geojson");
        let result = load_catalog(&loader, &Enricher::default(), Some(1)).await;
        assert!(matches!(result, Err(DatasetError::NotFound(_))));
    }
}
