// Service exports
pub mod dataset;

pub use dataset::{DatasetLoader, DatasetError, load_catalog, parse_collection};
