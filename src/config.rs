use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::models::{CostModel, EnrichmentProfile};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub enrichment: EnrichmentSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub savings: SavingsSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 8000 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatasetSettings {
    #[serde(default = "default_dataset_path")]
    pub path: String,
    /// Fixed seed for reproducible enrichment
    pub seed: Option<u64>,
}

impl Default for DatasetSettings {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
            seed: None,
        }
    }
}

fn default_dataset_path() -> String { "data/TeresopolisEscolasELocaisDeProducao.geojson".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentSettings {
    #[serde(default = "default_farmer_landuse")]
    pub farmer_landuse: Vec<String>,
    #[serde(default = "default_school_products")]
    pub school_products: Vec<String>,
    #[serde(default = "default_farmer_products")]
    pub farmer_products: Vec<String>,
    #[serde(default = "default_budget_min")]
    pub budget_min: f64,
    #[serde(default = "default_budget_max")]
    pub budget_max: f64,
    #[serde(default = "default_students_min")]
    pub students_min: u32,
    #[serde(default = "default_students_max")]
    pub students_max: u32,
    #[serde(default = "default_products_min")]
    pub products_min: usize,
    #[serde(default = "default_products_max")]
    pub products_max: usize,
    #[serde(default = "default_dap_probability")]
    pub dap_probability: f64,
}

impl Default for EnrichmentSettings {
    fn default() -> Self {
        Self {
            farmer_landuse: default_farmer_landuse(),
            school_products: default_school_products(),
            farmer_products: default_farmer_products(),
            budget_min: default_budget_min(),
            budget_max: default_budget_max(),
            students_min: default_students_min(),
            students_max: default_students_max(),
            products_min: default_products_min(),
            products_max: default_products_max(),
            dap_probability: default_dap_probability(),
        }
    }
}

impl From<EnrichmentSettings> for EnrichmentProfile {
    fn from(s: EnrichmentSettings) -> Self {
        Self {
            farmer_landuse: s.farmer_landuse,
            school_products: s.school_products,
            farmer_products: s.farmer_products,
            budget_min: s.budget_min,
            budget_max: s.budget_max,
            students_min: s.students_min,
            students_max: s.students_max,
            products_min: s.products_min,
            products_max: s.products_max,
            dap_probability: s.dap_probability,
        }
    }
}

fn default_farmer_landuse() -> Vec<String> { EnrichmentProfile::default().farmer_landuse }
fn default_school_products() -> Vec<String> { EnrichmentProfile::default().school_products }
fn default_farmer_products() -> Vec<String> { EnrichmentProfile::default().farmer_products }
fn default_budget_min() -> f64 { 15_000.0 }
fn default_budget_max() -> f64 { 50_000.0 }
fn default_students_min() -> u32 { 200 }
fn default_students_max() -> u32 { 800 }
fn default_products_min() -> usize { 2 }
fn default_products_max() -> usize { 5 }
fn default_dap_probability() -> f64 { 0.9 }

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_radius_km")]
    pub default_radius_km: f64,
    #[serde(default = "default_min_radius_km")]
    pub min_radius_km: f64,
    #[serde(default = "default_max_radius_km")]
    pub max_radius_km: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_radius_km: default_radius_km(),
            min_radius_km: default_min_radius_km(),
            max_radius_km: default_max_radius_km(),
        }
    }
}

fn default_radius_km() -> f64 { 10.0 }
fn default_min_radius_km() -> f64 { 1.0 }
fn default_max_radius_km() -> f64 { 100.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct SavingsSettings {
    #[serde(default = "default_wholesale_price")]
    pub wholesale_price_per_kg: f64,
    #[serde(default = "default_local_price")]
    pub local_price_per_kg: f64,
    #[serde(default = "default_wholesale_freight")]
    pub wholesale_freight_per_km: f64,
    #[serde(default)]
    pub local_freight_per_km: f64,
    #[serde(default = "default_wholesale_reference_km")]
    pub wholesale_reference_km: f64,
    #[serde(default = "default_monthly_volume")]
    pub monthly_volume_kg: f64,
}

impl Default for SavingsSettings {
    fn default() -> Self {
        Self {
            wholesale_price_per_kg: default_wholesale_price(),
            local_price_per_kg: default_local_price(),
            wholesale_freight_per_km: default_wholesale_freight(),
            local_freight_per_km: 0.0,
            wholesale_reference_km: default_wholesale_reference_km(),
            monthly_volume_kg: default_monthly_volume(),
        }
    }
}

impl From<SavingsSettings> for CostModel {
    fn from(s: SavingsSettings) -> Self {
        Self {
            wholesale_price_per_kg: s.wholesale_price_per_kg,
            local_price_per_kg: s.local_price_per_kg,
            wholesale_freight_per_km: s.wholesale_freight_per_km,
            local_freight_per_km: s.local_freight_per_km,
            wholesale_reference_km: s.wholesale_reference_km,
            monthly_volume_kg: s.monthly_volume_kg,
        }
    }
}

fn default_wholesale_price() -> f64 { 3.50 }
fn default_local_price() -> f64 { 2.50 }
fn default_wholesale_freight() -> f64 { 0.80 }
fn default_wholesale_reference_km() -> f64 { 50.0 }
fn default_monthly_volume() -> f64 { 500.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MERENDA__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MERENDA__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MERENDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load from `CONFIG_PATH` when set, otherwise from the default layers
    pub fn load_from_env() -> Result<Self, ConfigError> {
        match std::env::var("CONFIG_PATH") {
            Ok(path) if !path.trim().is_empty() => Self::load_from(path.trim()),
            _ => Self::load(),
        }
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MERENDA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Radius bounds are usable only when `0 < min <= default <= max`
    pub fn validate(&self) -> Result<(), ConfigError> {
        let m = &self.matching;
        let ordered = m.min_radius_km > 0.0
            && m.min_radius_km <= m.default_radius_km
            && m.default_radius_km <= m.max_radius_km;

        if !ordered {
            return Err(ConfigError::Message(format!(
                "matching radius must satisfy 0 < min ({}) <= default ({}) <= max ({})",
                m.min_radius_km, m.default_radius_km, m.max_radius_km
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_savings_match_cost_model() {
        let model: CostModel = SavingsSettings::default().into();
        assert_eq!(model, CostModel::default());
    }

    #[test]
    fn test_default_enrichment_matches_profile() {
        let profile: EnrichmentProfile = EnrichmentSettings::default().into();
        assert_eq!(profile, EnrichmentProfile::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_shipped_config_file_parses() {
        let settings: Settings = toml::from_str(include_str!("../config/default.toml")).unwrap();
        assert_eq!(settings.server.port, 8000);
        assert_eq!(settings.matching.default_radius_km, 10.0);
        assert_eq!(settings.enrichment.farmer_landuse, vec!["farmland", "farmyard"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        assert_eq!(settings.dataset.seed, None);
        assert_eq!(settings.matching.max_radius_km, 100.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_custom_path() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[server]\nport = 9100\n\n[matching]\ndefault_radius_km = 20.0\n\n[dataset]\nseed = 7").unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.matching.default_radius_km, 20.0);
        assert_eq!(settings.matching.max_radius_km, 100.0);
        assert_eq!(settings.dataset.seed, Some(7));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_invalid_radius_bounds() {
        let mut settings: Settings = toml::from_str("").unwrap();
        settings.matching.default_radius_km = 200.0;
        assert!(settings.validate().is_err());
    }
}
