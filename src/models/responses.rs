use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub school_id: String,
    pub school_name: String,
    pub raio_km: f64,
    pub total_agricultores_encontrados: usize,
    pub matches: Vec<MatchResult>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub schools_loaded: usize,
    pub farmers_loaded: usize,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Service metadata returned at the root path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub endpoints: ServiceEndpoints,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
    pub geojson_enriquecido: String,
    pub lista_escolas: String,
    pub lista_agricultores: String,
    pub calcular_matches: String,
    pub health: String,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
