use actix_web::{web, HttpResponse, Responder};

use crate::models::{HealthResponse, ServiceEndpoints, ServiceInfo};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health_check));
}

/// Service metadata
async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceInfo {
        message: "EcoMerenda API - Sistema B2G para PNAE".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        endpoints: ServiceEndpoints {
            geojson_enriquecido: "/geojson/enriched".to_string(),
            lista_escolas: "/schools".to_string(),
            lista_agricultores: "/farmers".to_string(),
            calcular_matches: "/match/calculate".to_string(),
            health: "/health".to_string(),
        },
    })
}

/// Health check endpoint
///
/// Always healthy once serving, even with an empty dataset.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        schools_loaded: state.catalog.schools().len(),
        farmers_loaded: state.catalog.farmers().len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}
