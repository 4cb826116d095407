use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/schools", web::get().to(list_schools))
        .route("/schools/{school_id}", web::get().to(get_school))
        .route("/farmers", web::get().to(list_farmers))
        .route("/geojson/enriched", web::get().to(enriched_geojson));
}

/// GET /schools
async fn list_schools(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let schools = state.catalog.schools();

    if schools.is_empty() {
        return Err(ApiError::NotFound(
            "Nenhuma escola encontrada. Verifique o arquivo GeoJSON.".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(schools))
}

/// GET /schools/{school_id}
async fn get_school(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let school_id = path.into_inner();

    match state.catalog.school(&school_id) {
        Some(school) => Ok(HttpResponse::Ok().json(school)),
        None => Err(ApiError::NotFound(format!("Escola '{}' não encontrada.", school_id))),
    }
}

/// GET /farmers
async fn list_farmers(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let farmers = state.catalog.farmers();

    if farmers.is_empty() {
        return Err(ApiError::NotFound(
            "Nenhum agricultor encontrado. Verifique o arquivo GeoJSON.".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(farmers))
}

/// GET /geojson/enriched
///
/// Full annotated collection for map rendering.
async fn enriched_geojson(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let enriched = state.catalog.enriched();

    if enriched.features.is_empty() {
        return Err(ApiError::ServiceUnavailable(
            "GeoJSON não carregado. Verifique se o arquivo de dados existe.".to_string(),
        ));
    }

    Ok(HttpResponse::Ok().json(enriched))
}
