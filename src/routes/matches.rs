use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::MatchQuery;
use crate::routes::AppState;

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/match/calculate", web::get().to(calculate_matches));
}

/// Calculate matches endpoint
///
/// GET /match/calculate?school_id=school_001&raio_km=10
///
/// `raio_km` is optional and must lie within the configured bounds
/// (1-100 km by default).
async fn calculate_matches(
    state: web::Data<AppState>,
    query: web::Query<MatchQuery>,
) -> Result<HttpResponse, ApiError> {
    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for match query: {:?}", errors);
        return Err(ApiError::BadRequest(format!("Validation failed: {}", errors)));
    }

    let bounds = &state.matching;
    let radius_km = query.raio_km.unwrap_or(bounds.default_radius_km);

    if !radius_km.is_finite() || radius_km < bounds.min_radius_km || radius_km > bounds.max_radius_km {
        return Err(ApiError::BadRequest(format!(
            "raio_km must be between {} and {}",
            bounds.min_radius_km, bounds.max_radius_km
        )));
    }

    tracing::info!("Calculating matches for school: {}, radius: {}km", query.school_id, radius_km);

    let response = state
        .matcher
        .match_school(&state.catalog, &query.school_id, radius_km)?;

    tracing::info!(
        "Returning {} matches for school {}",
        response.total_agricultores_encontrados,
        response.school_id
    );

    Ok(HttpResponse::Ok().json(response))
}
