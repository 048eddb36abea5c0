//! JSON API for the dashboard frontend

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::dashboard::{DashboardService, DashboardView};
use crate::models::City;

/// JSON error body for failed API requests.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

pub fn router(service: Arc<DashboardService>) -> Router {
    Router::new()
        .route("/cities", get(list_cities))
        .route("/dashboard/{city}", get(get_dashboard))
        .with_state(service)
}

/// The fixed list of supported city names.
async fn list_cities() -> Json<Vec<&'static str>> {
    Json(City::ALL.iter().map(|city| city.name()).collect())
}

/// One full dashboard refresh for a city.
///
/// The refresh itself never fails; only a city outside the supported list
/// is rejected.
async fn get_dashboard(
    State(service): State<Arc<DashboardService>>,
    Path(city): Path<String>,
) -> Result<Json<DashboardView>, (StatusCode, Json<ApiError>)> {
    let city: City = city.parse().map_err(|e: crate::models::city::UnknownCity| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError {
                error: e.to_string(),
            }),
        )
    })?;

    Ok(Json(service.refresh(city).await))
}
