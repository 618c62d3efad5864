use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::error::Error;
use crate::models::*;
use crate::service::CarService;

// ============================================================
// Error Handling
// ============================================================

/// Map a service error to a response.
///
/// Not-found errors become a 404 carrying a short message. Configuration
/// errors are logged server-side and the client only sees a generic 500.
fn api_error(e: Error) -> (StatusCode, String) {
    match e {
        Error::CarNotFound { id } => {
            tracing::warn!(id, "car not found");
            (StatusCode::NOT_FOUND, "Car not found".to_string())
        }
        Error::ColorNotFound { color } => {
            tracing::warn!(%color, "no cars with color");
            (
                StatusCode::NOT_FOUND,
                format!("No cars found with color: {}", color),
            )
        }
        Error::Config { message } => {
            tracing::error!("Internal error: {}", message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Cars
// ============================================================

pub async fn list_cars(State(service): State<CarService>) -> Json<Vec<Car>> {
    Json(service.list_all())
}

pub async fn list_cars_by_color(
    State(service): State<CarService>,
    Path(color): Path<String>,
) -> Result<Json<Vec<Car>>, (StatusCode, String)> {
    service.list_by_color(&color).map(Json).map_err(api_error)
}

pub async fn get_car(
    State(service): State<CarService>,
    Path(id): Path<i64>,
) -> Result<Json<Car>, (StatusCode, String)> {
    service.get_by_id(id).map(Json).map_err(api_error)
}

pub async fn create_car(
    State(service): State<CarService>,
    Json(car): Json<Car>,
) -> (StatusCode, Json<Car>) {
    (StatusCode::CREATED, Json(service.add(car)))
}

pub async fn replace_car(
    State(service): State<CarService>,
    Json(car): Json<Car>,
) -> Result<Json<Car>, (StatusCode, String)> {
    service.replace(car).map(Json).map_err(api_error)
}

pub async fn patch_car(
    State(service): State<CarService>,
    Json(patch): Json<CarPatch>,
) -> Result<Json<Car>, (StatusCode, String)> {
    service.patch(patch).map(Json).map_err(api_error)
}

pub async fn delete_car(
    State(service): State<CarService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    service
        .remove_by_id(id)
        .map(|_| StatusCode::OK)
        .map_err(api_error)
}
