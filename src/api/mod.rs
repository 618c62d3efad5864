mod handlers;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::service::CarService;

pub fn create_router(service: CarService) -> Router {
    Router::new()
        // Cars
        .route(
            "/cars",
            get(handlers::list_cars)
                .post(handlers::create_car)
                .put(handlers::replace_car)
                .patch(handlers::patch_car),
        )
        .route("/cars/color/{color}", get(handlers::list_cars_by_color))
        .route(
            "/cars/{id}",
            get(handlers::get_car).delete(handlers::delete_car),
        )
        // Health
        .route("/health", get(handlers::health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(service)
}
