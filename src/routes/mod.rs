//! Rutas HTTP
//!
//! Un router por entidad, montados en `create_app`.

pub mod driver_routes;
pub mod extract;
pub mod health;
pub mod package_routes;
pub mod route_routes;

use axum::Router;

use crate::middleware::{cors_for, trace_middleware};
use crate::state::AppState;

/// Router completo de la API HTTP con CORS y trazas
pub fn create_app(state: AppState) -> Router {
    let cors = cors_for(&state.config);

    Router::new()
        .merge(health::create_health_router())
        .nest("/api/v1/drivers", driver_routes::create_driver_router())
        .nest("/api/v1/packages", package_routes::create_package_router())
        .nest("/routes", route_routes::create_route_router())
        .layer(trace_middleware())
        .layer(cors)
        .with_state(state)
}
