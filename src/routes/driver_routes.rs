use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::dto::{CreateDriverRequest, DriverResponse, RouteResponse, UpdateDriverRequest};
use crate::routes::extract::ValidatedJson;
use crate::state::AppState;
use crate::utils::validation::parse_id;
use crate::utils::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_drivers).post(create_driver))
        .route("/:id", get(get_driver).put(update_driver).delete(delete_driver))
        .route("/:id/routes", get(get_driver_routes))
}

async fn create_driver(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateDriverRequest>,
) -> Result<(StatusCode, Json<DriverResponse>), AppError> {
    let driver = state.drivers.create(request.name, request.vehicle_type).await?;
    Ok((StatusCode::CREATED, Json(driver.into())))
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DriverResponse>, AppError> {
    let id = parse_id(&id, "driver")?;
    Ok(Json(state.drivers.get(id).await?.into()))
}

async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<DriverResponse>>, AppError> {
    let drivers = state.drivers.list().await?;
    Ok(Json(drivers.into_iter().map(Into::into).collect()))
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateDriverRequest>,
) -> Result<Json<DriverResponse>, AppError> {
    let id = parse_id(&id, "driver")?;
    let driver = state
        .drivers
        .update(id, request.name, request.vehicle_type, request.active)
        .await?;
    Ok(Json(driver.into()))
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "driver")?;
    state.drivers.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_driver_routes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let id = parse_id(&id, "driver")?;
    let routes = state.drivers.routes_for_driver(id).await?;
    Ok(Json(routes.into_iter().map(Into::into).collect()))
}
