use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use crate::dto::{AssignToRouteRequest, PackageAssignmentResponse, PackageRequest, PackageResponse};
use crate::routes::extract::ValidatedJson;
use crate::state::AppState;
use crate::utils::validation::parse_id;
use crate::utils::AppError;

pub fn create_package_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_packages).post(create_package))
        .route("/:id", get(get_package).put(update_package).delete(delete_package))
        .route("/:id/assign", post(assign_to_route))
        .route("/:id/deliver", post(mark_as_delivered))
        .route("/route/:route_id", get(get_packages_by_route))
        .route("/tracking/:tracking_number", get(get_package_by_tracking_number))
}

async fn create_package(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> Result<(StatusCode, Json<PackageResponse>), AppError> {
    let package = state.packages.create(request.into()).await?;
    Ok((StatusCode::CREATED, Json(package.into())))
}

async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PackageResponse>, AppError> {
    let id = parse_id(&id, "package")?;
    Ok(Json(state.packages.get(id).await?.into()))
}

async fn get_package_by_tracking_number(
    State(state): State<AppState>,
    Path(tracking_number): Path<String>,
) -> Result<Json<PackageResponse>, AppError> {
    let package = state.packages.get_by_tracking_number(&tracking_number).await?;
    Ok(Json(package.into()))
}

async fn list_packages(State(state): State<AppState>) -> Result<Json<Vec<PackageResponse>>, AppError> {
    let packages = state.packages.list().await?;
    Ok(Json(packages.into_iter().map(Into::into).collect()))
}

async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PackageRequest>,
) -> Result<Json<PackageResponse>, AppError> {
    let id = parse_id(&id, "package")?;
    let package = state.packages.update(id, request.into()).await?;
    Ok(Json(package.into()))
}

async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "package")?;
    state.packages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Atajo de `POST /routes/:id/packages` con un único paquete
async fn assign_to_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<AssignToRouteRequest>,
) -> Result<StatusCode, AppError> {
    let package_id = parse_id(&id, "package")?;
    let route_id = parse_id(&request.route_id, "route")?;
    state.routes.add_packages_to_route(route_id, &[package_id]).await?;
    Ok(StatusCode::OK)
}

async fn mark_as_delivered(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PackageResponse>, AppError> {
    let id = parse_id(&id, "package")?;
    Ok(Json(state.packages.mark_delivered(id).await?.into()))
}

/// Asignaciones de la ruta (no los paquetes completos)
async fn get_packages_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<String>,
) -> Result<Json<Vec<PackageAssignmentResponse>>, AppError> {
    let route_id = parse_id(&route_id, "route")?;
    let route = state.routes.get_route(route_id).await?;
    Ok(Json(route.packages.into_iter().map(Into::into).collect()))
}
