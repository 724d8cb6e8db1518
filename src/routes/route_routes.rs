use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch, post},
    Json, Router,
};

use crate::dto::{
    AddPackagesRequest, CreateRouteRequest, PackageDeliveryRequest, RouteResponse, UpdateRouteRequest,
    UpdateRouteStatusRequest,
};
use crate::routes::extract::{JsonBody, OptionalJson, ValidatedJson};
use crate::state::AppState;
use crate::utils::validation::parse_id;
use crate::utils::AppError;

pub fn create_route_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_routes).post(create_route))
        .route("/:id", get(get_route).put(update_route).delete(delete_route))
        .route("/:id/status", patch(update_route_status))
        .route("/:id/packages", post(add_packages_to_route))
        .route("/:id/packages/:package_id/delivered", patch(update_package_delivery_status))
}

async fn create_route(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateRouteRequest>,
) -> Result<(StatusCode, Json<RouteResponse>), AppError> {
    let (driver_id, date) = request.parse()?;
    let route = state.routes.create_route(driver_id, date).await?;
    Ok((StatusCode::CREATED, Json(route.into())))
}

async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteResponse>, AppError> {
    let id = parse_id(&id, "route")?;
    Ok(Json(state.routes.get_route(id).await?.into()))
}

async fn list_routes(State(state): State<AppState>) -> Result<Json<Vec<RouteResponse>>, AppError> {
    let routes = state.routes.list_routes().await?;
    Ok(Json(routes.into_iter().map(Into::into).collect()))
}

async fn update_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateRouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let id = parse_id(&id, "route")?;
    let mut route = state.routes.get_route(id).await?;
    request.apply_to(&mut route)?;
    Ok(Json(state.routes.update_route(route).await?.into()))
}

async fn update_route_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<UpdateRouteStatusRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "route")?;
    state.routes.update_route_status(id, request.status).await?;
    Ok(StatusCode::OK)
}

async fn add_packages_to_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<AddPackagesRequest>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "route")?;
    let package_ids = request.parse()?;
    state.routes.add_packages_to_route(id, &package_ids).await?;
    Ok(StatusCode::OK)
}

async fn update_package_delivery_status(
    State(state): State<AppState>,
    Path((id, package_id)): Path<(String, String)>,
    OptionalJson(request): OptionalJson<PackageDeliveryRequest>,
) -> Result<StatusCode, AppError> {
    let route_id = parse_id(&id, "route")?;
    let package_id = parse_id(&package_id, "package")?;
    state
        .routes
        .update_package_delivery_status(route_id, package_id, request.delivered)
        .await?;
    Ok(StatusCode::OK)
}

async fn delete_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id, "route")?;
    state.routes.delete_route(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
