use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use super::params::{decode, decode_validated, empty, encode, IdParams};
use super::server::RpcService;
use super::status::RpcStatus;
use crate::dto::{AddPackagesRequest, CreateRouteRequest, RouteResponse, UpdateRouteRequest};
use crate::models::RouteStatus;
use crate::services::RouteService;
use crate::utils::validation::{parse_id, validate_request};

#[derive(Debug, Deserialize)]
struct UpdateRouteParams {
    id: String,
    #[serde(flatten)]
    route: UpdateRouteRequest,
}

#[derive(Debug, Deserialize)]
struct UpdateRouteStatusParams {
    id: String,
    status: RouteStatus,
}

#[derive(Debug, Deserialize)]
struct AddPackagesParams {
    route_id: String,
    #[serde(flatten)]
    packages: AddPackagesRequest,
}

#[derive(Debug, Deserialize)]
struct PackageDeliveryParams {
    route_id: String,
    package_id: String,
    delivered: bool,
}

/// `RouteService/*`
pub struct RouteRpcService {
    service: RouteService,
}

impl RouteRpcService {
    pub fn new(service: RouteService) -> Self {
        Self { service }
    }

    async fn route_result(&self, id: Uuid) -> Result<Value, RpcStatus> {
        let route = self.service.get_route(id).await?;
        Ok(json!({ "route": encode(RouteResponse::from(route))? }))
    }
}

#[async_trait]
impl RpcService for RouteRpcService {
    fn name(&self) -> &'static str {
        "RouteService"
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcStatus> {
        match method {
            "CreateRoute" => {
                let request: CreateRouteRequest = decode_validated(params)?;
                let (driver_id, date) = request.parse()?;
                let route = self.service.create_route(driver_id, date).await?;
                Ok(json!({ "route": encode(RouteResponse::from(route))? }))
            }
            "GetRoute" => {
                let IdParams { id } = decode(params)?;
                self.route_result(parse_id(&id, "route")?).await
            }
            "ListRoutes" => {
                let routes: Vec<RouteResponse> =
                    self.service.list_routes().await?.into_iter().map(Into::into).collect();
                Ok(json!({ "routes": encode(routes)? }))
            }
            "UpdateRoute" => {
                let UpdateRouteParams { id, route: request } = decode(params)?;
                validate_request(&request)?;
                let mut route = self.service.get_route(parse_id(&id, "route")?).await?;
                request.apply_to(&mut route)?;
                let updated = self.service.update_route(route).await?;
                Ok(json!({ "route": encode(RouteResponse::from(updated))? }))
            }
            "UpdateRouteStatus" => {
                let UpdateRouteStatusParams { id, status } = decode(params)?;
                self.service
                    .update_route_status(parse_id(&id, "route")?, status)
                    .await?;
                empty()
            }
            "MarkRouteAsCompleted" => {
                let IdParams { id } = decode(params)?;
                let id = parse_id(&id, "route")?;
                self.service.update_route_status(id, RouteStatus::Completed).await?;
                self.route_result(id).await
            }
            "AddPackagesToRoute" => {
                let AddPackagesParams { route_id, packages } = decode(params)?;
                let route_id = parse_id(&route_id, "route")?;
                self.service
                    .add_packages_to_route(route_id, &packages.parse()?)
                    .await?;
                empty()
            }
            "UpdatePackageDeliveryStatus" => {
                let PackageDeliveryParams {
                    route_id,
                    package_id,
                    delivered,
                } = decode(params)?;
                self.service
                    .update_package_delivery_status(
                        parse_id(&route_id, "route")?,
                        parse_id(&package_id, "package")?,
                        delivered,
                    )
                    .await?;
                empty()
            }
            "DeleteRoute" => {
                let IdParams { id } = decode(params)?;
                self.service.delete_route(parse_id(&id, "route")?).await?;
                empty()
            }
            _ => Err(RpcStatus::unimplemented(&format!("{}/{}", self.name(), method))),
        }
    }
}
