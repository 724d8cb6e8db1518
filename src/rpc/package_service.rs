use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::params::{decode, decode_validated, empty, encode, IdParams};
use super::server::RpcService;
use super::status::RpcStatus;
use crate::dto::{PackageRequest, PackageResponse};
use crate::services::{PackageService, RouteService};
use crate::utils::validation::{parse_id, validate_request};

#[derive(Debug, Deserialize)]
struct UpdatePackageParams {
    id: String,
    #[serde(flatten)]
    package: PackageRequest,
}

#[derive(Debug, Deserialize)]
struct TrackingNumberParams {
    tracking_number: String,
}

#[derive(Debug, Deserialize)]
struct AssignToRouteParams {
    package_id: String,
    route_id: String,
}

#[derive(Debug, Deserialize)]
struct RouteIdParams {
    route_id: String,
}

/// `PackageService/*`. Asignar y listar por ruta pasan por el servicio de rutas.
pub struct PackageRpcService {
    packages: PackageService,
    routes: RouteService,
}

impl PackageRpcService {
    pub fn new(packages: PackageService, routes: RouteService) -> Self {
        Self { packages, routes }
    }

    async fn mark_delivered(&self, params: Value) -> Result<Value, RpcStatus> {
        let IdParams { id } = decode(params)?;
        let package = self.packages.mark_delivered(parse_id(&id, "package")?).await?;
        Ok(json!({ "package": encode(PackageResponse::from(package))? }))
    }
}

#[async_trait]
impl RpcService for PackageRpcService {
    fn name(&self) -> &'static str {
        "PackageService"
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcStatus> {
        match method {
            "CreatePackage" => {
                let request: PackageRequest = decode_validated(params)?;
                let package = self.packages.create(request.into()).await?;
                Ok(json!({ "package": encode(PackageResponse::from(package))? }))
            }
            "GetPackage" => {
                let IdParams { id } = decode(params)?;
                let package = self.packages.get(parse_id(&id, "package")?).await?;
                Ok(json!({ "package": encode(PackageResponse::from(package))? }))
            }
            "GetPackageByTrackingNumber" => {
                let TrackingNumberParams { tracking_number } = decode(params)?;
                let package = self.packages.get_by_tracking_number(&tracking_number).await?;
                Ok(json!({ "package": encode(PackageResponse::from(package))? }))
            }
            "ListPackages" => {
                let packages: Vec<PackageResponse> =
                    self.packages.list().await?.into_iter().map(Into::into).collect();
                Ok(json!({ "packages": encode(packages)? }))
            }
            "UpdatePackage" => {
                let UpdatePackageParams { id, package } = decode(params)?;
                validate_request(&package)?;
                let id = parse_id(&id, "package")?;
                let updated = self.packages.update(id, package.into()).await?;
                Ok(json!({ "package": encode(PackageResponse::from(updated))? }))
            }
            "DeletePackage" => {
                let IdParams { id } = decode(params)?;
                self.packages.delete(parse_id(&id, "package")?).await?;
                empty()
            }
            // `UpdatePackageStatus` es el nombre antiguo de la misma operación
            "MarkPackageAsDelivered" | "UpdatePackageStatus" => self.mark_delivered(params).await,
            "AssignToRoute" => {
                let AssignToRouteParams { package_id, route_id } = decode(params)?;
                let package_id = parse_id(&package_id, "package")?;
                let route_id = parse_id(&route_id, "route")?;
                self.routes.add_packages_to_route(route_id, &[package_id]).await?;
                empty()
            }
            "GetPackagesByRoute" => {
                let RouteIdParams { route_id } = decode(params)?;
                let packages: Vec<PackageResponse> = self
                    .routes
                    .route_packages(parse_id(&route_id, "route")?)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                Ok(json!({ "packages": encode(packages)? }))
            }
            _ => Err(RpcStatus::unimplemented(&format!("{}/{}", self.name(), method))),
        }
    }
}
