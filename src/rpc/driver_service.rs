use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::params::{decode, decode_validated, empty, encode, IdParams};
use super::server::RpcService;
use super::status::RpcStatus;
use crate::dto::{CreateDriverRequest, DriverResponse, RouteResponse, UpdateDriverRequest};
use crate::services::DriverService;
use crate::utils::validation::{parse_id, validate_request};

#[derive(Debug, Deserialize)]
struct UpdateDriverParams {
    id: String,
    #[serde(flatten)]
    driver: UpdateDriverRequest,
}

#[derive(Debug, Deserialize)]
struct DriverRoutesParams {
    #[serde(alias = "id")]
    driver_id: String,
}

/// `DriverService/*`
pub struct DriverRpcService {
    service: DriverService,
}

impl DriverRpcService {
    pub fn new(service: DriverService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl RpcService for DriverRpcService {
    fn name(&self) -> &'static str {
        "DriverService"
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcStatus> {
        match method {
            "CreateDriver" => {
                let request: CreateDriverRequest = decode_validated(params)?;
                let driver = self.service.create(request.name, request.vehicle_type).await?;
                Ok(json!({ "driver": encode(DriverResponse::from(driver))? }))
            }
            "GetDriver" => {
                let IdParams { id } = decode(params)?;
                let driver = self.service.get(parse_id(&id, "driver")?).await?;
                Ok(json!({ "driver": encode(DriverResponse::from(driver))? }))
            }
            "ListDrivers" => {
                let drivers: Vec<DriverResponse> =
                    self.service.list().await?.into_iter().map(Into::into).collect();
                Ok(json!({ "drivers": encode(drivers)? }))
            }
            "UpdateDriver" => {
                let UpdateDriverParams { id, driver } = decode(params)?;
                validate_request(&driver)?;
                let id = parse_id(&id, "driver")?;
                let updated = self
                    .service
                    .update(id, driver.name, driver.vehicle_type, driver.active)
                    .await?;
                Ok(json!({ "driver": encode(DriverResponse::from(updated))? }))
            }
            "DeleteDriver" => {
                let IdParams { id } = decode(params)?;
                self.service.delete(parse_id(&id, "driver")?).await?;
                empty()
            }
            "GetDriverRoutes" => {
                let DriverRoutesParams { driver_id } = decode(params)?;
                let routes: Vec<RouteResponse> = self
                    .service
                    .routes_for_driver(parse_id(&driver_id, "driver")?)
                    .await?
                    .into_iter()
                    .map(Into::into)
                    .collect();
                Ok(json!({ "routes": encode(routes)? }))
            }
            _ => Err(RpcStatus::unimplemented(&format!("{}/{}", self.name(), method))),
        }
    }
}
