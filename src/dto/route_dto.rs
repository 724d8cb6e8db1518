use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{PackageAssignment, Route, RouteStatus};
use crate::utils::validation::{field_error, parse_id, parse_ids, parse_route_date};
use crate::utils::AppResult;

/// Request para crear una ruta
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRouteRequest {
    #[validate(length(min = 1, message = "driver_id is required"))]
    pub driver_id: String,
    /// RFC3339 o `YYYY-MM-DD`
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
}

impl CreateRouteRequest {
    pub fn parse(&self) -> AppResult<(Uuid, DateTime<Utc>)> {
        let driver_id = parse_id(&self.driver_id, "driver")?;
        let date = parse_route_date(&self.date).map_err(|e| field_error("date", e))?;
        Ok((driver_id, date))
    }
}

/// Request para actualizar una ruta. No toca estado ni paquetes.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateRouteRequest {
    #[validate(length(min = 1, message = "driver_id is required"))]
    pub driver_id: String,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    #[serde(default)]
    pub estimated_distance_km: f64,
    #[serde(default)]
    pub estimated_time_min: u32,
}

impl UpdateRouteRequest {
    /// Copia los campos editables sobre la ruta existente
    pub fn apply_to(&self, route: &mut Route) -> AppResult<()> {
        route.driver_id = parse_id(&self.driver_id, "driver")?;
        route.date = parse_route_date(&self.date).map_err(|e| field_error("date", e))?;
        route.estimated_distance_km = self.estimated_distance_km;
        route.estimated_time_min = self.estimated_time_min;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRouteStatusRequest {
    pub status: RouteStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPackagesRequest {
    pub package_ids: Vec<String>,
}

impl AddPackagesRequest {
    pub fn parse(&self) -> AppResult<Vec<Uuid>> {
        parse_ids(&self.package_ids, "package")
    }
}

fn default_delivered() -> bool {
    true
}

/// Cuerpo opcional de `PATCH /routes/:id/packages/:package_id/delivered`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDeliveryRequest {
    #[serde(default = "default_delivered")]
    pub delivered: bool,
}

impl Default for PackageDeliveryRequest {
    fn default() -> Self {
        Self { delivered: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageAssignmentResponse {
    pub package_id: Uuid,
    pub order_in_route: u32,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
}

impl From<PackageAssignment> for PackageAssignmentResponse {
    fn from(assignment: PackageAssignment) -> Self {
        Self {
            package_id: assignment.package_id,
            order_in_route: assignment.order_in_route,
            delivered: assignment.delivered,
            delivery_timestamp: assignment.delivery_timestamp,
        }
    }
}

/// Response de ruta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteResponse {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub date: DateTime<Utc>,
    pub packages: Vec<PackageAssignmentResponse>,
    pub estimated_distance_km: f64,
    pub estimated_time_min: u32,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Route> for RouteResponse {
    fn from(route: Route) -> Self {
        Self {
            id: route.id,
            driver_id: route.driver_id,
            date: route.date,
            packages: route.packages.into_iter().map(Into::into).collect(),
            estimated_distance_km: route.estimated_distance_km,
            estimated_time_min: route.estimated_time_min,
            status: route.status,
            created_at: route.created_at,
            updated_at: route.updated_at,
        }
    }
}
