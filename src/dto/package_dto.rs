use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Package, PackageDetails, PackageStatus};
use crate::utils::validation::validate_positive;

/// Request de paquete: se usa igual para crear y para actualizar
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_package_measures"))]
pub struct PackageRequest {
    #[validate(length(min = 1, message = "tracking_number is required"))]
    pub tracking_number: String,
    #[validate(length(min = 1, message = "customer_name is required"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customer_address is required"))]
    pub customer_address: String,
    #[validate(length(min = 1, message = "customer_phone is required"))]
    pub customer_phone: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
}

fn validate_package_measures(request: &PackageRequest) -> Result<(), ValidationError> {
    validate_positive(request.weight_kg).map_err(|mut e| {
        e.message = Some("weight_kg must be positive".into());
        e
    })?;
    validate_positive(request.volume_m3).map_err(|mut e| {
        e.message = Some("volume_m3 must be positive".into());
        e
    })
}

impl From<PackageRequest> for PackageDetails {
    fn from(request: PackageRequest) -> Self {
        Self {
            tracking_number: request.tracking_number,
            customer_name: request.customer_name,
            customer_address: request.customer_address,
            customer_phone: request.customer_phone,
            weight_kg: request.weight_kg,
            volume_m3: request.volume_m3,
        }
    }
}

/// Request para asignar un paquete a una ruta
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssignToRouteRequest {
    #[validate(length(min = 1, message = "route_id is required"))]
    pub route_id: String,
}

/// Response de paquete
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageResponse {
    pub id: Uuid,
    pub tracking_number: String,
    pub customer_name: String,
    pub customer_address: String,
    pub customer_phone: String,
    pub weight_kg: f64,
    pub volume_m3: f64,
    pub delivered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
    pub status: PackageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Package> for PackageResponse {
    fn from(package: Package) -> Self {
        Self {
            id: package.id,
            tracking_number: package.tracking_number,
            customer_name: package.customer_name,
            customer_address: package.customer_address,
            customer_phone: package.customer_phone,
            weight_kg: package.weight_kg,
            volume_m3: package.volume_m3,
            delivered: package.delivered,
            delivery_timestamp: package.delivery_timestamp,
            status: package.status,
            created_at: package.created_at,
            updated_at: package.updated_at,
        }
    }
}
