use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Driver, VehicleType};

/// Request para crear un driver
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub vehicle_type: VehicleType,
}

/// Request para actualizar un driver (sobrescribe los tres campos)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    pub vehicle_type: VehicleType,
    #[serde(default)]
    pub active: bool,
}

/// Response de driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub vehicle_type: VehicleType,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            vehicle_type: driver.vehicle_type,
            active: driver.active,
            created_at: driver.created_at,
            updated_at: driver.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_request_rejects_unknown_vehicle() {
        let result = serde_json::from_value::<CreateDriverRequest>(json!({
            "name": "Alice",
            "vehicle_type": "plane"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_request_active_defaults_to_false() {
        let request: UpdateDriverRequest = serde_json::from_value(json!({
            "name": "Alice",
            "vehicle_type": "van"
        }))
        .unwrap();
        assert!(!request.active);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_empty_name_fails_validation() {
        let request = CreateDriverRequest {
            name: String::new(),
            vehicle_type: VehicleType::Bike,
        };
        assert!(request.validate().is_err());
    }
}
