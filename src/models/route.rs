//! Modelo de Route
//!
//! Este módulo contiene el struct Route, sus asignaciones de paquetes
//! y la regla de transición de estado de la ruta.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::errors::AppError;

/// Kilómetros estimados por paquete asignado
pub const KM_PER_PACKAGE: f64 = 5.0;

/// Velocidad media asumida para la estimación de tiempo
pub const AVERAGE_SPEED_KMH: f64 = 50.0;

/// Estado de la ruta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RouteStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl RouteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteStatus::Pending => "pending",
            RouteStatus::Active => "active",
            RouteStatus::Completed => "completed",
            RouteStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paquete asignado a una ruta
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PackageAssignment {
    pub package_id: Uuid,
    pub order_in_route: u32,
    pub delivered: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_timestamp: Option<DateTime<Utc>>,
}

/// Route principal - documento de la colección routes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub id: Uuid,
    pub driver_id: Uuid,
    pub date: DateTime<Utc>,
    pub packages: Vec<PackageAssignment>,
    pub estimated_distance_km: f64,
    pub estimated_time_min: u32,
    pub status: RouteStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Route {
    pub fn new(driver_id: Uuid, date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::nil(),
            driver_id,
            date,
            packages: Vec::new(),
            estimated_distance_km: 0.0,
            estimated_time_min: 0,
            status: RouteStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Añade un paquete al final con orden 1-based
    pub fn add_package(&mut self, package_id: Uuid) {
        let order_in_route = self.packages.len() as u32 + 1;
        self.packages.push(PackageAssignment {
            package_id,
            order_in_route,
            delivered: false,
            delivery_timestamp: None,
        });
        self.updated_at = Utc::now();
    }

    /// Recalcula distancia y tiempo a partir de todos los paquetes de la ruta
    pub fn recalculate_estimates(&mut self) {
        self.estimated_distance_km = estimated_distance_km(self.packages.len());
        self.estimated_time_min = estimated_time_min(self.estimated_distance_km);
    }

    /// Actualiza la entrega de un paquete de la ruta. Devuelve `false` si no está asignado.
    pub fn update_package_status(&mut self, package_id: Uuid, delivered: bool) -> bool {
        let Some(assignment) = self.packages.iter_mut().find(|p| p.package_id == package_id) else {
            return false;
        };

        let now = Utc::now();
        assignment.delivered = delivered;
        assignment.delivery_timestamp = if delivered { Some(now) } else { None };
        self.updated_at = now;
        true
    }

    pub fn all_packages_delivered(&self) -> bool {
        self.packages.iter().all(|p| p.delivered)
    }

    /// Regla propia de la ruta: sólo se completa con todos los paquetes entregados
    pub fn update_status(&mut self, status: RouteStatus) -> Result<(), AppError> {
        if status == RouteStatus::Completed && !self.all_packages_delivered() {
            return Err(AppError::PendingPackages);
        }

        self.status = status;
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// 5 km por paquete; no hay geocodificación detrás
pub fn estimated_distance_km(package_count: usize) -> f64 {
    package_count as f64 * KM_PER_PACKAGE
}

/// Minutos a velocidad fija, truncados
pub fn estimated_time_min(distance_km: f64) -> u32 {
    (distance_km / AVERAGE_SPEED_KMH * 60.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route() -> Route {
        Route::new(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_new_route_is_pending_and_empty() {
        let route = route();
        assert_eq!(route.status, RouteStatus::Pending);
        assert!(route.packages.is_empty());
        assert_eq!(route.estimated_distance_km, 0.0);
        assert_eq!(route.estimated_time_min, 0);
    }

    #[test]
    fn test_add_package_appends_with_sequential_order() {
        let mut route = route();
        let ids: Vec<Uuid> = (0..3).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            route.add_package(*id);
        }

        let orders: Vec<u32> = route.packages.iter().map(|p| p.order_in_route).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(route.packages[2].package_id, ids[2]);
    }

    #[test]
    fn test_estimates() {
        assert_eq!(estimated_distance_km(1), 5.0);
        assert_eq!(estimated_time_min(5.0), 6);
        assert_eq!(estimated_distance_km(3), 15.0);
        assert_eq!(estimated_time_min(15.0), 18);
        assert_eq!(estimated_time_min(0.0), 0);

        let mut route = route();
        route.add_package(Uuid::new_v4());
        route.add_package(Uuid::new_v4());
        route.recalculate_estimates();
        assert_eq!(route.estimated_distance_km, 10.0);
        assert_eq!(route.estimated_time_min, 12);
    }

    #[test]
    fn test_complete_requires_all_delivered() {
        let mut route = route();
        let package_id = Uuid::new_v4();
        route.add_package(package_id);

        assert!(matches!(route.update_status(RouteStatus::Completed), Err(AppError::PendingPackages)));
        assert_eq!(route.status, RouteStatus::Pending);

        assert!(route.update_package_status(package_id, true));
        assert!(route.update_status(RouteStatus::Completed).is_ok());
        assert_eq!(route.status, RouteStatus::Completed);
    }

    #[test]
    fn test_empty_route_can_complete() {
        let mut route = route();
        assert!(route.update_status(RouteStatus::Completed).is_ok());
    }

    #[test]
    fn test_update_package_status_clears_timestamp_when_undelivered() {
        let mut route = route();
        let package_id = Uuid::new_v4();
        route.add_package(package_id);

        route.update_package_status(package_id, true);
        assert!(route.packages[0].delivery_timestamp.is_some());

        route.update_package_status(package_id, false);
        assert!(!route.packages[0].delivered);
        assert!(route.packages[0].delivery_timestamp.is_none());

        assert!(!route.update_package_status(Uuid::new_v4(), true));
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_value(RouteStatus::Active).unwrap(), "active");
        assert!(serde_json::from_value::<RouteStatus>(serde_json::json!("paused")).is_err());
    }
}
