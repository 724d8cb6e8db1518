//! Servicio de drivers
//!
//! CRUD de repartidores y la guarda de borrado por rutas activas.

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Driver, Route, RouteStatus, VehicleType};
use crate::repositories::{DriverRepository, RouteRepository};
use crate::utils::errors::{conflict_error, not_found_error};
use crate::utils::AppResult;

#[derive(Clone)]
pub struct DriverService {
    drivers: DriverRepository,
    routes: RouteRepository,
}

impl DriverService {
    pub fn new(drivers: DriverRepository, routes: RouteRepository) -> Self {
        Self { drivers, routes }
    }

    /// Crear un repartidor (sin control de duplicados)
    pub async fn create(&self, name: String, vehicle_type: VehicleType) -> AppResult<Driver> {
        let driver = self.drivers.create(Driver::new(name, vehicle_type)).await?;
        info!("✅ Driver creado: {} ({})", driver.name, driver.id);
        Ok(driver)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Driver> {
        self.drivers
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("driver", &id.to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        self.drivers.find_all().await
    }

    /// Sobrescribe nombre, vehículo y estado activo
    pub async fn update(&self, id: Uuid, name: String, vehicle_type: VehicleType, active: bool) -> AppResult<Driver> {
        let mut driver = self.get(id).await?;
        driver.apply_update(name, vehicle_type, active);

        if !self.drivers.update(&driver).await? {
            return Err(not_found_error("driver", &id.to_string()));
        }

        info!("✏️ Driver actualizado: {}", id);
        Ok(driver)
    }

    /// Borra el driver salvo que tenga alguna ruta activa.
    /// La comprobación y el borrado no son atómicos.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let active_routes = self
            .routes
            .find_by_driver_and_status(id, RouteStatus::Active)
            .await?;

        if !active_routes.is_empty() {
            warn!("⛔ Driver {} tiene {} ruta(s) activa(s)", id, active_routes.len());
            return Err(conflict_error("cannot delete driver with active routes"));
        }

        if !self.drivers.delete(id).await? {
            return Err(not_found_error("driver", &id.to_string()));
        }

        info!("🗑️ Driver eliminado: {}", id);
        Ok(())
    }

    pub async fn routes_for_driver(&self, id: Uuid) -> AppResult<Vec<Route>> {
        self.routes.find_by_driver(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{DocumentStore, MemoryDocumentStore};
    use crate::utils::{AppError, ErrorKind};
    use chrono::Utc;
    use std::sync::Arc;

    fn service() -> (DriverService, RouteRepository) {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let routes = RouteRepository::new(store.clone());
        (
            DriverService::new(DriverRepository::new(store), routes.clone()),
            routes,
        )
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let (service, _) = service();
        let driver = service.create("Alice".to_string(), VehicleType::Van).await.unwrap();
        assert!(driver.active);

        let found = service.get(driver.id).await.unwrap();
        assert_eq!(found.name, "Alice");
        assert_eq!(service.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let (service, _) = service();
        let err = service.get(Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields() {
        let (service, _) = service();
        let driver = service.create("Alice".to_string(), VehicleType::Van).await.unwrap();

        let updated = service
            .update(driver.id, "Alicia".to_string(), VehicleType::Truck, false)
            .await
            .unwrap();
        assert_eq!(updated.vehicle_type, VehicleType::Truck);
        assert!(!service.get(driver.id).await.unwrap().active);

        let err = service
            .update(Uuid::new_v4(), "X".to_string(), VehicleType::Bike, true)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_blocked_by_active_route() {
        let (service, routes) = service();
        let driver = service.create("Alice".to_string(), VehicleType::Van).await.unwrap();
        let route = routes.create(Route::new(driver.id, Utc::now())).await.unwrap();

        routes.update_status(route.id, RouteStatus::Active).await.unwrap();
        let err = service.delete(driver.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));

        routes.update_status(route.id, RouteStatus::Cancelled).await.unwrap();
        service.delete(driver.id).await.unwrap();
        assert_eq!(service.delete(driver.id).await.unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_allowed_with_pending_route() {
        let (service, routes) = service();
        let driver = service.create("Alice".to_string(), VehicleType::Van).await.unwrap();
        let route = routes.create(Route::new(driver.id, Utc::now())).await.unwrap();
        assert_eq!(route.status, RouteStatus::Pending);

        service.delete(driver.id).await.unwrap();
        assert_eq!(service.get(driver.id).await.unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(routes.find_by_driver(driver.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_routes_for_driver() {
        let (service, routes) = service();
        let driver = service.create("Alice".to_string(), VehicleType::Van).await.unwrap();
        routes.create(Route::new(driver.id, Utc::now())).await.unwrap();
        routes.create(Route::new(Uuid::new_v4(), Utc::now())).await.unwrap();

        let found = service.routes_for_driver(driver.id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].driver_id, driver.id);
    }
}
