//! Servicio de paquetes

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Package, PackageDetails};
use crate::repositories::PackageRepository;
use crate::utils::errors::{conflict_error, not_found_error};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct PackageService {
    packages: PackageRepository,
}

impl PackageService {
    pub fn new(packages: PackageRepository) -> Self {
        Self { packages }
    }

    pub async fn create(&self, details: PackageDetails) -> AppResult<Package> {
        let package = self.packages.create(Package::new(details)).await?;
        info!("📦 Paquete creado: {} ({})", package.tracking_number, package.id);
        Ok(package)
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Package> {
        self.packages
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("package", &id.to_string()))
    }

    pub async fn get_by_tracking_number(&self, tracking_number: &str) -> AppResult<Package> {
        self.packages
            .find_by_tracking_number(tracking_number)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("package with tracking number '{}' not found", tracking_number)))
    }

    pub async fn list(&self) -> AppResult<Vec<Package>> {
        self.packages.find_all().await
    }

    /// Sobrescribe los seis campos descriptivos
    pub async fn update(&self, id: Uuid, details: PackageDetails) -> AppResult<Package> {
        let mut package = self.get(id).await?;
        package.apply_details(details);

        if !self.packages.update(&package).await? {
            return Err(not_found_error("package", &id.to_string()));
        }

        info!("✏️ Paquete actualizado: {}", id);
        Ok(package)
    }

    /// Un paquete entregado no se puede borrar
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let package = self.get(id).await?;
        if package.delivered {
            warn!("⛔ Intento de borrar paquete entregado: {}", id);
            return Err(conflict_error("cannot delete delivered package"));
        }

        if !self.packages.delete(id).await? {
            return Err(not_found_error("package", &id.to_string()));
        }

        info!("🗑️ Paquete eliminado: {}", id);
        Ok(())
    }

    pub async fn mark_delivered(&self, id: Uuid) -> AppResult<Package> {
        let mut package = self.get(id).await?;
        package.mark_as_delivered();

        if !self.packages.update(&package).await? {
            return Err(not_found_error("package", &id.to_string()));
        }

        info!("✅ Paquete entregado: {} ({})", package.tracking_number, id);
        Ok(package)
    }
}
