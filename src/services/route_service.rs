//! Servicio de rutas
//!
//! Contiene la máquina de estados de la ruta y sus cascadas sobre paquetes:
//!
//! - `pending → active → {completed, cancelled}`
//! - `completed` es terminal
//! - `active` marca cada paquete de la ruta como `assigned`
//! - `completed` marca cada paquete de la ruta como `delivered`
//!
//! Ninguna secuencia leer-modificar-escribir es transaccional.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::models::{Package, PackageStatus, Route, RouteStatus};
use crate::repositories::{DriverRepository, PackageRepository, RouteRepository};
use crate::utils::errors::{conflict_error, not_found_error};
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct RouteService {
    routes: RouteRepository,
    drivers: DriverRepository,
    packages: PackageRepository,
}

impl RouteService {
    pub fn new(routes: RouteRepository, drivers: DriverRepository, packages: PackageRepository) -> Self {
        Self {
            routes,
            drivers,
            packages,
        }
    }

    /// Nueva ruta `pending` para un driver existente y activo
    pub async fn create_route(&self, driver_id: Uuid, date: DateTime<Utc>) -> AppResult<Route> {
        let driver = self
            .drivers
            .find_by_id(driver_id)
            .await?
            .ok_or_else(|| not_found_error("driver", &driver_id.to_string()))?;

        if !driver.active {
            return Err(conflict_error("driver is not active"));
        }

        let route = self.routes.create(Route::new(driver_id, date)).await?;
        info!("🛣️ Ruta creada: {} para driver {}", route.id, driver_id);
        Ok(route)
    }

    pub async fn get_route(&self, id: Uuid) -> AppResult<Route> {
        self.routes
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("route", &id.to_string()))
    }

    pub async fn list_routes(&self) -> AppResult<Vec<Route>> {
        self.routes.find_all().await
    }

    /// Reemplazo directo, sin reglas de negocio
    pub async fn update_route(&self, mut route: Route) -> AppResult<Route> {
        route.updated_at = Utc::now();
        if !self.routes.update(&route).await? {
            return Err(not_found_error("route", &route.id.to_string()));
        }
        Ok(route)
    }

    pub async fn delete_route(&self, id: Uuid) -> AppResult<()> {
        if !self.routes.delete(id).await? {
            return Err(not_found_error("route", &id.to_string()));
        }
        info!("🗑️ Ruta eliminada: {}", id);
        Ok(())
    }

    /// Añade paquetes al final de una ruta `pending`.
    ///
    /// Todos los ids se validan antes de tocar la ruta; si uno falla la ruta
    /// guardada no cambia. Un paquete no puede aparecer dos veces en la ruta.
    /// Las métricas se recalculan con todos los paquetes.
    pub async fn add_packages_to_route(&self, route_id: Uuid, package_ids: &[Uuid]) -> AppResult<Route> {
        let mut route = self.get_route(route_id).await?;

        if route.status != RouteStatus::Pending {
            return Err(conflict_error("packages can only be added to pending routes"));
        }

        let mut seen: HashSet<Uuid> = route.packages.iter().map(|a| a.package_id).collect();
        for package_id in package_ids {
            if !seen.insert(*package_id) {
                return Err(AppError::Conflict(format!(
                    "package '{}' is already on route '{}'",
                    package_id, route_id
                )));
            }

            let package = self
                .packages
                .find_by_id(*package_id)
                .await?
                .ok_or_else(|| not_found_error("package", &package_id.to_string()))?;

            if package.delivered {
                return Err(AppError::Conflict(format!("package '{}' is already delivered", package_id)));
            }
        }

        for package_id in package_ids {
            route.add_package(*package_id);
        }
        route.recalculate_estimates();

        if !self.routes.update(&route).await? {
            return Err(not_found_error("route", &route_id.to_string()));
        }

        info!(
            "📦 {} paquete(s) añadidos a la ruta {} (total {}, {:.1} km, {} min)",
            package_ids.len(),
            route_id,
            route.packages.len(),
            route.estimated_distance_km,
            route.estimated_time_min
        );
        Ok(route)
    }

    /// Cambia el estado de la ruta aplicando las cascadas sobre sus paquetes
    pub async fn update_route_status(&self, route_id: Uuid, status: RouteStatus) -> AppResult<()> {
        let mut route = self.get_route(route_id).await?;

        if route.status == RouteStatus::Completed && status != RouteStatus::Completed {
            return Err(conflict_error("cannot change status of a completed route"));
        }

        route.update_status(status)?;

        let cascade = match status {
            RouteStatus::Active => Some(PackageStatus::Assigned),
            RouteStatus::Completed => Some(PackageStatus::Delivered),
            RouteStatus::Pending | RouteStatus::Cancelled => None,
        };

        if let Some(package_status) = cascade {
            for assignment in &route.packages {
                if !self.packages.update_status(assignment.package_id, package_status).await? {
                    warn!(
                        "⚠️ Paquete {} de la ruta {} no existe, se omite la cascada",
                        assignment.package_id, route_id
                    );
                }
            }
            debug!("🔁 Cascada {:?} aplicada a {} paquete(s)", package_status, route.packages.len());
        }

        if !self.routes.update_status(route_id, status).await? {
            return Err(not_found_error("route", &route_id.to_string()));
        }

        info!("🚦 Ruta {} → {}", route_id, status);
        Ok(())
    }

    /// Entrega (o des-entrega) un paquete dentro de una ruta `active`
    pub async fn update_package_delivery_status(
        &self,
        route_id: Uuid,
        package_id: Uuid,
        delivered: bool,
    ) -> AppResult<()> {
        let mut route = self.get_route(route_id).await?;

        if route.status != RouteStatus::Active {
            return Err(conflict_error("package delivery can only be updated on active routes"));
        }

        if !route.update_package_status(package_id, delivered) {
            return Err(AppError::NotFound(format!(
                "package '{}' is not assigned to route '{}'",
                package_id, route_id
            )));
        }

        if !self.routes.update_assignments(route_id, &route.packages).await? {
            return Err(not_found_error("route", &route_id.to_string()));
        }

        let package_status = if delivered {
            PackageStatus::Delivered
        } else {
            PackageStatus::Assigned
        };
        if !self.packages.update_status(package_id, package_status).await? {
            warn!("⚠️ Paquete {} no existe, estado no actualizado", package_id);
        }

        info!(
            "📬 Paquete {} en ruta {}: delivered={}",
            package_id, route_id, delivered
        );
        Ok(())
    }

    /// Paquetes completos de una ruta, en orden de reparto
    pub async fn route_packages(&self, route_id: Uuid) -> AppResult<Vec<Package>> {
        let route = self.get_route(route_id).await?;

        let mut packages = Vec::with_capacity(route.packages.len());
        for assignment in &route.packages {
            let package = self
                .packages
                .find_by_id(assignment.package_id)
                .await?
                .ok_or_else(|| not_found_error("package", &assignment.package_id.to_string()))?;
            packages.push(package);
        }
        Ok(packages)
    }
}
