//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum y de los servicios RPC.

use std::sync::Arc;

use crate::config::environment::EnvironmentConfig;
use crate::database::DocumentStore;
use crate::repositories::{DriverRepository, PackageRepository, RouteRepository};
use crate::services::{DriverService, PackageService, RouteService};

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    pub drivers: DriverService,
    pub packages: PackageService,
    pub routes: RouteService,
}

impl AppState {
    /// Construye repositorios y servicios sobre un único store
    pub fn new(store: Arc<dyn DocumentStore>, config: EnvironmentConfig) -> Self {
        let driver_repository = DriverRepository::new(store.clone());
        let package_repository = PackageRepository::new(store.clone());
        let route_repository = RouteRepository::new(store);

        Self {
            config,
            drivers: DriverService::new(driver_repository.clone(), route_repository.clone()),
            packages: PackageService::new(package_repository.clone()),
            routes: RouteService::new(route_repository, driver_repository, package_repository),
        }
    }
}
