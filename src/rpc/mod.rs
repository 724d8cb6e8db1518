//! API RPC
//!
//! Servidor TCP con tramas de longitud prefijada y sobres JSON.
//! Métodos con la forma `"Servicio/Método"`:
//!
//! - `DriverService`: CreateDriver, GetDriver, ListDrivers, UpdateDriver,
//!   DeleteDriver, GetDriverRoutes
//! - `PackageService`: CreatePackage, GetPackage, GetPackageByTrackingNumber,
//!   ListPackages, UpdatePackage, DeletePackage, MarkPackageAsDelivered,
//!   AssignToRoute, GetPackagesByRoute
//! - `RouteService`: CreateRoute, GetRoute, ListRoutes, UpdateRoute,
//!   UpdateRouteStatus, MarkRouteAsCompleted, AddPackagesToRoute,
//!   UpdatePackageDeliveryStatus, DeleteRoute

pub mod client;
pub mod driver_service;
pub mod package_service;
pub mod params;
pub mod protocol;
pub mod route_service;
pub mod server;
pub mod status;

pub use client::{RpcClient, RpcClientError};
pub use driver_service::DriverRpcService;
pub use package_service::PackageRpcService;
pub use protocol::{RpcRequest, RpcResponse};
pub use route_service::RouteRpcService;
pub use server::{RpcRouter, RpcServer, RpcService};
pub use status::{RpcCode, RpcStatus};

use crate::state::AppState;

/// Registra los tres servicios sobre el estado compartido
pub fn create_rpc_router(state: &AppState) -> RpcRouter {
    RpcRouter::new()
        .register(DriverRpcService::new(state.drivers.clone()))
        .register(PackageRpcService::new(state.packages.clone(), state.routes.clone()))
        .register(RouteRpcService::new(state.routes.clone()))
}
