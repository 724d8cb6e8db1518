//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación.
//! Los servicios son compartidos por los adaptadores HTTP y RPC.

pub mod driver_service;
pub mod package_service;
pub mod route_service;

pub use driver_service::DriverService;
pub use package_service::PackageService;
pub use route_service::RouteService;
