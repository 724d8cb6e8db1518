//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos que se persisten como
//! documentos en el store (drivers, packages, routes).

pub mod driver;
pub mod package;
pub mod route;

pub use driver::{Driver, VehicleType};
pub use package::{Package, PackageDetails, PackageStatus};
pub use route::{PackageAssignment, Route, RouteStatus};
