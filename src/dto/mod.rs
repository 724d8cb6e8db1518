//! DTOs compartidos por HTTP y RPC
//!
//! Única capa de conversión entre los modelos del dominio y los registros
//! de transporte. Los requests se validan con `validator`; los ids llegan
//! como texto y se convierten con `utils::validation::parse_id`.

pub mod driver_dto;
pub mod package_dto;
pub mod route_dto;

pub use driver_dto::*;
pub use package_dto::*;
pub use route_dto::*;
