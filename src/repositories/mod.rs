//! Repositories
//!
//! Un repositorio por entidad. Son pasarelas finas sobre el document store:
//! serializan el modelo, delegan la operación y deserializan el resultado.
//! Las reglas de negocio viven en `services`.

pub mod driver_repository;
pub mod package_repository;
pub mod route_repository;

pub use driver_repository::DriverRepository;
pub use package_repository::PackageRepository;
pub use route_repository::RouteRepository;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::database::StoreError;
use crate::utils::AppResult;

/// Documento del store → modelo
pub(crate) fn decode<T: DeserializeOwned>(doc: Value) -> AppResult<T> {
    serde_json::from_value(doc).map_err(|e| StoreError::Serialization(e).into())
}

pub(crate) fn decode_all<T: DeserializeOwned>(docs: Vec<Value>) -> AppResult<Vec<T>> {
    docs.into_iter().map(decode).collect()
}

/// Modelo → documento del store
pub(crate) fn encode<T: Serialize>(model: &T) -> AppResult<Value> {
    serde_json::to_value(model).map_err(|e| StoreError::Serialization(e).into())
}

/// Construye un mapa de campos para `set_fields` / `find_where`
pub(crate) fn fields<const N: usize>(pairs: [(&str, Value); N]) -> Map<String, Value> {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
