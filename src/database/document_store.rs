//! Abstracción del document store
//!
//! Los repositorios sólo dependen de estas operaciones: insertar, buscar por id,
//! listar, filtrar por campos de primer nivel, reemplazar, borrar y
//! actualizar campos sueltos. No hay transacciones.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

/// Colecciones del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Drivers,
    Packages,
    Routes,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Drivers, Collection::Packages, Collection::Routes];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Drivers => "drivers",
            Collection::Packages => "packages",
            Collection::Routes => "routes",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores del store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filtro de igualdad sobre campos de primer nivel
pub type Filter = Map<String, Value>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Inserta el documento con un id generado (`doc.id`) y lo devuelve
    async fn insert_one(&self, collection: Collection, doc: Value) -> StoreResult<Uuid>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Value>>;

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>>;

    async fn find_where(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Value>>;

    /// Reemplaza el documento completo. `false` si no existía.
    async fn replace_one(&self, collection: Collection, id: Uuid, doc: Value) -> StoreResult<bool>;

    /// `false` si no existía
    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<bool>;

    /// Actualización parcial de campos de primer nivel. `false` si no existía.
    async fn set_fields(&self, collection: Collection, id: Uuid, fields: Map<String, Value>) -> StoreResult<bool>;
}

/// Escribe el id generado dentro del documento
pub(crate) fn with_id(mut doc: Value, id: Uuid) -> StoreResult<Value> {
    match doc.as_object_mut() {
        Some(object) => {
            object.insert("id".to_string(), Value::String(id.to_string()));
            Ok(doc)
        }
        None => Err(StoreError::InvalidDocument("document must be a JSON object".to_string())),
    }
}

/// Igualdad de todos los campos del filtro (semántica de `@>` para escalares)
pub(crate) fn matches_filter(doc: &Value, filter: &Filter) -> bool {
    filter
        .iter()
        .all(|(field, expected)| doc.get(field).map_or(false, |actual| actual == expected))
}
