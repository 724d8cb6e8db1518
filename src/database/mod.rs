//! Módulo de base de datos
//!
//! Document store con backend PostgreSQL (JSONB) o en memoria.

pub mod connection;
pub mod document_store;
pub mod memory_store;
pub mod postgres_store;

pub use connection::{connect_store, mask_database_url};
pub use document_store::{Collection, DocumentStore, Filter, StoreError, StoreResult};
pub use memory_store::MemoryDocumentStore;
pub use postgres_store::PgDocumentStore;
