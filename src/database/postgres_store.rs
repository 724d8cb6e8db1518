//! Document store sobre PostgreSQL
//!
//! Cada colección es una tabla `(id UUID, doc JSONB)` dentro del schema
//! configurado (`DB_NAME`). Los filtros usan contención JSONB (`@>`) y las
//! actualizaciones parciales concatenación (`||`).

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::document_store::{
    with_id, Collection, DocumentStore, Filter, StoreError, StoreResult,
};

lazy_static! {
    static ref IDENTIFIER_RE: Regex =
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier regex must compile");
}

/// Valida un nombre de schema antes de interpolarlo en SQL
pub fn validate_schema_name(schema: &str) -> StoreResult<()> {
    if IDENTIFIER_RE.is_match(schema) {
        Ok(())
    } else {
        Err(StoreError::Configuration(format!(
            "'{}' is not a valid database name (letters, digits and '_' only)",
            schema
        )))
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    schema: String,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, schema: &str) -> StoreResult<Self> {
        validate_schema_name(schema)?;
        Ok(Self {
            pool,
            schema: schema.to_string(),
        })
    }

    fn table(&self, collection: Collection) -> String {
        format!("\"{}\".\"{}\"", self.schema, collection.as_str())
    }

    /// Crea schema, tablas e índices si faltan (no hay migraciones)
    pub async fn ensure_collections(&self) -> StoreResult<()> {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", self.schema))
            .execute(&self.pool)
            .await?;

        for collection in Collection::ALL {
            let table = self.table(collection);
            sqlx::query(&format!(
                "CREATE TABLE IF NOT EXISTS {} (id UUID PRIMARY KEY, doc JSONB NOT NULL)",
                table
            ))
            .execute(&self.pool)
            .await?;

            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS \"{}_doc_idx\" ON {} USING GIN (doc jsonb_path_ops)",
                collection.as_str(),
                table
            ))
            .execute(&self.pool)
            .await?;

            debug!("📁 Colección lista: {}", table);
        }

        info!("✅ Colecciones verificadas en schema '{}'", self.schema);
        Ok(())
    }

    pub async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(&self, collection: Collection, doc: Value) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let doc = with_id(doc, id)?;

        sqlx::query(&format!("INSERT INTO {} (id, doc) VALUES ($1, $2)", self.table(collection)))
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;

        Ok(id)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Value>> {
        let doc = sqlx::query_scalar::<_, Json<Value>>(&format!(
            "SELECT doc FROM {} WHERE id = $1",
            self.table(collection)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(doc.map(|Json(doc)| doc))
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let docs = sqlx::query_scalar::<_, Json<Value>>(&format!("SELECT doc FROM {}", self.table(collection)))
            .fetch_all(&self.pool)
            .await?;

        Ok(docs.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn find_where(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Value>> {
        let docs = sqlx::query_scalar::<_, Json<Value>>(&format!(
            "SELECT doc FROM {} WHERE doc @> $1",
            self.table(collection)
        ))
        .bind(Json(Value::Object(filter)))
        .fetch_all(&self.pool)
        .await?;

        Ok(docs.into_iter().map(|Json(doc)| doc).collect())
    }

    async fn replace_one(&self, collection: Collection, id: Uuid, doc: Value) -> StoreResult<bool> {
        let doc = with_id(doc, id)?;

        let result = sqlx::query(&format!("UPDATE {} SET doc = $2 WHERE id = $1", self.table(collection)))
            .bind(id)
            .bind(Json(doc))
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", self.table(collection)))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_fields(&self, collection: Collection, id: Uuid, fields: Map<String, Value>) -> StoreResult<bool> {
        let result = sqlx::query(&format!(
            "UPDATE {} SET doc = doc || $2 WHERE id = $1",
            self.table(collection)
        ))
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
