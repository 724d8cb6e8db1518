//! Document store en memoria
//!
//! Se selecciona con `DATABASE_URL=memory://`. Útil en tests y en local.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::document_store::{
    matches_filter, with_id, Collection, DocumentStore, Filter, StoreResult,
};

#[derive(Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, HashMap<Uuid, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de documentos de una colección
    pub async fn count(&self, collection: Collection) -> usize {
        let collections = self.collections.read().await;
        collections.get(&collection).map_or(0, |docs| docs.len())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn insert_one(&self, collection: Collection, doc: Value) -> StoreResult<Uuid> {
        let id = Uuid::new_v4();
        let doc = with_id(doc, id)?;

        let mut collections = self.collections.write().await;
        collections.entry(collection).or_default().insert(id, doc);
        Ok(id)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn find_all(&self, collection: Collection) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_where(&self, collection: Collection, filter: Filter) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&collection)
            .map(|docs| {
                docs.values()
                    .filter(|doc| matches_filter(doc, &filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn replace_one(&self, collection: Collection, id: Uuid, doc: Value) -> StoreResult<bool> {
        let doc = with_id(doc, id)?;

        let mut collections = self.collections.write().await;
        match collections.get_mut(&collection).and_then(|docs| docs.get_mut(&id)) {
            Some(existing) => {
                *existing = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_one(&self, collection: Collection, id: Uuid) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&collection)
            .and_then(|docs| docs.remove(&id))
            .is_some())
    }

    async fn set_fields(&self, collection: Collection, id: Uuid, fields: Map<String, Value>) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(object) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.get_mut(&id))
            .and_then(Value::as_object_mut)
        else {
            return Ok(false);
        };

        object.extend(fields);
        Ok(true)
    }
}
