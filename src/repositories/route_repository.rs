use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{decode, decode_all, encode, fields};
use crate::database::{Collection, DocumentStore};
use crate::models::{PackageAssignment, Route, RouteStatus};
use crate::utils::AppResult;

/// Persistencia de rutas
#[derive(Clone)]
pub struct RouteRepository {
    store: Arc<dyn DocumentStore>,
}

impl RouteRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, mut route: Route) -> AppResult<Route> {
        let now = Utc::now();
        route.created_at = now;
        route.updated_at = now;

        route.id = self.store.insert_one(Collection::Routes, encode(&route)?).await?;
        Ok(route)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Route>> {
        self.store
            .find_by_id(Collection::Routes, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_all(&self) -> AppResult<Vec<Route>> {
        decode_all(self.store.find_all(Collection::Routes).await?)
    }

    /// Rutas de un driver (filtro en el store, no escaneo completo)
    pub async fn find_by_driver(&self, driver_id: Uuid) -> AppResult<Vec<Route>> {
        let filter = fields([("driver_id", Value::String(driver_id.to_string()))]);
        decode_all(self.store.find_where(Collection::Routes, filter).await?)
    }

    pub async fn find_by_driver_and_status(&self, driver_id: Uuid, status: RouteStatus) -> AppResult<Vec<Route>> {
        let filter = fields([
            ("driver_id", Value::String(driver_id.to_string())),
            ("status", encode(&status)?),
        ]);
        decode_all(self.store.find_where(Collection::Routes, filter).await?)
    }

    /// Reemplazo completo del documento. `false` si la ruta no existe.
    pub async fn update(&self, route: &Route) -> AppResult<bool> {
        Ok(self
            .store
            .replace_one(Collection::Routes, route.id, encode(route)?)
            .await?)
    }

    pub async fn update_status(&self, id: Uuid, status: RouteStatus) -> AppResult<bool> {
        let update = fields([("status", encode(&status)?), ("updated_at", encode(&Utc::now())?)]);
        Ok(self.store.set_fields(Collection::Routes, id, update).await?)
    }

    pub async fn update_assignments(&self, id: Uuid, packages: &[PackageAssignment]) -> AppResult<bool> {
        let update = fields([("packages", encode(&packages)?), ("updated_at", encode(&Utc::now())?)]);
        Ok(self.store.set_fields(Collection::Routes, id, update).await?)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.store.delete_one(Collection::Routes, id).await?)
    }
}
