use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{decode, decode_all, encode};
use crate::database::{Collection, DocumentStore};
use crate::models::Driver;
use crate::utils::AppResult;

/// Persistencia de drivers
#[derive(Clone)]
pub struct DriverRepository {
    store: Arc<dyn DocumentStore>,
}

impl DriverRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Inserta el driver, fija timestamps y devuelve el registro con su id
    pub async fn create(&self, mut driver: Driver) -> AppResult<Driver> {
        let now = Utc::now();
        driver.created_at = now;
        driver.updated_at = now;

        driver.id = self.store.insert_one(Collection::Drivers, encode(&driver)?).await?;
        Ok(driver)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Driver>> {
        self.store
            .find_by_id(Collection::Drivers, id)
            .await?
            .map(decode)
            .transpose()
    }

    pub async fn find_all(&self) -> AppResult<Vec<Driver>> {
        decode_all(self.store.find_all(Collection::Drivers).await?)
    }

    /// Reemplaza el documento. `false` si el driver no existe.
    pub async fn update(&self, driver: &Driver) -> AppResult<bool> {
        Ok(self
            .store
            .replace_one(Collection::Drivers, driver.id, encode(driver)?)
            .await?)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.store.delete_one(Collection::Drivers, id).await?)
    }
}
