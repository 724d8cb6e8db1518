use std::sync::Arc;

use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use super::{decode, decode_all, encode, fields};
use crate::database::{Collection, DocumentStore};
use crate::models::{Package, PackageStatus};
use crate::utils::AppResult;

/// Persistencia de paquetes
#[derive(Clone)]
pub struct PackageRepository {
    store: Arc<dyn DocumentStore>,
}

impl PackageRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, mut package: Package) -> AppResult<Package> {
        let now = Utc::now();
        package.created_at = now;
        package.updated_at = now;

        package.id = self.store.insert_one(Collection::Packages, encode(&package)?).await?;
        Ok(package)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Package>> {
        self.store
            .find_by_id(Collection::Packages, id)
            .await?
            .map(decode)
            .transpose()
    }

    /// Primer paquete con ese número de seguimiento (no se garantiza unicidad)
    pub async fn find_by_tracking_number(&self, tracking_number: &str) -> AppResult<Option<Package>> {
        let filter = fields([("tracking_number", Value::String(tracking_number.to_string()))]);
        let docs = self.store.find_where(Collection::Packages, filter).await?;
        docs.into_iter().next().map(decode).transpose()
    }

    pub async fn find_all(&self) -> AppResult<Vec<Package>> {
        decode_all(self.store.find_all(Collection::Packages).await?)
    }

    pub async fn update(&self, package: &Package) -> AppResult<bool> {
        Ok(self
            .store
            .replace_one(Collection::Packages, package.id, encode(package)?)
            .await?)
    }

    /// Actualización parcial de `status` + `updated_at`. `false` si no existe.
    pub async fn update_status(&self, id: Uuid, status: PackageStatus) -> AppResult<bool> {
        let update = fields([("status", encode(&status)?), ("updated_at", encode(&Utc::now())?)]);
        Ok(self.store.set_fields(Collection::Packages, id, update).await?)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.store.delete_one(Collection::Packages, id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryDocumentStore;
    use crate::models::PackageDetails;

    fn details(tracking_number: &str) -> PackageDetails {
        PackageDetails {
            tracking_number: tracking_number.to_string(),
            customer_name: "Carol".to_string(),
            customer_address: "1 Main St".to_string(),
            customer_phone: "555-0100".to_string(),
            weight_kg: 2.0,
            volume_m3: 0.1,
        }
    }

    #[tokio::test]
    async fn test_find_by_tracking_number() {
        let repo = PackageRepository::new(Arc::new(MemoryDocumentStore::new()));
        let created = repo.create(Package::new(details("T1"))).await.unwrap();
        repo.create(Package::new(details("T2"))).await.unwrap();

        let found = repo.find_by_tracking_number("T1").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(repo.find_by_tracking_number("T9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_status_is_partial() {
        let repo = PackageRepository::new(Arc::new(MemoryDocumentStore::new()));
        let created = repo.create(Package::new(details("T1"))).await.unwrap();

        assert!(repo.update_status(created.id, PackageStatus::Assigned).await.unwrap());
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.status, PackageStatus::Assigned);
        assert_eq!(found.tracking_number, "T1");
        assert!(!found.delivered);

        assert!(!repo.update_status(Uuid::new_v4(), PackageStatus::Assigned).await.unwrap());
    }
}
