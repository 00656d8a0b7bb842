use crate::db::CatalogStorage;
use crate::error::PortalError;
use crate::types::catalog::{CarEntry, CarsResponse};

#[derive(Clone)]
pub struct CatalogService {
    storage: CatalogStorage,
}

impl CatalogService {
    pub fn new(storage: CatalogStorage) -> Self {
        Self { storage }
    }

    /// All models with their make, seeding the catalog on first use.
    pub async fn list_cars(&self) -> Result<CarsResponse, PortalError> {
        self.storage.populate_if_empty().await?;
        let car_models = self
            .storage
            .list_models_with_make()
            .await?
            .into_iter()
            .map(CarEntry::from)
            .collect();
        Ok(CarsResponse { car_models })
    }
}
