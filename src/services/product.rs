use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use thiserror::Error;
use tracing::{error, info, instrument};
use uuid::Uuid;

use crate::models::product::{NewProduct, Product, ProductFilter, ProductPatch};
use crate::store::{ProductStore, StoreError};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with filter: {0}")]
    NotFound(Uuid),

    #[error("Product insertion failed")]
    InsertionFailure(#[source] StoreError),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// Product use cases. Each operation makes a single call to the store.
#[derive(Clone)]
pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewProduct) -> Result<Product, ProductError> {
        let now = now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            quantity: input.quantity,
            price: input.price,
            status: input.status,
            created_at: now,
            updated_at: now,
        };

        let created = self.store.insert(product).await.map_err(|e| {
            error!(error = %e, "Product insertion failed");
            ProductError::InsertionFailure(e)
        })?;

        info!(id = %created.id, "Product created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> Result<Product, ProductError> {
        self.store
            .find_one(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn query(&self, filter: ProductFilter) -> Result<Vec<Product>, ProductError> {
        Ok(self.store.find_many(filter).await?)
    }

    /// Applies `patch` and always refreshes `updated_at`, even for an empty patch.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: Uuid, patch: ProductPatch) -> Result<Product, ProductError> {
        let updated = self
            .store
            .update(id, patch, now())
            .await?
            .ok_or(ProductError::NotFound(id))?;

        info!(%id, "Product updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ProductError> {
        if !self.store.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        info!(%id, "Product deleted");
        Ok(())
    }
}

// Postgres keeps microseconds; truncating here keeps both stores in agreement.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}
