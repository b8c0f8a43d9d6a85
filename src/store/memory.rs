use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ProductStore, StoreError};
use crate::models::product::{Product, ProductFilter, ProductPatch};

/// Process-local store. Records are kept in insertion order.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    products: RwLock<Vec<Product>>,
}

impl MemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut products = self.products.write().await;

        if products.iter().any(|p| p.id == product.id) {
            return Err(StoreError::Backend(format!(
                "duplicate product id {}",
                product.id
            )));
        }

        products.push(product.clone());
        Ok(product)
    }

    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_many(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError> {
        let products = self.products.read().await;
        Ok(products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: Uuid,
        patch: ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError> {
        let mut products = self.products.write().await;

        let Some(product) = products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };

        patch.apply(product);
        product.updated_at = updated_at.max(product.updated_at + Duration::microseconds(1));

        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut products = self.products.write().await;
        let before = products.len();
        products.retain(|p| p.id != id);
        Ok(products.len() != before)
    }
}
