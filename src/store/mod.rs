//! Persistence for product records.
//!
//! Every backend honours the same contract: absence is reported as `None` or
//! `false`, never as an error, and a single record's write is atomic.

mod memory;
mod postgres;

pub use memory::MemoryProductStore;
pub use postgres::PgProductStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use uuid::Uuid;

use crate::models::product::{Product, ProductFilter, ProductPatch};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("storage backend error: {0}")]
    Backend(String),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, product: Product) -> Result<Product, StoreError>;

    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    /// Records matching `filter`, oldest first.
    async fn find_many(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Applies `patch` and moves `updated_at` to `updated_at`, or one microsecond
    /// past the stored value when the clock has not advanced.
    async fn update(
        &self,
        id: Uuid,
        patch: ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
