use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use super::{ProductStore, StoreError};
use crate::models::product::{Product, ProductFilter, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, quantity, price, status, created_at, updated_at";

#[derive(Debug, Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn insert(&self, product: Product) -> Result<Product, StoreError> {
        sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (id, name, quantity, price, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.id)
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.price)
        .bind(product.status)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Into::into)
    }

    #[instrument(skip(self))]
    async fn find_one(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, filter: ProductFilter) -> Result<Vec<Product>, StoreError> {
        match sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products
             WHERE ($1::NUMERIC IS NULL OR price > $1)
               AND ($2::NUMERIC IS NULL OR price < $2)
             ORDER BY created_at, id"
        ))
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&self.pool)
        .await
        {
            Ok(products) => Ok(products),
            Err(e) => {
                error!(?e, "Failed to fetch products");
                Err(e.into())
            }
        }
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: Uuid,
        patch: ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Product>, StoreError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
             name = COALESCE($2, name),
             quantity = COALESCE($3, quantity),
             price = COALESCE($4, price),
             status = COALESCE($5, status),
             updated_at = GREATEST($6, updated_at + INTERVAL '1 microsecond')
             WHERE id = $1
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.name)
        .bind(patch.quantity)
        .bind(patch.price)
        .bind(patch.status)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
