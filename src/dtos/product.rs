// src/dtos/product.rs
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::product::{NewProduct, Product, ProductFilter, ProductPatch};

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub quantity: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    pub status: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub quantity: Option<i64>,
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub price: Option<Decimal>,
    pub status: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub quantity: i32,
    pub price: Decimal,
    pub status: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            quantity: product.quantity,
            price: product.price,
            status: product.status,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl TryFrom<CreateProductRequest> for NewProduct {
    type Error = AppError;

    fn try_from(req: CreateProductRequest) -> Result<Self, Self::Error> {
        Ok(NewProduct {
            name: validate_name(req.name)?,
            quantity: validate_quantity(req.quantity)?,
            price: validate_price(req.price)?,
            status: req.status,
        })
    }
}

impl TryFrom<UpdateProductRequest> for ProductPatch {
    type Error = AppError;

    fn try_from(req: UpdateProductRequest) -> Result<Self, Self::Error> {
        Ok(ProductPatch {
            name: req.name.map(validate_name).transpose()?,
            quantity: req.quantity.map(validate_quantity).transpose()?,
            price: req.price.map(validate_price).transpose()?,
            status: req.status,
        })
    }
}

impl From<ProductQuery> for ProductFilter {
    fn from(query: ProductQuery) -> Self {
        ProductFilter {
            min_price: query.min_price,
            max_price: query.max_price,
        }
    }
}

fn validate_name(name: String) -> Result<String, AppError> {
    if name.trim().is_empty() {
        return Err(AppError::validation("Product name is required"));
    }
    Ok(name)
}

fn validate_quantity(quantity: i64) -> Result<i32, AppError> {
    if quantity < 0 {
        return Err(AppError::validation("Quantity cannot be negative"));
    }
    i32::try_from(quantity).map_err(|_| AppError::validation("Quantity is too large"))
}

// Postgres has no negative zero, so "-0.00" is stored as "0.00" everywhere.
fn validate_price(price: Decimal) -> Result<Decimal, AppError> {
    if price.is_zero() {
        return Ok(price.abs());
    }
    if price.is_sign_negative() {
        return Err(AppError::validation("Price cannot be negative"));
    }
    Ok(price)
}
