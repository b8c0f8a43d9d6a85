// src/handlers/product.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use http::StatusCode;
use tracing::{instrument, Span};
use uuid::Uuid;

use crate::dtos::product::{CreateProductRequest, ProductQuery, ProductResponse, UpdateProductRequest};
use crate::error::AppError;
use crate::models::product::{NewProduct, ProductFilter, ProductPatch};
use crate::state::AppState;

// GET /products - List products, optionally within a price window
#[instrument(skip(state, query))]
pub async fn get_products(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let products = state.products.query(ProductFilter::from(query)).await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/{id} - Get single product
#[instrument(skip(state, id), fields(id = tracing::field::Empty))]
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    Span::current().record("id", tracing::field::display(id));
    let product = state.products.get(id).await?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<CreateProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(payload) = payload?;
    let product = state.products.create(NewProduct::try_from(payload)?).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PATCH /products/{id} - Update supplied fields
#[instrument(skip(state, id, payload), fields(id = tracing::field::Empty))]
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    Span::current().record("id", tracing::field::display(id));
    let Json(payload) = payload?;
    let product = state.products.update(id, ProductPatch::try_from(payload)?).await?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/{id} - Delete product
#[instrument(skip(state, id), fields(id = tracing::field::Empty))]
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    Span::current().record("id", tracing::field::display(id));
    state.products.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
