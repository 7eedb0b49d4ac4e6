//! Product API handlers.

use axum::{Json, extract::State, http::StatusCode};
use tienda_core::ProductId;
use tracing::instrument;

use super::{ListingResponse, Notice, PRODUCTS_PATH, Success};
use crate::error::{ApiJson, ApiPath, ApiQuery, Result};
use crate::models::{Product, ProductFields};
use crate::routes::ListingParams;
use crate::state::AppState;

/// List products.
///
/// GET /api/products?limit&page&sort&query
///
/// An empty page is reported as 404.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListingParams>,
) -> Result<Json<ListingResponse>> {
    let query = params.to_query(state.config().default_page_size);
    let listing = state.catalog().list(&query).await?;
    Ok(Json(ListingResponse::new(listing, &query, PRODUCTS_PATH)))
}

/// GET /api/products/{pid}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(pid): ApiPath<String>,
) -> Result<Json<Success<Product>>> {
    let product = state.catalog().get(ProductId::parse(&pid)?).await?;
    Ok(Json(Success::new(product)))
}

/// POST /api/products
#[instrument(skip(state, fields))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> Result<(StatusCode, Json<Success<Product>>)> {
    let product = state.catalog().create(fields).await?;
    Ok((StatusCode::CREATED, Json(Success::new(product))))
}

/// Replace every field of a product.
///
/// PUT /api/products/{pid}
#[instrument(skip(state, fields))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(pid): ApiPath<String>,
    ApiJson(fields): ApiJson<ProductFields>,
) -> Result<Json<Success<Product>>> {
    let product = state
        .catalog()
        .replace(ProductId::parse(&pid)?, fields)
        .await?;
    Ok(Json(Success::new(product)))
}

/// DELETE /api/products/{pid}
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    ApiPath(pid): ApiPath<String>,
) -> Result<Json<Notice>> {
    state.catalog().delete(ProductId::parse(&pid)?).await?;
    Ok(Json(Notice::new("Product deleted")))
}
