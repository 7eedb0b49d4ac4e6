//! Cart API handlers.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use serde::Deserialize;
use tienda_core::{CartId, ProductId};
use tracing::instrument;

use super::{CartNotice, Notice, Success};
use crate::error::{ApiJson, ApiPath, AppError, Result};
use crate::models::{Cart, DEFAULT_QUANTITY, ExpandedCart, LineItem, QuantityInput};
use crate::services::CartTarget;
use crate::state::AppState;

/// Body of an add-to-cart request. The body itself is optional.
#[derive(Debug, Default, Deserialize)]
pub struct AddItemBody {
    pub quantity: Option<QuantityInput>,
}

impl AddItemBody {
    /// Parse a raw body. An empty body means the default quantity.
    fn parse(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body).map_err(|e| AppError::BadRequest(e.to_string()))
    }

    fn quantity(&self) -> Result<i64> {
        self.quantity.as_ref().map_or(Ok(DEFAULT_QUANTITY), |q| {
            q.coerce().map_err(|e| AppError::BadRequest(e.to_string()))
        })
    }
}

/// Body of a bulk line-item replacement.
#[derive(Debug, Deserialize)]
pub struct ReplaceBody {
    pub products: Vec<LineItem>,
}

/// Body of a quantity update. The value is stored as given.
#[derive(Debug, Deserialize)]
pub struct QuantityBody {
    pub quantity: i64,
}

/// POST /api/carts
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> Result<(StatusCode, Json<Success<Cart>>)> {
    let cart = state.carts().create().await?;
    Ok((StatusCode::CREATED, Json(Success::new(cart))))
}

/// Cart with every product reference expanded.
///
/// GET /api/carts/{cid}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ApiPath(cid): ApiPath<String>,
) -> Result<Json<Success<ExpandedCart>>> {
    let cart = state.carts().get_expanded(CartId::parse(&cid)?).await?;
    Ok(Json(Success::new(cart)))
}

/// Add a product to a cart, or to a new cart when `cid` is `new`.
///
/// POST /api/carts/{cid}/products/{pid}
#[instrument(skip(state, body))]
pub async fn add_item(
    State(state): State<AppState>,
    ApiPath((cid, pid)): ApiPath<(String, String)>,
    body: Bytes,
) -> Result<Json<CartNotice>> {
    let target = CartTarget::parse(&cid)?;
    let product = ProductId::parse(&pid)?;
    let quantity = AddItemBody::parse(&body)?.quantity()?;

    let cart = state.carts().add_item(target, product, quantity).await?;
    Ok(Json(CartNotice::new("Product added to cart", cart)))
}

/// DELETE /api/carts/{cid}/products/{pid}
#[instrument(skip(state))]
pub async fn remove_item(
    State(state): State<AppState>,
    ApiPath((cid, pid)): ApiPath<(String, String)>,
) -> Result<Json<Notice>> {
    state
        .carts()
        .remove_item(CartId::parse(&cid)?, ProductId::parse(&pid)?)
        .await?;
    Ok(Json(Notice::new("Product removed from cart")))
}

/// Overwrite every line item, duplicates included.
///
/// PUT /api/carts/{cid}
#[instrument(skip(state, body))]
pub async fn replace(
    State(state): State<AppState>,
    ApiPath(cid): ApiPath<String>,
    ApiJson(body): ApiJson<ReplaceBody>,
) -> Result<Json<Success<Cart>>> {
    let cart = state
        .carts()
        .replace_items(CartId::parse(&cid)?, body.products)
        .await?;
    Ok(Json(Success::new(cart)))
}

/// PUT /api/carts/{cid}/products/{pid}
#[instrument(skip(state))]
pub async fn set_quantity(
    State(state): State<AppState>,
    ApiPath((cid, pid)): ApiPath<(String, String)>,
    ApiJson(body): ApiJson<QuantityBody>,
) -> Result<Json<Success<Cart>>> {
    let cart = state
        .carts()
        .set_item_quantity(CartId::parse(&cid)?, ProductId::parse(&pid)?, body.quantity)
        .await?;
    Ok(Json(Success::new(cart)))
}

/// Remove every line item. The cart itself is kept.
///
/// DELETE /api/carts/{cid}
#[instrument(skip(state))]
pub async fn clear(
    State(state): State<AppState>,
    ApiPath(cid): ApiPath<String>,
) -> Result<Json<Notice>> {
    state.carts().clear(CartId::parse(&cid)?).await?;
    Ok(Json(Notice::new("All products removed from cart")))
}
