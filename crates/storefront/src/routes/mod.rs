//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Views
//! GET    /products                         - Product listing
//! GET    /products/{pid}                   - Product detail (creates a fresh cart)
//! GET    /carts/{cid}                      - Cart contents
//!
//! # JSON API
//! GET    /api/products                     - Paginated product listing
//! POST   /api/products                     - Create product
//! GET    /api/products/{pid}               - Product detail
//! PUT    /api/products/{pid}               - Replace product
//! DELETE /api/products/{pid}               - Delete product
//!
//! POST   /api/carts                        - Create empty cart
//! GET    /api/carts/{cid}                  - Cart with expanded products
//! PUT    /api/carts/{cid}                  - Replace every line item
//! DELETE /api/carts/{cid}                  - Remove every line item
//! POST   /api/carts/{cid}/products/{pid}   - Add product (`cid` may be `new`)
//! PUT    /api/carts/{cid}/products/{pid}   - Set line item quantity
//! DELETE /api/carts/{cid}/products/{pid}   - Remove line item
//! ```

pub mod api;
pub mod carts;
pub mod error_page;
pub mod products;

use axum::{Router, routing::get};
use serde::Deserialize;

use crate::services::ListingQuery;
use crate::state::AppState;

/// Raw product listing parameters shared by the API and the views.
///
/// Numbers arrive as text so that malformed values fall back to defaults
/// instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListingParams {
    pub limit: Option<String>,
    pub page: Option<String>,
    pub sort: Option<String>,
    /// Category filter.
    pub query: Option<String>,
}

impl ListingParams {
    /// Interpret the parameters. Values below 1 are clamped to 1.
    #[must_use]
    pub fn to_query(&self, default_limit: u32) -> ListingQuery {
        ListingQuery::from_params(
            self.query.clone(),
            self.sort.as_deref(),
            parse_positive(self.page.as_deref()),
            parse_positive(self.limit.as_deref()),
            default_limit,
        )
    }
}

fn parse_positive(value: Option<&str>) -> Option<u32> {
    let n = value?.trim().parse::<i64>().ok()?;
    Some(u32::try_from(n.max(1)).unwrap_or(u32::MAX))
}

/// Create the view routes router.
pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{pid}", get(products::show))
        .route("/carts/{cid}", get(carts::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(view_routes())
        .nest("/api", api::routes())
}
