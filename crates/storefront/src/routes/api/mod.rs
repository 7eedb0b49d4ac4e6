//! JSON API routes.
//!
//! Every response is an envelope: `{"status": "success", "payload": ...}`,
//! `{"status": "success", "message": ...}` or, for failures,
//! `{"status": "error", "message": ...}` (see [`crate::error::AppError`]).

pub mod carts;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};
use serde::Serialize;

use crate::models::{Cart, Product};
use crate::services::{ListingQuery, ProductListing};
use crate::state::AppState;

const SUCCESS: &str = "success";

/// Mount point of the product listing, used for pagination links.
pub const PRODUCTS_PATH: &str = "/api/products";

/// `{"status": "success", "payload": ...}`
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub status: &'static str,
    pub payload: T,
}

impl<T> Success<T> {
    pub const fn new(payload: T) -> Self {
        Self {
            status: SUCCESS,
            payload,
        }
    }
}

/// `{"status": "success", "message": ...}`
#[derive(Debug, Serialize)]
pub struct Notice {
    pub status: &'static str,
    pub message: &'static str,
}

impl Notice {
    pub const fn new(message: &'static str) -> Self {
        Self {
            status: SUCCESS,
            message,
        }
    }
}

/// A notice carrying the updated cart.
#[derive(Debug, Serialize)]
pub struct CartNotice {
    pub status: &'static str,
    pub message: &'static str,
    pub cart: Cart,
}

impl CartNotice {
    pub const fn new(message: &'static str, cart: Cart) -> Self {
        Self {
            status: SUCCESS,
            message,
            cart,
        }
    }
}

/// A page of products with pagination metadata and navigation links.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResponse {
    pub status: &'static str,
    pub payload: Vec<Product>,
    pub total_pages: u32,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
    pub page: u32,
    pub has_prev_page: bool,
    pub has_next_page: bool,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

impl ListingResponse {
    #[must_use]
    pub fn new(listing: ProductListing, query: &ListingQuery, base: &str) -> Self {
        let info = listing.info;
        Self {
            status: SUCCESS,
            payload: listing.products,
            total_pages: info.total_pages,
            prev_page: info.prev_page,
            next_page: info.next_page,
            page: info.page,
            has_prev_page: info.has_prev_page(),
            has_next_page: info.has_next_page(),
            prev_link: info.prev_page.map(|page| query.link(base, page)),
            next_link: info.next_page.map(|page| query.link(base, page)),
        }
    }
}

/// Create the JSON API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route(
            "/products/{pid}",
            get(products::show)
                .put(products::update)
                .delete(products::destroy),
        )
        .route("/carts", post(carts::create))
        .route(
            "/carts/{cid}",
            get(carts::show).put(carts::replace).delete(carts::clear),
        )
        .route(
            "/carts/{cid}/products/{pid}",
            post(carts::add_item)
                .put(carts::set_quantity)
                .delete(carts::remove_item),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tienda_core::{PageInfo, PageRequest};

    use super::*;

    #[test]
    fn test_listing_response_shape() {
        let query = ListingQuery::from_params(Some("x".to_string()), Some("asc"), Some(2), Some(1), 10);
        let listing = ProductListing {
            products: Vec::new(),
            info: PageInfo::new(query.page, 3),
        };
        let json = serde_json::to_value(ListingResponse::new(listing, &query, PRODUCTS_PATH)).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["page"], 2);
        assert_eq!(json["prevPage"], 1);
        assert_eq!(json["nextPage"], 3);
        assert_eq!(json["hasPrevPage"], true);
        assert_eq!(json["hasNextPage"], true);
        assert_eq!(
            json["prevLink"],
            "/api/products?limit=1&page=1&sort=asc&query=x"
        );
    }

    #[test]
    fn test_links_are_null_at_the_edges() {
        let query = ListingQuery::from_params(None, None, None, None, 10);
        let listing = ProductListing {
            products: Vec::new(),
            info: PageInfo::new(PageRequest::default(), 4),
        };
        let json = serde_json::to_value(ListingResponse::new(listing, &query, PRODUCTS_PATH)).unwrap();
        assert!(json["prevLink"].is_null());
        assert!(json["nextLink"].is_null());
        assert!(json["prevPage"].is_null());
        assert_eq!(json["hasNextPage"], false);
    }
}
