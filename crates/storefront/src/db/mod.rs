//! Storage for products and carts.
//!
//! # Backends
//!
//! - [`PgProductStore`] / [`PgCartStore`] - `PostgreSQL` via a shared `PgPool`
//! - [`MemoryStore`] - in-process collections for development and tests
//!
//! ## Tables (`shop` schema)
//!
//! - `product` - one row per product
//! - `cart` - one row per cart; `products` is a JSONB array of line items so
//!   a cart is read and written as a single document
//!
//! # Consistency
//!
//! Stores offer single-document reads and writes only. Cart mutations are a
//! read followed by a full write with no isolation between them, so two
//! concurrent writers to the same cart can lose an update.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p tienda-cli -- migrate
//! ```

pub mod carts;
pub mod memory;
pub mod products;

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tienda_core::{CartId, PageRequest, ProductId, SortOrder};

use crate::models::{Cart, ExpandedCart, LineItem, Product, ProductFields};

pub use carts::PgCartStore;
pub use memory::MemoryStore;
pub use products::PgProductStore;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// The backing store cannot serve requests.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Product listing filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Exact category match; `None` matches everything.
    pub category: Option<String>,
}

impl ProductFilter {
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
    }
}

/// One page of products plus the total number of matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSlice {
    pub products: Vec<Product>,
    pub total: u64,
}

/// Product persistence.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch one page of matching products in the requested order.
    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
        sort: SortOrder,
    ) -> Result<ProductSlice, RepositoryError>;

    /// Fetch a product by ID.
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    /// Fetch every product whose ID is in `ids`. Unknown IDs are skipped.
    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError>;

    /// Insert a product under a freshly generated ID.
    async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError>;

    /// Replace every field of an existing product.
    ///
    /// Returns `None` if no product has this ID.
    async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError>;

    /// Delete a product. Returns `true` if it existed.
    ///
    /// Carts referencing the product are left untouched.
    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError>;
}

/// Cart persistence.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Insert a cart holding `items` under a freshly generated ID.
    async fn create(&self, items: Vec<LineItem>) -> Result<Cart, RepositoryError>;

    /// Fetch a cart by ID.
    async fn get(&self, id: CartId) -> Result<Option<Cart>, RepositoryError>;

    /// Persist the full line-item list of `cart`.
    ///
    /// Returns `RepositoryError::NotFound` if the cart no longer exists.
    async fn replace(&self, cart: &Cart) -> Result<(), RepositoryError>;

    /// Delete carts with no line items created before `created_before`.
    ///
    /// Returns the number of carts removed.
    async fn prune_empty(&self, created_before: DateTime<Utc>) -> Result<u64, RepositoryError>;
}

/// Resolve every product reference in `cart` to its current product record.
///
/// # Errors
///
/// Returns `RepositoryError` if the product lookup fails.
pub async fn expand_cart(
    products: &dyn ProductStore,
    cart: Cart,
) -> Result<ExpandedCart, RepositoryError> {
    let ids = referenced_products(&cart);
    let found = if ids.is_empty() {
        Vec::new()
    } else {
        products.get_many(&ids).await?
    };
    Ok(ExpandedCart::resolve(cart, &found))
}

/// Distinct product IDs referenced by `cart`, in first-seen order.
fn referenced_products(cart: &Cart) -> Vec<ProductId> {
    let mut seen = HashSet::new();
    cart.products
        .iter()
        .map(|item| item.product)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
