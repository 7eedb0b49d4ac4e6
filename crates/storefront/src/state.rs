//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::db::{CartStore, MemoryStore, PgCartStore, PgProductStore, ProductStore};
use crate::services::{CartService, CatalogService};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the stores and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: Arc<dyn ProductStore>,
    carts: Arc<dyn CartStore>,
    /// Present only on the `PostgreSQL` backend.
    pool: Option<PgPool>,
}

impl AppState {
    /// Create a new application state from explicit stores.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        products: Arc<dyn ProductStore>,
        carts: Arc<dyn CartStore>,
        pool: Option<PgPool>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products,
                carts,
                pool,
            }),
        }
    }

    /// State backed by `PostgreSQL`.
    #[must_use]
    pub fn postgres(config: StorefrontConfig, pool: PgPool) -> Self {
        Self::new(
            config,
            Arc::new(PgProductStore::new(pool.clone())),
            Arc::new(PgCartStore::new(pool.clone())),
            Some(pool),
        )
    }

    /// State backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory(config: StorefrontConfig) -> Self {
        let store = MemoryStore::new();
        Self::new(config, Arc::new(store.clone()), Arc::new(store), None)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the database connection pool, if the backend has one.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.inner.pool.as_ref()
    }

    /// Catalog operations over the product store.
    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.inner.products.as_ref())
    }

    /// Cart operations over the cart and product stores.
    #[must_use]
    pub fn carts(&self) -> CartService<'_> {
        CartService::new(self.inner.products.as_ref(), self.inner.carts.as_ref())
    }
}
