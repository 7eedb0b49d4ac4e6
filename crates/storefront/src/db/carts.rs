//! `PostgreSQL` cart store.
//!
//! Line items live in a JSONB array on the cart row, so every write replaces
//! the whole list.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::types::Json;
use tienda_core::CartId;

use super::{CartStore, RepositoryError};
use crate::models::{Cart, LineItem};

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartId,
    products: Json<Vec<LineItem>>,
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Self::new(row.id, row.products.0)
    }
}

/// Cart store backed by the `shop.cart` table.
#[derive(Clone)]
pub struct PgCartStore {
    pool: PgPool,
}

impl PgCartStore {
    /// Create a new cart store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CartStore for PgCartStore {
    async fn create(&self, items: Vec<LineItem>) -> Result<Cart, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            INSERT INTO shop.cart (id, products)
            VALUES ($1, $2)
            RETURNING id, products
            ",
        )
        .bind(CartId::generate())
        .bind(Json(&items))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let row = sqlx::query_as::<_, CartRow>(
            r"
            SELECT id, products
            FROM shop.cart
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Cart::from))
    }

    async fn replace(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE shop.cart
            SET products = $2, updated_at = now()
            WHERE id = $1
            ",
        )
        .bind(cart.id)
        .bind(Json(&cart.products))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn prune_empty(&self, created_before: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.cart
            WHERE products = '[]'::jsonb AND created_at < $1
            ",
        )
        .bind(created_before)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }
}
