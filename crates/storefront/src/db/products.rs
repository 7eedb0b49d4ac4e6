//! `PostgreSQL` product store.

use async_trait::async_trait;
use sqlx::PgPool;
use tienda_core::{PageRequest, ProductId, SortOrder};
use uuid::Uuid;

use super::{ProductFilter, ProductSlice, ProductStore, RepositoryError};
use crate::models::{Product, ProductFields};

const PRODUCT_COLUMNS: &str =
    "id, name, price, category, available, stock, description, thumbnails";

/// `ORDER BY` clause for a sort order. `seq` preserves insertion order.
const fn order_clause(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::None => "seq ASC",
        SortOrder::Asc => "price ASC, seq ASC",
        SortOrder::Desc => "price DESC, seq ASC",
    }
}

/// Product store backed by the `shop.product` table.
#[derive(Clone)]
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    /// Create a new product store.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
        sort: SortOrder,
    ) -> Result<ProductSlice, RepositoryError> {
        let category = filter.category.as_deref();

        let total: i64 = sqlx::query_scalar(
            r"
            SELECT COUNT(*)
            FROM shop.product
            WHERE ($1::text IS NULL OR category = $1)
            ",
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await?;

        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM shop.product \
             WHERE ($1::text IS NULL OR category = $1) \
             ORDER BY {} LIMIT $2 OFFSET $3",
            order_clause(sort)
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(category)
            .bind(i64::from(page.limit()))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        Ok(ProductSlice {
            products,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = $1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let ids: Vec<Uuid> = ids.iter().map(ProductId::as_uuid).collect();
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM shop.product WHERE id = ANY($1)");
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(ids)
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        let sql = format!(
            "INSERT INTO shop.product \
             (id, name, price, category, available, stock, description, thumbnails) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(ProductId::generate())
            .bind(&fields.name)
            .bind(fields.price)
            .bind(&fields.category)
            .bind(fields.available)
            .bind(fields.stock)
            .bind(&fields.description)
            .bind(&fields.thumbnails)
            .fetch_one(&self.pool)
            .await?;
        Ok(product)
    }

    async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "UPDATE shop.product \
             SET name = $2, price = $3, category = $4, available = $5, \
                 stock = $6, description = $7, thumbnails = $8, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(&fields.category)
            .bind(fields.available)
            .bind(fields.stock)
            .bind(&fields.description)
            .bind(&fields.thumbnails)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shop.product
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_clause_breaks_ties_by_insertion() {
        assert_eq!(order_clause(SortOrder::None), "seq ASC");
        assert!(order_clause(SortOrder::Asc).ends_with("seq ASC"));
        assert!(order_clause(SortOrder::Desc).starts_with("price DESC"));
    }
}
