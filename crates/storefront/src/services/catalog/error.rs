//! Catalog error types.

use thiserror::Error;

use crate::db::RepositoryError;
use crate::models::ValidationError;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No product has the requested ID.
    #[error("Product not found")]
    ProductNotFound,

    /// The requested listing page holds no products.
    #[error("No products found for the given filter.")]
    EmptyPage,

    /// Product fields failed validation.
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
