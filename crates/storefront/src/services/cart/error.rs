//! Cart error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during cart operations.
///
/// A missing cart and a product missing from an existing cart are distinct.
#[derive(Debug, Error)]
pub enum CartError {
    /// No cart has the requested ID.
    #[error("Cart not found")]
    CartNotFound,

    /// No product has the requested ID.
    #[error("Product not found")]
    ProductNotFound,

    /// The cart exists but has no line item for the product.
    #[error("Product not found in cart")]
    NotInCart,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
