//! Domain models for the storefront.
//!
//! Products are stored as individual records; carts are single documents
//! holding an ordered list of line items that reference products by ID.

pub mod cart;
pub mod product;

use thiserror::Error;

pub use cart::{
    Cart, DEFAULT_QUANTITY, ExpandedCart, ExpandedLineItem, LineItem, QuantityInput,
};
pub use product::{Product, ProductFields};

/// Malformed input rejected before it reaches a store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required text field was missing or blank.
    #[error("{0} is required")]
    Required(&'static str),

    /// A quantity could not be read as a whole number.
    #[error("quantity must be a whole number (got {0:?})")]
    InvalidQuantity(String),
}
