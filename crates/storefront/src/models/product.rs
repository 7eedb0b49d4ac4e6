//! Product records.

use serde::{Deserialize, Serialize};
use tienda_core::{Price, ProductId};

use super::ValidationError;

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Exact-match filter key for listings.
    pub category: String,
    pub available: bool,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

/// Caller-supplied product fields for create and replace.
///
/// Omitted optional fields take their defaults: available, zero stock,
/// no description, no thumbnails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub price: Price,
    pub category: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<String>,
}

const fn default_available() -> bool {
    true
}

impl ProductFields {
    /// Minimal fields with every optional field at its default.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Price, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            price,
            category: category.into(),
            available: default_available(),
            stock: 0,
            description: None,
            thumbnails: Vec::new(),
        }
    }

    /// Check required-field presence.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` if `name` or `category` is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("name"));
        }
        if self.category.trim().is_empty() {
            return Err(ValidationError::Required("category"));
        }
        Ok(())
    }

    /// Materialize a product under `id`.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            available: self.available,
            stock: self.stock,
            description: self.description,
            thumbnails: self.thumbnails,
        }
    }
}
