//! Cart documents and line-item merge rules.
//!
//! A cart holds an ordered list of `(product, quantity)` line items. Items
//! added through [`Cart::merge_item`] stay unique per product: adding a product
//! that is already present accumulates its quantity. [`Cart::replace_items`]
//! stores the caller's list verbatim, duplicates included.

use serde::{Deserialize, Serialize};
use tienda_core::{CartId, Price, ProductId};

use super::{Product, ValidationError};

/// Quantity used when an add-to-cart request does not specify one.
pub const DEFAULT_QUANTITY: i64 = 1;

const fn default_quantity() -> i64 {
    DEFAULT_QUANTITY
}

/// One product reference and its quantity inside a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

impl LineItem {
    #[must_use]
    pub const fn new(product: ProductId, quantity: i64) -> Self {
        Self { product, quantity }
    }
}

/// A shopping cart document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(rename = "_id")]
    pub id: CartId,
    pub products: Vec<LineItem>,
}

impl Cart {
    /// A cart with the given line items.
    #[must_use]
    pub const fn new(id: CartId, products: Vec<LineItem>) -> Self {
        Self { id, products }
    }

    /// Index of the line item referencing `product`.
    #[must_use]
    pub fn position(&self, product: ProductId) -> Option<usize> {
        self.products.iter().position(|item| item.product == product)
    }

    /// Add `quantity` of `product`, accumulating onto an existing line item.
    pub fn merge_item(&mut self, product: ProductId, quantity: i64) {
        match self.products.iter_mut().find(|item| item.product == product) {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => self.products.push(LineItem::new(product, quantity)),
        }
    }

    /// Remove the line item referencing `product`.
    ///
    /// Returns the removed item, or `None` if the product was not in the cart.
    pub fn remove_item(&mut self, product: ProductId) -> Option<LineItem> {
        let index = self.position(product)?;
        Some(self.products.remove(index))
    }

    /// Overwrite the quantity of the line item referencing `product`.
    ///
    /// The value is stored as given. Returns `false` if the product was not
    /// in the cart.
    pub fn set_quantity(&mut self, product: ProductId, quantity: i64) -> bool {
        match self.products.iter_mut().find(|item| item.product == product) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Replace every line item. No deduplication.
    pub fn replace_items(&mut self, items: Vec<LineItem>) {
        self.products = items;
    }

    pub fn clear(&mut self) {
        self.products.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// A line item with its product reference resolved.
///
/// `product` is `None` when the referenced product no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedLineItem {
    pub product: Option<Product>,
    pub quantity: i64,
}

impl ExpandedLineItem {
    /// Line total, or zero if the product is gone.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product
            .as_ref()
            .map_or(Price::ZERO, |p| p.price.times(self.quantity))
    }
}

/// A cart whose line items carry full product records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedCart {
    #[serde(rename = "_id")]
    pub id: CartId,
    pub products: Vec<ExpandedLineItem>,
}

impl ExpandedCart {
    /// Resolve `cart` against `products`, keeping line-item order.
    ///
    /// References with no matching product expand to `None`.
    #[must_use]
    pub fn resolve(cart: Cart, products: &[Product]) -> Self {
        let items = cart
            .products
            .into_iter()
            .map(|item| ExpandedLineItem {
                product: products.iter().find(|p| p.id == item.product).cloned(),
                quantity: item.quantity,
            })
            .collect();

        Self {
            id: cart.id,
            products: items,
        }
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.products.iter().map(ExpandedLineItem::subtotal).sum()
    }
}

/// A requested quantity as it arrives in a request body.
///
/// Accepts a JSON number or a numeric string such as `"3"` and coerces both
/// to an integer before any arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    Text(String),
}

impl QuantityInput {
    /// Coerce to an integer quantity.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidQuantity` if text input is not a
    /// whole number.
    pub fn coerce(&self) -> Result<i64, ValidationError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ValidationError::InvalidQuantity(text.clone())),
        }
    }
}
