//! Cart service.
//!
//! Every mutation loads the cart, edits it in memory, then writes the whole
//! line-item list back. Nothing isolates the read from the write, so two
//! concurrent requests against one cart can lose an update.

mod error;

pub use error::CartError;

use std::fmt;
use std::str::FromStr;

use tienda_core::{CartId, IdError, ProductId};

use crate::db::{CartStore, ProductStore, RepositoryError, expand_cart};
use crate::models::{Cart, ExpandedCart, LineItem};

/// Path segment that asks `add_item` for a brand-new cart.
pub const NEW_CART: &str = "new";

/// Destination of an add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartTarget {
    /// Create a fresh cart holding only the added item.
    New,
    Existing(CartId),
}

impl CartTarget {
    /// Parse a path segment: `new` or a cart ID.
    ///
    /// # Errors
    ///
    /// Returns `IdError` if the segment is neither.
    pub fn parse(segment: &str) -> Result<Self, IdError> {
        if segment.trim() == NEW_CART {
            return Ok(Self::New);
        }
        CartId::parse(segment).map(Self::Existing)
    }
}

impl FromStr for CartTarget {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for CartTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => f.write_str(NEW_CART),
            Self::Existing(id) => fmt::Display::fmt(id, f),
        }
    }
}

impl From<CartId> for CartTarget {
    fn from(id: CartId) -> Self {
        Self::Existing(id)
    }
}

/// Cart service.
pub struct CartService<'a> {
    products: &'a dyn ProductStore,
    carts: &'a dyn CartStore,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore, carts: &'a dyn CartStore) -> Self {
        Self { products, carts }
    }

    /// Create an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` if the store fails.
    pub async fn create(&self) -> Result<Cart, CartError> {
        let cart = self.carts.create(Vec::new()).await?;
        tracing::debug!(cart_id = %cart.id, "Cart created");
        Ok(cart)
    }

    /// Get a cart with raw product references.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if no cart has this ID.
    pub async fn get(&self, id: CartId) -> Result<Cart, CartError> {
        self.carts.get(id).await?.ok_or(CartError::CartNotFound)
    }

    /// Get a cart with every product reference resolved.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if no cart has this ID.
    pub async fn get_expanded(&self, id: CartId) -> Result<ExpandedCart, CartError> {
        let cart = self.get(id).await?;
        Ok(expand_cart(self.products, cart).await?)
    }

    /// Add `quantity` of `product` to a cart.
    ///
    /// The product must exist before the cart is touched. `CartTarget::New`
    /// creates a cart holding just this item. Otherwise a line item for the
    /// same product accumulates the quantity and a new product is appended.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product does not exist.
    /// Returns `CartError::CartNotFound` if the target cart does not exist.
    pub async fn add_item(
        &self,
        target: CartTarget,
        product: ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        if self.products.get(product).await?.is_none() {
            return Err(CartError::ProductNotFound);
        }

        let cart = match target {
            CartTarget::New => {
                self.carts
                    .create(vec![LineItem::new(product, quantity)])
                    .await?
            }
            CartTarget::Existing(id) => {
                let mut cart = self.get(id).await?;
                cart.merge_item(product, quantity);
                self.persist(&cart).await?;
                cart
            }
        };

        tracing::info!(cart_id = %cart.id, product_id = %product, quantity, "Product added to cart");
        Ok(cart)
    }

    /// Remove the line item for `product`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the cart does not exist.
    /// Returns `CartError::NotInCart` if the cart has no such line item.
    pub async fn remove_item(&self, id: CartId, product: ProductId) -> Result<Cart, CartError> {
        let mut cart = self.get(id).await?;
        cart.remove_item(product).ok_or(CartError::NotInCart)?;
        self.persist(&cart).await?;
        Ok(cart)
    }

    /// Overwrite every line item with `items`, as supplied.
    ///
    /// Duplicates are kept and product references are not checked.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the cart does not exist.
    pub async fn replace_items(&self, id: CartId, items: Vec<LineItem>) -> Result<Cart, CartError> {
        let mut cart = self.get(id).await?;
        cart.replace_items(items);
        self.persist(&cart).await?;
        Ok(cart)
    }

    /// Overwrite the quantity of the line item for `product`, as supplied.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the cart does not exist.
    /// Returns `CartError::NotInCart` if the cart has no such line item.
    pub async fn set_item_quantity(
        &self,
        id: CartId,
        product: ProductId,
        quantity: i64,
    ) -> Result<Cart, CartError> {
        let mut cart = self.get(id).await?;
        if !cart.set_quantity(product, quantity) {
            return Err(CartError::NotInCart);
        }
        self.persist(&cart).await?;
        Ok(cart)
    }

    /// Remove every line item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::CartNotFound` if the cart does not exist.
    pub async fn clear(&self, id: CartId) -> Result<Cart, CartError> {
        let mut cart = self.get(id).await?;
        cart.clear();
        self.persist(&cart).await?;
        Ok(cart)
    }

    async fn persist(&self, cart: &Cart) -> Result<(), CartError> {
        // The cart can vanish between the read and this write.
        self.carts.replace(cart).await.map_err(|e| match e {
            RepositoryError::NotFound => CartError::CartNotFound,
            other => CartError::Repository(other),
        })
    }
}
