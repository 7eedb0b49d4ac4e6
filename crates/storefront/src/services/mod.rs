//! Business logic services for storefront.
//!
//! # Services
//!
//! - `catalog` - Product listing, lookup and maintenance
//! - `cart` - Cart creation and line-item merge/update rules
//!
//! Services borrow the stores held in `AppState` and are cheap to build per
//! request.

pub mod cart;
pub mod catalog;

pub use cart::{CartError, CartService, CartTarget};
pub use catalog::{CatalogError, CatalogService, ListingQuery, ProductListing};
