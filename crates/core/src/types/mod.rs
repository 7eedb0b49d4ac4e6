//! Core types for Tienda.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod page;
pub mod price;

pub use id::*;
pub use page::{DEFAULT_PAGE_SIZE, PageInfo, PageRequest, SortOrder};
pub use price::{Price, PriceError};
