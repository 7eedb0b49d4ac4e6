//! Catalog service.
//!
//! Product lookup and maintenance plus the filtered, sorted, paginated
//! listing shared by the JSON API and the HTML views.

mod error;

pub use error::CatalogError;

use tienda_core::{PageInfo, PageRequest, ProductId, SortOrder};
use url::form_urlencoded;

use crate::db::{ProductFilter, ProductStore};
use crate::models::{Product, ProductFields};

/// A parsed listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingQuery {
    pub filter: ProductFilter,
    pub sort: SortOrder,
    pub page: PageRequest,
}

impl ListingQuery {
    /// Build a query from raw request parameters.
    ///
    /// An empty `category` means no filter.
    #[must_use]
    pub fn from_params(
        category: Option<String>,
        sort: Option<&str>,
        page: Option<u32>,
        limit: Option<u32>,
        default_limit: u32,
    ) -> Self {
        Self {
            filter: ProductFilter {
                category: category.filter(|c| !c.is_empty()),
            },
            sort: SortOrder::from_param(sort),
            page: PageRequest::new(page, limit, default_limit),
        }
    }

    /// Link to `page` of this listing under `base`, keeping limit, sort and filter.
    #[must_use]
    pub fn link(&self, base: &str, page: u32) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("limit", &self.page.limit().to_string())
            .append_pair("page", &page.to_string())
            .append_pair("sort", self.sort.as_param())
            .append_pair("query", self.filter.category.as_deref().unwrap_or(""))
            .finish();
        format!("{base}?{query}")
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListing {
    pub products: Vec<Product>,
    pub info: PageInfo,
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: &'a dyn ProductStore,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(products: &'a dyn ProductStore) -> Self {
        Self { products }
    }

    /// Fetch one page of products. An empty page is a valid result.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn browse(&self, query: &ListingQuery) -> Result<ProductListing, CatalogError> {
        let slice = self
            .products
            .list(&query.filter, query.page, query.sort)
            .await?;

        Ok(ProductListing {
            products: slice.products,
            info: PageInfo::new(query.page, slice.total),
        })
    }

    /// Fetch one page of products, treating an empty page as not found.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyPage` if the page holds no products.
    /// Returns `CatalogError::Repository` if the store fails.
    pub async fn list(&self, query: &ListingQuery) -> Result<ProductListing, CatalogError> {
        let listing = self.browse(query).await?;
        if listing.products.is_empty() {
            return Err(CatalogError::EmptyPage);
        }
        Ok(listing)
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if no product has this ID.
    pub async fn get(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.products
            .get(id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// Create a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if a required field is blank.
    pub async fn create(&self, fields: ProductFields) -> Result<Product, CatalogError> {
        fields.validate()?;
        let product = self.products.create(fields).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    /// Replace every field of a product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Invalid` if a required field is blank.
    /// Returns `CatalogError::ProductNotFound` if no product has this ID.
    pub async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Product, CatalogError> {
        fields.validate()?;
        self.products
            .replace(id, fields)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }

    /// Delete a product. Carts that reference it keep the dangling reference.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::ProductNotFound` if no product has this ID.
    pub async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        if !self.products.delete(id).await? {
            return Err(CatalogError::ProductNotFound);
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}
