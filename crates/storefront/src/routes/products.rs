//! Product route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tienda_core::ProductId;
use tracing::instrument;

use super::ListingParams;
use super::error_page::{PagePath, PageQuery, PageResult};
use crate::filters;
use crate::models::Product;
use crate::state::AppState;

/// Mount point of the product listing view, used for pagination links.
const PRODUCTS_PATH: &str = "/products";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub available: bool,
    pub stock: i64,
    pub description: String,
    pub thumbnail: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name,
            price: product.price.display(),
            category: product.category,
            available: product.available,
            stock: product.stock,
            description: product
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| "Description not available".to_string()),
            thumbnail: product.thumbnails.into_iter().next(),
        }
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub products: Vec<ProductView>,
    pub category: Option<String>,
    pub current_page: u32,
    pub total_pages: u32,
    pub prev_link: Option<String>,
    pub next_link: Option<String>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductView,
    /// Fresh cart created for this page view.
    pub cart_id: String,
}

/// Display product listing page.
///
/// Unlike the API, an empty page renders an empty listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    PageQuery(params): PageQuery<ListingParams>,
) -> PageResult<ProductsIndexTemplate> {
    let query = params.to_query(state.config().default_page_size);
    let listing = state.catalog().browse(&query).await?;
    let info = listing.info;

    Ok(ProductsIndexTemplate {
        products: listing.products.into_iter().map(ProductView::from).collect(),
        category: query.filter.category.clone(),
        current_page: info.page,
        total_pages: info.total_pages,
        prev_link: info.prev_page.map(|page| query.link(PRODUCTS_PATH, page)),
        next_link: info.next_page.map(|page| query.link(PRODUCTS_PATH, page)),
    })
}

/// Display product detail page.
///
/// Every view creates a new empty cart for the add-to-cart form.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    PagePath(pid): PagePath<String>,
) -> PageResult<ProductShowTemplate> {
    let product = state.catalog().get(ProductId::parse(&pid)?).await?;
    let cart = state.carts().create().await?;
    tracing::info!(product_id = %product.id, cart_id = %cart.id, "Cart created for product page");

    Ok(ProductShowTemplate {
        product: product.into(),
        cart_id: cart.id.to_string(),
    })
}
