//! Cart route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tienda_core::CartId;
use tracing::instrument;

use super::error_page::{PagePath, PageResult};
use crate::filters;
use crate::models::{ExpandedCart, ExpandedLineItem};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    /// `None` when the product no longer exists.
    pub product_id: Option<String>,
    pub name: String,
    pub price: String,
    pub quantity: i64,
    pub subtotal: String,
}

impl From<&ExpandedLineItem> for CartLineView {
    fn from(item: &ExpandedLineItem) -> Self {
        let subtotal = item.subtotal().display();
        match &item.product {
            Some(product) => Self {
                product_id: Some(product.id.to_string()),
                name: product.name.clone(),
                price: product.price.display(),
                quantity: item.quantity,
                subtotal,
            },
            None => Self {
                product_id: None,
                name: "Product no longer available".to_string(),
                price: "-".to_string(),
                quantity: item.quantity,
                subtotal,
            },
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "carts/show.html")]
pub struct CartShowTemplate {
    pub cart_id: String,
    pub items: Vec<CartLineView>,
    pub total: String,
}

impl From<&ExpandedCart> for CartShowTemplate {
    fn from(cart: &ExpandedCart) -> Self {
        Self {
            cart_id: cart.id.to_string(),
            items: cart.products.iter().map(CartLineView::from).collect(),
            total: cart.total().display(),
        }
    }
}

/// Display cart page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    PagePath(cid): PagePath<String>,
) -> PageResult<CartShowTemplate> {
    let cart = state.carts().get_expanded(CartId::parse(&cid)?).await?;
    Ok(CartShowTemplate::from(&cart))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rust_decimal::Decimal;
    use tienda_core::{Price, ProductId};

    use super::*;
    use crate::models::ProductFields;

    #[test]
    fn test_cart_view_totals_and_missing_products() {
        let product = ProductFields::new("Mug", Price::new(Decimal::new(450, 2)).unwrap(), "x")
            .into_product(ProductId::generate());
        let cart = ExpandedCart {
            id: CartId::generate(),
            products: vec![
                ExpandedLineItem {
                    product: Some(product),
                    quantity: 2,
                },
                ExpandedLineItem {
                    product: None,
                    quantity: 1,
                },
            ],
        };

        let view = CartShowTemplate::from(&cart);
        assert_eq!(view.total, "$9.00");
        assert_eq!(view.items[0].subtotal, "$9.00");
        assert!(view.items[1].product_id.is_none());
        assert_eq!(view.items[1].subtotal, "$0.00");

        let html = view.render().unwrap();
        assert!(html.contains("Mug"));
        assert!(html.contains("$9.00"));
    }

    #[test]
    fn test_cart_view_total_saturates_for_huge_prices() {
        let huge = Price::new(format!("5{}", "0".repeat(28)).parse().unwrap()).unwrap();
        let line = |name: &str| ExpandedLineItem {
            product: Some(ProductFields::new(name, huge, "x").into_product(ProductId::generate())),
            quantity: 1,
        };
        let cart = ExpandedCart {
            id: CartId::generate(),
            products: vec![line("A"), line("B")],
        };

        let view = CartShowTemplate::from(&cart);
        assert_eq!(view.total, cart.total().display());
        assert!(view.render().is_ok());
    }
}
