//! `MemoryStore` - in-process product and cart collections for development and testing.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tienda_core::{CartId, PageRequest, ProductId, SortOrder};

use super::{CartStore, ProductFilter, ProductSlice, ProductStore, RepositoryError};
use crate::models::{Cart, LineItem, Product, ProductFields};

struct StoredCart {
    cart: Cart,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct Collections {
    /// Insertion order is the natural listing order.
    products: Vec<Product>,
    carts: Vec<StoredCart>,
}

/// In-memory store implementing both [`ProductStore`] and [`CartStore`].
///
/// Clone-friendly via `Arc`; clones share the same collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Collections>, RepositoryError> {
        self.inner
            .read()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Collections>, RepositoryError> {
        self.inner
            .write()
            .map_err(|_| RepositoryError::Unavailable("lock poisoned".into()))
    }

    #[cfg(test)]
    fn backdate_cart(&self, id: CartId, created_at: DateTime<Utc>) {
        if let Ok(mut store) = self.write()
            && let Some(stored) = store.carts.iter_mut().find(|c| c.cart.id == id)
        {
            stored.created_at = created_at;
        }
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list(
        &self,
        filter: &ProductFilter,
        page: PageRequest,
        sort: SortOrder,
    ) -> Result<ProductSlice, RepositoryError> {
        let store = self.read()?;
        let mut matching: Vec<&Product> =
            store.products.iter().filter(|p| filter.matches(p)).collect();

        // Stable sorts keep insertion order among equal prices.
        match sort {
            SortOrder::None => {}
            SortOrder::Asc => matching.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::Desc => matching.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        let total = matching.len() as u64;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let products = matching
            .into_iter()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(ProductSlice { products, total })
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let store = self.read()?;
        Ok(store.products.iter().find(|p| p.id == id).cloned())
    }

    async fn get_many(&self, ids: &[ProductId]) -> Result<Vec<Product>, RepositoryError> {
        let store = self.read()?;
        Ok(store
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, RepositoryError> {
        let product = fields.into_product(ProductId::generate());
        self.write()?.products.push(product.clone());
        Ok(product)
    }

    async fn replace(
        &self,
        id: ProductId,
        fields: ProductFields,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut store = self.write()?;
        let Some(slot) = store.products.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        *slot = fields.into_product(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let mut store = self.write()?;
        let before = store.products.len();
        store.products.retain(|p| p.id != id);
        Ok(store.products.len() < before)
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn create(&self, items: Vec<LineItem>) -> Result<Cart, RepositoryError> {
        let cart = Cart::new(CartId::generate(), items);
        self.write()?.carts.push(StoredCart {
            cart: cart.clone(),
            created_at: Utc::now(),
        });
        Ok(cart)
    }

    async fn get(&self, id: CartId) -> Result<Option<Cart>, RepositoryError> {
        let store = self.read()?;
        Ok(store
            .carts
            .iter()
            .find(|c| c.cart.id == id)
            .map(|c| c.cart.clone()))
    }

    async fn replace(&self, cart: &Cart) -> Result<(), RepositoryError> {
        let mut store = self.write()?;
        let stored = store
            .carts
            .iter_mut()
            .find(|c| c.cart.id == cart.id)
            .ok_or(RepositoryError::NotFound)?;
        stored.cart.products.clone_from(&cart.products);
        Ok(())
    }

    async fn prune_empty(&self, created_before: DateTime<Utc>) -> Result<u64, RepositoryError> {
        let mut store = self.write()?;
        let before = store.carts.len();
        store
            .carts
            .retain(|c| !(c.cart.is_empty() && c.created_at < created_before));
        Ok((before - store.carts.len()) as u64)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use rust_decimal::Decimal;
    use tienda_core::Price;

    use super::*;

    fn fields(name: &str, price: i64, category: &str) -> ProductFields {
        ProductFields::new(name, Price::new(Decimal::from(price)).unwrap(), category)
    }

    async fn seed(store: &MemoryStore) -> Vec<Product> {
        let mut out = Vec::new();
        for (name, price, category) in [
            ("a", 30, "x"),
            ("b", 10, "y"),
            ("c", 20, "x"),
            ("d", 10, "x"),
        ] {
            out.push(ProductStore::create(store, fields(name, price, category)).await.unwrap());
        }
        out
    }

    fn names(slice: &ProductSlice) -> Vec<&str> {
        slice.products.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_natural_order_and_paging() {
        let store = MemoryStore::new();
        seed(&store).await;

        let page = PageRequest::new(Some(2), Some(3), 10);
        let slice = store
            .list(&ProductFilter::default(), page, SortOrder::None)
            .await
            .unwrap();
        assert_eq!(slice.total, 4);
        assert_eq!(names(&slice), vec!["d"]);
    }

    #[tokio::test]
    async fn test_list_sorted_by_price_is_stable() {
        let store = MemoryStore::new();
        seed(&store).await;

        let all = PageRequest::new(None, Some(10), 10);
        let asc = store
            .list(&ProductFilter::default(), all, SortOrder::Asc)
            .await
            .unwrap();
        assert_eq!(names(&asc), vec!["b", "d", "c", "a"]);

        let desc = store
            .list(&ProductFilter::default(), all, SortOrder::Desc)
            .await
            .unwrap();
        assert_eq!(names(&desc), vec!["a", "c", "b", "d"]);
    }

    #[tokio::test]
    async fn test_list_filters_by_category() {
        let store = MemoryStore::new();
        seed(&store).await;

        let filter = ProductFilter {
            category: Some("x".to_string()),
        };
        let slice = store
            .list(&filter, PageRequest::default(), SortOrder::None)
            .await
            .unwrap();
        assert_eq!(slice.total, 3);
        assert_eq!(names(&slice), vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_replace_and_delete_product() {
        let store = MemoryStore::new();
        let products = seed(&store).await;
        let target = products.first().unwrap().id;

        let replaced = ProductStore::replace(&store, target, fields("z", 5, "q"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.id, target);
        assert_eq!(replaced.name, "z");
        let unknown = ProductStore::replace(&store, ProductId::generate(), fields("n", 1, "q"))
            .await
            .unwrap();
        assert!(unknown.is_none());

        assert!(store.delete(target).await.unwrap());
        assert!(!store.delete(target).await.unwrap());
        assert!(ProductStore::get(&store, target).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cart_replace_requires_existing_cart() {
        let store = MemoryStore::new();
        let missing = Cart::new(CartId::generate(), Vec::new());
        let err = CartStore::replace(&store, &missing).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_prune_only_removes_old_empty_carts() {
        let store = MemoryStore::new();
        let old_empty = CartStore::create(&store, Vec::new()).await.unwrap();
        let fresh_empty = CartStore::create(&store, Vec::new()).await.unwrap();
        let old_full = CartStore::create(&store, vec![LineItem::new(ProductId::generate(), 1)])
            .await
            .unwrap();

        let long_ago = Utc::now() - Duration::days(3);
        store.backdate_cart(old_empty.id, long_ago);
        store.backdate_cart(old_full.id, long_ago);

        let removed = store
            .prune_empty(Utc::now() - Duration::days(1))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert!(CartStore::get(&store, old_empty.id).await.unwrap().is_none());
        assert!(CartStore::get(&store, fresh_empty.id).await.unwrap().is_some());
        assert!(CartStore::get(&store, old_full.id).await.unwrap().is_some());
    }
}
