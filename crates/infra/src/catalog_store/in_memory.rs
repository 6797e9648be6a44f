use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use streamoid_core::{PageRequest, Sku};
use streamoid_products::{Product, SearchFilter};

use super::r#trait::{CatalogSession, CatalogStore, StoreError};

#[derive(Debug, Default)]
struct Catalog {
    /// SKUs in first-insertion order.
    order: Vec<Sku>,
    products: HashMap<Sku, Product>,
}

impl Catalog {
    fn upsert(&mut self, product: Product) {
        let sku = product.sku().clone();
        if self.products.insert(sku.clone(), product).is_none() {
            self.order.push(sku);
        }
    }

    fn iter(&self) -> impl Iterator<Item = &Product> {
        self.order.iter().filter_map(|sku| self.products.get(sku))
    }
}

/// In-memory product catalog.
///
/// Intended for tests/dev. Sessions stage upserts locally and apply them in a
/// single write on commit; reads see committed state only.
#[derive(Debug, Default, Clone)]
pub struct InMemoryCatalogStore {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed products.
    pub fn len(&self) -> usize {
        self.catalog.read().map(|c| c.products.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Committed product by SKU.
    pub fn get(&self, sku: &str) -> Option<Product> {
        let sku = Sku::new(sku).ok()?;
        self.catalog.read().ok()?.products.get(&sku).cloned()
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn session(&self) -> Result<Box<dyn CatalogSession>, StoreError> {
        Ok(Box::new(InMemorySession {
            catalog: self.catalog.clone(),
            staged: Vec::new(),
        }))
    }
}

struct InMemorySession {
    catalog: Arc<RwLock<Catalog>>,
    staged: Vec<Product>,
}

#[async_trait]
impl CatalogSession for InMemorySession {
    async fn upsert(&mut self, product: &Product) -> Result<(), StoreError> {
        self.staged.push(product.clone());
        Ok(())
    }

    async fn list(&mut self, page: PageRequest) -> Result<Vec<Product>, StoreError> {
        let catalog = self.catalog.read().map_err(|_| StoreError::Poisoned)?;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(catalog
            .iter()
            .skip(offset)
            .take(page.limit() as usize)
            .cloned()
            .collect())
    }

    async fn search(&mut self, filter: &SearchFilter) -> Result<Vec<Product>, StoreError> {
        let catalog = self.catalog.read().map_err(|_| StoreError::Poisoned)?;
        Ok(catalog.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut catalog = self.catalog.write().map_err(|_| StoreError::Poisoned)?;
        for product in self.staged {
            catalog.upsert(product);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use streamoid_products::NewProduct;

    fn product(sku: &str, brand: &str, price: i64) -> Product {
        Product::new(NewProduct {
            sku: Sku::new(sku).unwrap(),
            name: format!("{sku} name"),
            brand: brand.to_string(),
            color: None,
            size: None,
            mrp: Decimal::new(1000, 0),
            price: Decimal::new(price, 0),
            quantity: 1,
        })
        .unwrap()
    }

    async fn seed(store: &InMemoryCatalogStore, products: &[Product]) {
        let mut session = store.session().await.unwrap();
        for p in products {
            session.upsert(p).await.unwrap();
        }
        session.commit().await.unwrap();
    }

    fn skus(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.sku().as_str()).collect()
    }

    #[tokio::test]
    async fn dropped_session_discards_staged_upserts() {
        let store = InMemoryCatalogStore::new();
        {
            let mut session = store.session().await.unwrap();
            session.upsert(&product("A", "X", 10)).await.unwrap();
        }
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn upsert_replaces_fields_but_keeps_position() {
        let store = InMemoryCatalogStore::new();
        seed(&store, &[product("A", "X", 10), product("B", "X", 20)]).await;
        seed(&store, &[product("A", "Y", 30)]).await;

        assert_eq!(store.len(), 2);
        let a = store.get("A").unwrap();
        assert_eq!(a.brand(), "Y");
        assert_eq!(a.price(), Decimal::new(30, 0));

        let mut session = store.session().await.unwrap();
        let all = session.list(PageRequest::new(1, 10).unwrap()).await.unwrap();
        assert_eq!(skus(&all), vec!["A", "B"]);
    }

    #[tokio::test]
    async fn list_pages_through_insertion_order() {
        let store = InMemoryCatalogStore::new();
        seed(&store, &[product("A", "X", 1), product("B", "X", 2), product("C", "X", 3)]).await;

        let mut session = store.session().await.unwrap();
        let p1 = session.list(PageRequest::new(1, 2).unwrap()).await.unwrap();
        let p2 = session.list(PageRequest::new(2, 2).unwrap()).await.unwrap();
        let p3 = session.list(PageRequest::new(3, 2).unwrap()).await.unwrap();
        assert_eq!(skus(&p1), vec!["A", "B"]);
        assert_eq!(skus(&p2), vec!["C"]);
        assert!(p3.is_empty());
    }

    #[tokio::test]
    async fn search_applies_filter_in_catalog_order() {
        let store = InMemoryCatalogStore::new();
        seed(
            &store,
            &[product("A", "BrandX", 100), product("B", "BrandY", 200), product("C", "brandx", 300)],
        )
        .await;

        let mut session = store.session().await.unwrap();
        let hits = session
            .search(&SearchFilter::new().with_brand(Some("BRANDX")))
            .await
            .unwrap();
        assert_eq!(skus(&hits), vec!["A", "C"]);

        let all = session.search(&SearchFilter::new()).await.unwrap();
        assert_eq!(all.len(), 3);
    }
}
