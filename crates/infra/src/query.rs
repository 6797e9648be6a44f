//! Read-only catalog queries: paginated listing and filtered search.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use streamoid_core::{DomainError, PageRequest};
use streamoid_products::{Product, SearchFilter};

use crate::catalog_store::{CatalogStore, StoreError};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog query service. Each call runs in its own read session.
#[derive(Clone)]
pub struct CatalogQueryService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogQueryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// One page of products. `None` page/limit fall back to 1/10.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Vec<Product>, QueryError> {
        let page = PageRequest::from_optional(page, limit)?;
        let mut session = self.store.session().await?;
        let products = session.list(page).await?;
        debug!(
            page = page.page(),
            limit = page.limit(),
            returned = products.len(),
            "listed products"
        );
        Ok(products)
    }

    /// Products matching every predicate in `filter`.
    pub async fn search(&self, filter: &SearchFilter) -> Result<Vec<Product>, QueryError> {
        let mut session = self.store.session().await?;
        let products = session.search(filter).await?;
        debug!(?filter, returned = products.len(), "searched products");
        Ok(products)
    }
}
