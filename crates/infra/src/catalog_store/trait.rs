use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use streamoid_core::PageRequest;
use streamoid_products::{Product, SearchFilter};

/// Catalog storage operation error.
///
/// These are **infrastructure errors** as opposed to per-row validation
/// failures, which never reach the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),

    #[error("catalog lock poisoned")]
    Poisoned,

    #[error("stored record is invalid: {0}")]
    InvalidRecord(String),
}

/// Source of scoped catalog sessions.
///
/// Each ingestion or query call acquires its own session and drops it when
/// done. Implementations must make an uncommitted, dropped session leave the
/// catalog untouched.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn session(&self) -> Result<Box<dyn CatalogSession>, StoreError>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn session(&self) -> Result<Box<dyn CatalogSession>, StoreError> {
        (**self).session().await
    }
}

/// A unit of work against the product table.
///
/// Reads return products in the catalog's stable order: position of first
/// insertion, unaffected by later upserts of the same SKU.
#[async_trait]
pub trait CatalogSession: Send {
    /// Insert the product, or replace every field of the existing product with
    /// the same SKU.
    async fn upsert(&mut self, product: &Product) -> Result<(), StoreError>;

    /// One page of the catalog. Past the end yields an empty vector.
    async fn list(&mut self, page: PageRequest) -> Result<Vec<Product>, StoreError>;

    /// Every product matching all predicates of `filter`.
    async fn search(&mut self, filter: &SearchFilter) -> Result<Vec<Product>, StoreError>;

    /// Make this session's upserts durable and visible to other sessions.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
