//! Product catalog storage boundary.
//!
//! A `CatalogStore` hands out scoped `CatalogSession`s; every ingestion or
//! query call runs inside exactly one. Two backends: in-memory (tests/dev)
//! and Postgres.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use postgres::PostgresCatalogStore;
pub use r#trait::{CatalogSession, CatalogStore, StoreError};
