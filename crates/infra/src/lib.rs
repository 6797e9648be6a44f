//! Infrastructure layer: catalog storage, CSV ingestion, queries, config.

pub mod catalog_store;
pub mod config;
pub mod ingest;
pub mod query;

pub use catalog_store::{CatalogSession, CatalogStore, InMemoryCatalogStore, PostgresCatalogStore, StoreError};
pub use config::{ConfigError, ServiceConfig};
pub use ingest::{IngestError, IngestReport, IngestionService, Upload};
pub use query::{CatalogQueryService, QueryError};
