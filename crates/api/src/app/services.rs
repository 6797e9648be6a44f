use std::sync::Arc;

use streamoid_infra::{
    CatalogQueryService, CatalogStore, InMemoryCatalogStore, IngestionService, PostgresCatalogStore,
    ServiceConfig, StoreError,
};

/// Services shared by every handler (injected as an `Extension`).
#[derive(Clone)]
pub struct AppServices {
    pub ingestion: IngestionService,
    pub queries: CatalogQueryService,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            ingestion: IngestionService::new(store.clone()),
            queries: CatalogQueryService::new(store),
        }
    }

    /// Services over a fresh in-memory catalog (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()))
    }
}

/// Postgres when `DATABASE_URL` is set, otherwise the in-memory catalog.
pub async fn build_services(config: &ServiceConfig) -> Result<AppServices, StoreError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set; using in-memory catalog (data is lost on restart)");
        return Ok(AppServices::in_memory());
    };

    let store =
        PostgresCatalogStore::connect(database_url, config.database_max_connections).await?;
    store.ensure_schema().await?;
    tracing::info!(
        max_connections = config.database_max_connections,
        "connected to Postgres catalog"
    );

    Ok(AppServices::new(Arc::new(store)))
}
