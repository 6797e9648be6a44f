use std::sync::Arc;

use anyhow::Context;

use streamoid_api::app::{build_app, services};
use streamoid_infra::ServiceConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    streamoid_observability::init();

    let config = ServiceConfig::from_env().context("invalid configuration")?;
    let services = Arc::new(services::build_services(&config).await?);
    let app = build_app(services, config.upload_max_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
