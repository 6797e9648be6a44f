//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store selection and the ingestion/query services
//! - `routes/`: handlers, one file per area
//! - `dto.rs`: query-string DTOs and their mapping to domain types
//! - `errors.rs`: the JSON error envelope

use std::sync::Arc;

use axum::{Extension, Router, extract::DefaultBodyLimit, routing::get};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router. `upload_max_bytes` caps request bodies.
pub fn build_app(services: Arc<AppServices>, upload_max_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(
            ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(upload_max_bytes))
                .layer(Extension(services)),
        )
}
