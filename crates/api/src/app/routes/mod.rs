use axum::{Router, routing::post};

pub mod products;
pub mod system;
pub mod upload;

/// Router for the catalog endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/upload", post(upload::upload_csv))
        .nest("/products", products::router())
}
