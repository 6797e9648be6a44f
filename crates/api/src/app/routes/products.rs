use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_products))
        .route("/search", get(search_products))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListQuery>,
) -> axum::response::Response {
    let (page, limit) = match query.parse() {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.queries.list(page, limit).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}

pub async fn search_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    let filter = match query.to_filter() {
        Ok(f) => f,
        Err(resp) => return resp,
    };

    match services.queries.search(&filter).await {
        Ok(products) => (StatusCode::OK, Json(products)).into_response(),
        Err(e) => errors::query_error_to_response(e),
    }
}
