use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use streamoid_infra::{IngestError, QueryError, StoreError};

pub fn ingest_error_to_response(err: IngestError) -> axum::response::Response {
    match err {
        IngestError::NotCsv(_) => json_error(
            StatusCode::BAD_REQUEST,
            "invalid_file_type",
            "Invalid file type. Please upload a CSV.",
        ),
        IngestError::InvalidInput(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_input", msg),
        IngestError::Store(e) => store_error_to_response(e),
    }
}

pub fn query_error_to_response(err: QueryError) -> axum::response::Response {
    match err {
        QueryError::Validation(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        QueryError::Store(e) => store_error_to_response(e),
    }
}

/// Storage details are logged, never returned to the client.
pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    tracing::error!(error = %err, "catalog store failure");
    json_error(
        StatusCode::INTERNAL_SERVER_ERROR,
        "store_error",
        "internal storage error",
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
