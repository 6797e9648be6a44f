use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Multipart, multipart::MultipartRejection},
    http::StatusCode,
    response::IntoResponse,
};

use streamoid_infra::Upload;

use crate::app::errors;
use crate::app::services::AppServices;

/// Multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

pub async fn upload_csv(
    Extension(services): Extension<Arc<AppServices>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> axum::response::Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_multipart", e.body_text()),
    };

    let upload = match read_file_field(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => {
            return errors::json_error(
                StatusCode::BAD_REQUEST,
                "missing_file",
                format!("multipart field {FILE_FIELD:?} is required"),
            );
        }
        Err(resp) => return resp,
    };

    match services.ingestion.upload(upload).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::ingest_error_to_response(e),
    }
}

/// First `file` part, buffered. Other parts are skipped.
async fn read_file_field(
    multipart: &mut Multipart,
) -> Result<Option<Upload>, axum::response::Response> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Ok(None),
            Err(e) => return Err(multipart_error(e.status(), e.body_text())),
        };

        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e.status(), e.body_text()))?;

        return Ok(Some(Upload {
            filename,
            bytes: bytes.to_vec(),
        }));
    }
}

fn multipart_error(status: StatusCode, message: String) -> axum::response::Response {
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        errors::json_error(status, "payload_too_large", message)
    } else {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_multipart", message)
    }
}
