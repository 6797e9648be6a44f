//! CSV catalog ingestion: parse, validate per row, upsert, report.

pub mod csv_parser;
pub mod service;

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use streamoid_products::validate_row;

use crate::catalog_store::{CatalogSession, StoreError};

pub use csv_parser::{ParsedRow, parse_csv};
pub use service::{IngestionService, Upload};

/// Outcome of one upload: how many rows were stored and which were not.
///
/// `failed` holds one identifier per rejected row, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub stored: usize,
    pub failed: Vec<String>,
}

/// Whole-upload failures. Per-row problems never surface here; they land in
/// `IngestReport::failed`.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("file must be a CSV (got {0:?})")]
    NotCsv(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// True when `filename` names a CSV file (case-sensitive `.csv` suffix).
pub fn is_csv_filename(filename: &str) -> bool {
    filename.ends_with(".csv")
}

/// Validate every row of `bytes` and upsert the valid ones through `session`.
///
/// Does not commit; the caller owns the session and decides.
pub async fn ingest_csv(
    session: &mut dyn CatalogSession,
    bytes: &[u8],
) -> Result<IngestReport, IngestError> {
    let rows = parse_csv(bytes)?;
    let mut report = IngestReport::default();

    for parsed in rows {
        match parsed.and_then(|row| validate_row(&row)) {
            Ok(product) => {
                session.upsert(&product).await?;
                report.stored += 1;
            }
            Err(rejection) => {
                debug!("Rejected row: {}", rejection);
                report.failed.push(rejection.identifier);
            }
        }
    }

    info!(
        stored = report.stored,
        failed = report.failed.len(),
        "ingested CSV rows"
    );
    Ok(report)
}
