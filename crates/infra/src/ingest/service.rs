use std::sync::Arc;

use tracing::{info, warn};

use crate::catalog_store::CatalogStore;

use super::{IngestError, IngestReport, ingest_csv, is_csv_filename};

/// An uploaded file as received from the transport.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Upload pipeline: file check, then one scoped session per upload.
///
/// Valid rows of one upload are committed together; if anything fails before
/// the commit the session is dropped and none of them are stored.
#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn CatalogStore>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn upload(&self, upload: Upload) -> Result<IngestReport, IngestError> {
        info!(
            filename = %upload.filename,
            size = upload.bytes.len(),
            "Starting upload processing"
        );

        if !is_csv_filename(&upload.filename) {
            warn!(filename = %upload.filename, "Rejected non-CSV upload");
            return Err(IngestError::NotCsv(upload.filename));
        }

        let mut session = self.store.session().await?;
        let report = ingest_csv(session.as_mut(), &upload.bytes).await?;
        session.commit().await?;

        info!(
            filename = %upload.filename,
            stored = report.stored,
            failed = report.failed.len(),
            "Successfully processed upload"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::InMemoryCatalogStore;

    fn service() -> (IngestionService, InMemoryCatalogStore) {
        let store = InMemoryCatalogStore::new();
        (IngestionService::new(Arc::new(store.clone())), store)
    }

    #[tokio::test]
    async fn non_csv_filename_is_rejected_before_processing() {
        let (svc, store) = service();
        let err = svc
            .upload(Upload {
                filename: "products.txt".to_string(),
                bytes: b"sku,name,brand,mrp,price\nA,B,C,10,5\n".to_vec(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::NotCsv(name) if name == "products.txt"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn invalid_utf8_body_stores_nothing() {
        let (svc, store) = service();
        let err = svc
            .upload(Upload {
                filename: "products.csv".to_string(),
                bytes: vec![0xff, 0xfe, 0xfd],
            })
            .await
            .unwrap_err();

        assert!(matches!(err, IngestError::InvalidInput(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn valid_upload_is_committed() {
        let (svc, store) = service();
        let report = svc
            .upload(Upload {
                filename: "products.csv".to_string(),
                bytes: b"sku,name,brand,mrp,price,quantity\nA-1,Tee,BrandX,10,5,2\n".to_vec(),
            })
            .await
            .unwrap();

        assert_eq!(report.stored, 1);
        assert!(report.failed.is_empty());
        assert_eq!(store.get("A-1").unwrap().quantity(), 2);
    }
}
