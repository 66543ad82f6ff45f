//! Persistence seam for the upload router

use async_trait::async_trait;
use tgvault_core::{AppError, UploadBackend, UploadedFile};
use tgvault_db::UploadRepository;

/// Durable record of successful uploads.
///
/// The router talks to persistence through this trait so its routing
/// semantics can be tested without a database.
#[async_trait]
pub trait UploadLog: Send + Sync {
    /// Append one record for a successful upload and return it.
    async fn record(
        &self,
        backend: UploadBackend,
        data: serde_json::Value,
    ) -> Result<UploadedFile, AppError>;
}

#[async_trait]
impl UploadLog for UploadRepository {
    async fn record(
        &self,
        backend: UploadBackend,
        data: serde_json::Value,
    ) -> Result<UploadedFile, AppError> {
        self.create(backend, data).await
    }
}
