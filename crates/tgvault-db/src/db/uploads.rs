//! Upload record repository: insert-only access to the uploaded_files table.
//!
//! Records are created exactly once per successful backend upload and never
//! updated or deleted; there are deliberately no mutation queries here.

use sqlx::{PgPool, Postgres};
use tgvault_core::{AppError, UploadBackend, UploadedFile};

/// Repository for the uploaded_files table.
#[derive(Clone)]
pub struct UploadRepository {
    pool: PgPool,
}

impl UploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new upload record and return it with the store-assigned id
    /// and creation timestamp.
    #[tracing::instrument(skip(self, data), fields(db.table = "uploaded_files", backend = %backend))]
    pub async fn create(
        &self,
        backend: UploadBackend,
        data: serde_json::Value,
    ) -> Result<UploadedFile, AppError> {
        let record: UploadedFile = sqlx::query_as::<Postgres, UploadedFile>(
            r#"
            INSERT INTO uploaded_files (backend, data)
            VALUES ($1, $2)
            RETURNING id, backend, data, upload_time
            "#,
        )
        .bind(backend)
        .bind(&data)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }
}
