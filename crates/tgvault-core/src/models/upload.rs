//! Upload record model
//!
//! One row per successful backend upload. Rows are append-only: they are
//! created by the upload path and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::backend_types::UploadBackend;

/// Persisted proof that a file was stored, with enough addressing data to
/// locate it again via the originating backend.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UploadedFile {
    /// Store-assigned, monotonically increasing primary key.
    pub id: i64,
    /// Which backend class handled the upload.
    pub backend: UploadBackend,
    /// Backend-specific location payload; for Telegram backends a
    /// `{"chat_id": .., "message_id": ..}` object. Stored free-form.
    pub data: serde_json::Value,
    /// Wall-clock persistence time, timezone-aware.
    pub upload_time: DateTime<Utc>,
}

/// API response for a completed upload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UploadResponse {
    pub id: i64,
    #[schema(value_type = String, example = "bot")]
    pub backend: UploadBackend,
    #[schema(value_type = Object)]
    pub data: serde_json::Value,
    pub upload_time: DateTime<Utc>,
}

impl From<UploadedFile> for UploadResponse {
    fn from(file: UploadedFile) -> Self {
        UploadResponse {
            id: file.id,
            backend: file.backend,
            data: file.data,
            upload_time: file.upload_time,
        }
    }
}
