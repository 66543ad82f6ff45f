//! Storage abstraction trait
//!
//! This module defines the `Storage` trait that all backend classes must
//! implement, and the payload/result types that cross that boundary.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// The platform rejected the upload (an `ok: false` response or a
    /// non-success HTTP status). Treated as a per-attempt failure.
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File content handed to a backend. Content is always bytes; textual
/// sources are normalized at construction, never inside the upload path.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub filename: String,
    pub content: Bytes,
}

impl FilePayload {
    pub fn new(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }

    /// Build a payload from textual content, UTF-8 encoded.
    pub fn from_text(filename: impl Into<String>, text: &str) -> Self {
        Self::new(filename, text.as_bytes().to_vec())
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Addressing result of a successful upload: the chat the document landed
/// in and the message wrapping it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

impl MessageRef {
    /// The free-form location payload persisted with the upload record.
    pub fn location_data(&self) -> serde_json::Value {
        serde_json::json!({
            "chat_id": self.chat_id,
            "message_id": self.message_id,
        })
    }
}

/// Storage abstraction trait
///
/// A handle on one backend account. The upload router only ever calls this
/// one capability; everything else about a backend (its class, its position
/// in a pool) lives outside the handle.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store the file, returning where it landed.
    async fn upload(&self, file: &FilePayload, caption: Option<&str>)
        -> StorageResult<MessageRef>;
}
