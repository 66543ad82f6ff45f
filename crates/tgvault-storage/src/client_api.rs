//! User-session backend
//!
//! A handle on one user account, reached through a self-hosted Bot API
//! gateway that holds the account session (tdlib-based). Same wire format
//! as the bot class; the gateway base URL carries no token.

use async_trait::async_trait;

use crate::traits::{FilePayload, MessageRef, Storage, StorageError, StorageResult};
use crate::wire;

pub struct ClientApiStorage {
    http: reqwest::Client,
    base_url: String,
    chat_id: i64,
}

impl ClientApiStorage {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, chat_id: i64) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            chat_id,
        }
    }
}

#[async_trait]
impl Storage for ClientApiStorage {
    async fn upload(
        &self,
        file: &FilePayload,
        caption: Option<&str>,
    ) -> StorageResult<MessageRef> {
        let form = wire::send_document_form(self.chat_id, file, caption);

        let response = self
            .http
            .post(format!("{}/sendDocument", self.base_url))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        match wire::message_ref_from_response(&body) {
            Ok(message) => {
                tracing::debug!(
                    chat_id = message.chat_id,
                    message_id = message.message_id,
                    filename = %file.filename,
                    gateway = %self.base_url,
                    "Document stored via client backend"
                );
                Ok(message)
            }
            Err(StorageError::InvalidResponse(_)) if !status.is_success() => Err(
                StorageError::UploadFailed(format!("client gateway returned HTTP {}", status)),
            ),
            Err(err) => Err(err),
        }
    }
}
