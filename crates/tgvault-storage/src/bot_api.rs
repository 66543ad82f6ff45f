//! Bot API backend
//!
//! A handle on one bot account. Uploads go through the public Bot API (or a
//! compatible server set via `TELEGRAM_API_BASE`) with the token in the
//! request path.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::traits::{FilePayload, MessageRef, Storage, StorageError, StorageResult};
use crate::wire;

pub struct BotApiStorage {
    http: reqwest::Client,
    api_base: String,
    token: SecretString,
    chat_id: i64,
}

impl BotApiStorage {
    pub fn new(
        http: reqwest::Client,
        api_base: impl Into<String>,
        token: SecretString,
        chat_id: i64,
    ) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            token,
            chat_id,
        }
    }

    fn send_document_url(&self) -> String {
        format!(
            "{}/bot{}/sendDocument",
            self.api_base,
            self.token.expose_secret()
        )
    }
}

#[async_trait]
impl Storage for BotApiStorage {
    async fn upload(
        &self,
        file: &FilePayload,
        caption: Option<&str>,
    ) -> StorageResult<MessageRef> {
        let form = wire::send_document_form(self.chat_id, file, caption);

        let response = self
            .http
            .post(self.send_document_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        // Error statuses still carry an ok=false JSON body with a
        // description; fall back to the raw status when they don't.
        match wire::message_ref_from_response(&body) {
            Ok(message) => {
                tracing::debug!(
                    chat_id = message.chat_id,
                    message_id = message.message_id,
                    filename = %file.filename,
                    "Document stored via bot backend"
                );
                Ok(message)
            }
            Err(StorageError::InvalidResponse(_)) if !status.is_success() => Err(
                StorageError::UploadFailed(format!("bot API returned HTTP {}", status)),
            ),
            Err(err) => Err(err),
        }
    }
}
