//! Bot API `sendDocument` wire format, shared by both backend classes.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::traits::{FilePayload, MessageRef, StorageError, StorageResult};

#[derive(Debug, Deserialize)]
pub(crate) struct SendDocumentResponse {
    ok: bool,
    #[serde(default)]
    result: Option<SentMessage>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SentMessage {
    message_id: i64,
    chat: Chat,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chat {
    id: i64,
}

/// Build the multipart form for a `sendDocument` call.
pub(crate) fn send_document_form(
    chat_id: i64,
    file: &FilePayload,
    caption: Option<&str>,
) -> Form {
    let document = Part::bytes(file.content.to_vec()).file_name(file.filename.clone());
    let mut form = Form::new()
        .text("chat_id", chat_id.to_string())
        .part("document", document);
    if let Some(caption) = caption {
        form = form.text("caption", caption.to_string());
    }
    form
}

/// Parse a `sendDocument` response body into the message address.
/// An `ok: false` body (the platform's way of reporting failure without an
/// HTTP error) maps to `UploadFailed`.
pub(crate) fn message_ref_from_response(body: &str) -> StorageResult<MessageRef> {
    let parsed: SendDocumentResponse = serde_json::from_str(body)
        .map_err(|e| StorageError::InvalidResponse(format!("malformed response: {}", e)))?;

    if !parsed.ok {
        return Err(StorageError::UploadFailed(
            parsed
                .description
                .unwrap_or_else(|| "backend returned ok=false".to_string()),
        ));
    }

    let message = parsed
        .result
        .ok_or_else(|| StorageError::InvalidResponse("ok response without result".to_string()))?;

    Ok(MessageRef {
        chat_id: message.chat.id,
        message_id: message.message_id,
    })
}
