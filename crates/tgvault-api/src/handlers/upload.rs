use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tgvault_core::UploadResponse;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::UploadOutcome;
use crate::state::AppState;
use crate::utils::upload::extract_upload_form;

/// Upload file handler
///
/// Extracts the file and optional caption from the multipart form, then
/// delegates routing (backend selection, fallback, persistence) to the
/// upload router.
///
/// # Returns
/// `UploadResponse` with the persisted record on success (HTTP 201 Created);
/// 503 when no backend produced a result.
#[utoipa::path(
    post,
    path = "/api/v0/files",
    tag = "files",
    request_body(content = inline(Object), content_type = "multipart/form-data",
        description = "Form with a required 'file' field and an optional 'caption' text field"),
    responses(
        (status = 201, description = "File stored and recorded", body = UploadResponse),
        (status = 400, description = "Invalid multipart input", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 503, description = "No storage backend accepted the upload", body = ErrorResponse),
        (status = 500, description = "Configuration or persistence error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(request_id = %uuid::Uuid::new_v4(), operation = "upload_file")
)]
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, HttpAppError> {
    let (file, caption) =
        extract_upload_form(multipart, state.config.max_file_size_bytes()).await?;

    tracing::debug!(
        filename = %file.filename,
        size = file.len(),
        has_caption = caption.is_some(),
        "Routing upload"
    );

    let outcome = state.uploader.route(file, caption.as_deref()).await?;

    match outcome {
        UploadOutcome::Stored(record) => Ok((
            StatusCode::CREATED,
            Json(UploadResponse::from(record)),
        )
            .into_response()),
        UploadOutcome::Exhausted => Ok((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(
                "No storage backend accepted the upload",
                "STORAGE_EXHAUSTED",
            )),
        )
            .into_response()),
    }
}
