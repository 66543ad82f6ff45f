//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tgvault API",
        version = "0.1.0",
        description = "File hosting backed by pooled Telegram storage accounts. Uploads are distributed round-robin across bot accounts, falling back to user-session gateways, and every stored file gets a durable metadata record."
    ),
    paths(handlers::upload::upload_file),
    components(schemas(tgvault_core::UploadResponse, error::ErrorResponse)),
    tags(
        (name = "files", description = "File upload routing")
    )
)]
pub struct ApiDoc;

/// Serve the OpenAPI spec as JSON.
pub async fn serve_openapi() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}
