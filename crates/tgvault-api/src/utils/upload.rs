//! Common utilities for the file upload handler

use axum::extract::Multipart;
use tgvault_core::AppError;
use tgvault_storage::FilePayload;

/// Extract the file payload and optional caption from a multipart form.
/// Exactly one field named "file" is accepted; a "caption" text field is
/// optional and an empty caption counts as absent.
pub async fn extract_upload_form(
    mut multipart: Multipart,
    max_size: usize,
) -> Result<(FilePayload, Option<String>), AppError> {
    let mut file: Option<FilePayload> = None;
    let mut caption: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "file" => {
                if file.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                let filename = field
                    .file_name()
                    .map(|s: &str| s.to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;
                file = Some(FilePayload::new(filename, data));
            }
            "caption" => {
                let text = field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read caption: {}", e))
                })?;
                if !text.is_empty() {
                    caption = Some(text);
                }
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::InvalidInput("No file provided".to_string()))?;
    validate_file_size(file.len(), max_size)?;

    Ok((file, caption))
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::PayloadTooLarge(format!(
            "File size exceeds maximum allowed size of {} MB",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_file_size_within_limit() {
        assert!(validate_file_size(10, 1024).is_ok());
        assert!(validate_file_size(1024, 1024).is_ok());
    }

    #[test]
    fn test_validate_file_size_over_limit() {
        let err = validate_file_size(2 * 1024 * 1024 + 1, 2 * 1024 * 1024).unwrap_err();
        match err {
            AppError::PayloadTooLarge(msg) => assert!(msg.contains("2 MB")),
            _ => panic!("Expected PayloadTooLarge variant"),
        }
    }
}
