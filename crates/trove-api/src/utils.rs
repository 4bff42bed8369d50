//! Multipart extraction helpers

use axum::extract::Multipart;
use trove_core::AppError;

use crate::services::upload::InboundFile;

/// Pull the `file` field out of a multipart request.
///
/// The whole body is buffered; the router's body limit bounds memory.
pub async fn extract_multipart_file(mut multipart: Multipart) -> Result<InboundFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .ok_or_else(|| {
                AppError::InvalidInput("File field is missing a content type".to_string())
            })?
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read file field: {}", e)))?
            .to_vec();

        if data.is_empty() {
            return Err(AppError::InvalidInput("File field is empty".to_string()));
        }

        return Ok(InboundFile {
            file_name,
            content_type,
            data,
        });
    }

    Err(AppError::InvalidInput(
        "Multipart body has no 'file' field".to_string(),
    ))
}
