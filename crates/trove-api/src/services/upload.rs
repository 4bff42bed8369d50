//! Image upload orchestrator
//!
//! Validates an inbound file, derives the thumbnail, writes both artifacts
//! through the storage provider, and returns the metadata the caller
//! persists. Validation happens strictly before any pipeline or storage
//! work; the two artifact writes follow a fixed two-step protocol with a
//! compensating delete, so a single invocation never leaves an orphan behind
//! (a process crash between the steps still can; that gap is accepted).

use bytes::Bytes;
use std::sync::Arc;
use trove_core::constants::{
    ALLOWED_IMAGE_CONTENT_TYPES, MAX_FILE_SIZE_BYTES, MAX_IMAGES_PER_ASSET, OPTIMIZE_MAX_WIDTH,
    THUMBNAIL_CONTENT_TYPE, THUMBNAIL_PREFIX,
};
use trove_core::models::NewAssetImage;
use trove_core::AppError;
use trove_processing::{create_thumbnail, extract_metadata, optimize, ThumbnailSpec};
use trove_storage::{paths, Locator, Storage};
use uuid::Uuid;

/// A file received from the client, fully buffered.
pub struct InboundFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

pub struct ImageUploadService {
    storage: Arc<dyn Storage>,
}

impl ImageUploadService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Run the full upload sequence for one file.
    ///
    /// `current_count` is the asset's live image count as read by the caller;
    /// it drives the per-asset limit, the primary flag (first image wins,
    /// permanently), and the sort order (append position, never renumbered).
    pub async fn upload(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
        current_count: usize,
        file: InboundFile,
    ) -> Result<NewAssetImage, AppError> {
        // Validation first, no I/O yet
        if current_count >= MAX_IMAGES_PER_ASSET {
            return Err(AppError::LimitExceeded {
                resource: "images per asset".to_string(),
                used: current_count,
                limit: MAX_IMAGES_PER_ASSET,
            });
        }

        if !ALLOWED_IMAGE_CONTENT_TYPES.contains(&file.content_type.as_str()) {
            return Err(AppError::InvalidInput(format!(
                "Unsupported content type: {}",
                file.content_type
            )));
        }

        if file.data.len() > MAX_FILE_SIZE_BYTES {
            return Err(AppError::PayloadTooLarge(format!(
                "File is {} bytes, limit is {}",
                file.data.len(),
                MAX_FILE_SIZE_BYTES
            )));
        }

        // Derivative and optimization are CPU-bound; keep them off the runtime
        let raw = file.data;
        let (original, thumbnail) = tokio::task::spawn_blocking(move || {
            let metadata = extract_metadata(&raw)
                .map_err(|e| AppError::ImageProcessing(format!("Invalid image file: {}", e)))?;
            tracing::debug!(
                width = ?metadata.width,
                height = ?metadata.height,
                format = ?metadata.format,
                "Processing upload"
            );

            let thumbnail = create_thumbnail(&raw, &ThumbnailSpec::default())
                .map_err(|e| AppError::ImageProcessing(e.to_string()))?;
            let original = optimize(&raw, OPTIMIZE_MAX_WIDTH)
                .map_err(|e| AppError::ImageProcessing(e.to_string()))?;
            Ok::<(Bytes, Bytes), AppError>((original, thumbnail))
        })
        .await
        .map_err(|e| AppError::Internal(format!("Image processing task failed: {}", e)))??;

        let original_name = paths::build_filename("", &file.file_name);
        let thumb_name = paths::build_filename_with_ext(THUMBNAIL_PREFIX, "jpg");
        let original_path = paths::build_storage_path(tenant_id, asset_id, &original_name);
        let thumb_path = paths::build_storage_path(tenant_id, asset_id, &thumb_name);

        // Two-step write: thumbnail first, then original. If the second step
        // fails, the first is compensated before the error propagates.
        let thumb_locator = self
            .storage
            .upload(&thumb_path, THUMBNAIL_CONTENT_TYPE, thumbnail.to_vec())
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        let original_locator = match self
            .storage
            .upload(&original_path, &file.content_type, original.to_vec())
            .await
        {
            Ok(locator) => locator,
            Err(e) => {
                if let Err(cleanup_err) = self.storage.delete(&thumb_locator).await {
                    tracing::warn!(
                        error = %cleanup_err,
                        locator = %thumb_locator,
                        "Failed to clean up thumbnail after original upload error"
                    );
                }
                return Err(AppError::Storage(e.to_string()));
            }
        };

        tracing::info!(
            tenant_id = %tenant_id,
            asset_id = %asset_id,
            original = %original_locator,
            thumbnail = %thumb_locator,
            size_bytes = original.len(),
            "Image upload complete"
        );

        let mut record = NewAssetImage {
            file_name: file.file_name,
            file_path: None,
            thumb_path: None,
            blob_url: None,
            thumb_blob_url: None,
            mime_type: file.content_type,
            size: original.len() as i64,
            is_primary: current_count == 0,
            sort_order: current_count as i32,
        };

        match original_locator {
            Locator::Path(p) => record.file_path = Some(p),
            Locator::Url(u) => record.blob_url = Some(u),
        }
        match thumb_locator {
            Locator::Path(p) => record.thumb_path = Some(p),
            Locator::Url(u) => record.thumb_blob_url = Some(u),
        }

        Ok(record)
    }
}
