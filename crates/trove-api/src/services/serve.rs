//! Serving resolver
//!
//! Per-request decision over a persisted image record: redirect to a
//! remote/CDN URL when one exists, otherwise buffer bytes through the
//! storage provider. Tenant authorization has already happened by the time
//! this runs.

use bytes::Bytes;
use trove_core::constants::THUMBNAIL_CONTENT_TYPE;
use trove_core::models::AssetImage;
use trove_core::AppError;
use trove_storage::{Locator, ReadOutcome, Storage};

/// How to answer a request for an image's bytes.
#[derive(Debug)]
pub enum ServeDecision {
    /// Send the client to the remote URL; cheapest path, CDN-capable.
    Redirect(String),
    /// Serve buffered bytes with the given content type.
    Stream { data: Bytes, content_type: String },
    /// No artifact exists for this record.
    NotFound,
}

/// Resolve a record to a serving decision.
///
/// Precedence: remote thumbnail URL, then remote original URL (only when no
/// local thumbnail is recorded, since a local derivative is cheaper than
/// relaying the full original), then a buffered read of the thumbnail path
/// falling back to the original path. Records can carry any subset of
/// locators, including none.
pub async fn resolve_image(
    image: &AssetImage,
    storage: &dyn Storage,
) -> Result<ServeDecision, AppError> {
    if let Some(url) = &image.thumb_blob_url {
        return Ok(ServeDecision::Redirect(url.clone()));
    }

    if image.thumb_path.is_none() {
        if let Some(url) = &image.blob_url {
            return Ok(ServeDecision::Redirect(url.clone()));
        }
    }

    let (path, is_thumb) = match (&image.thumb_path, &image.file_path) {
        (Some(p), _) => (p.clone(), true),
        (None, Some(p)) => (p.clone(), false),
        (None, None) => return Ok(ServeDecision::NotFound),
    };

    match storage
        .get_buffer(&Locator::Path(path))
        .await
        .map_err(|e| AppError::Storage(e.to_string()))?
    {
        ReadOutcome::Found(data) => Ok(ServeDecision::Stream {
            data,
            // Thumbnails are always JPEG regardless of the source format
            content_type: if is_thumb {
                THUMBNAIL_CONTENT_TYPE.to_string()
            } else {
                image.mime_type.clone()
            },
        }),
        ReadOutcome::NotFound => Ok(ServeDecision::NotFound),
        // Outage is not absence; let the caller answer 5xx, not 404
        ReadOutcome::Unavailable(reason) => Err(AppError::StorageUnavailable(reason)),
    }
}
