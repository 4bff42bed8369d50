use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A photo attached to an asset, scoped to one tenant.
///
/// Locator fields come in two shapes depending on which storage backend wrote
/// the artifact: `file_path`/`thumb_path` are backend-relative paths (local
/// filesystem era), `blob_url`/`thumb_blob_url` are absolute URLs (remote
/// object store). Any subset may be absent; records created before a backend
/// switch carry a transitional mix, and every consumer must tolerate that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetImage {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub asset_id: Uuid,
    /// Original upload name, display-only. Never used to address storage.
    pub file_name: String,
    pub file_path: Option<String>,
    pub thumb_path: Option<String>,
    pub blob_url: Option<String>,
    pub thumb_blob_url: Option<String>,
    pub mime_type: String,
    pub size: i64,
    /// Exactly one image per asset is primary, decided when the asset's
    /// first image is created and never reassigned here.
    pub is_primary: bool,
    /// Position at upload time (current image count); never renumbered.
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

/// Metadata produced by a successful upload, ready to persist.
///
/// Exactly one of `file_path`/`blob_url` is set for the original, and one of
/// `thumb_path`/`thumb_blob_url` for the derivative, depending on the backend
/// that handled the write.
#[derive(Debug, Clone)]
pub struct NewAssetImage {
    pub file_name: String,
    pub file_path: Option<String>,
    pub thumb_path: Option<String>,
    pub blob_url: Option<String>,
    pub thumb_blob_url: Option<String>,
    pub mime_type: String,
    pub size: i64,
    pub is_primary: bool,
    pub sort_order: i32,
}

/// API representation of an asset image record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AssetImageResponse {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub file_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumb_blob_url: Option<String>,
    pub mime_type: String,
    pub size: i64,
    pub is_primary: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AssetImage> for AssetImageResponse {
    fn from(image: AssetImage) -> Self {
        AssetImageResponse {
            id: image.id,
            asset_id: image.asset_id,
            file_name: image.file_name,
            file_path: image.file_path,
            thumb_path: image.thumb_path,
            blob_url: image.blob_url,
            thumb_blob_url: image.thumb_blob_url,
            mime_type: image.mime_type,
            size: image.size,
            is_primary: image.is_primary,
            sort_order: image.sort_order,
            created_at: image.created_at,
        }
    }
}
