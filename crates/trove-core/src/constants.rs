//! Fixed media limits and derivative settings.
//!
//! These are deliberately constants rather than configuration: the upload and
//! serving contracts depend on them staying stable across deployments.

/// Maximum accepted upload size in bytes (5 MiB). An upload of exactly this
/// size is accepted; one byte more is rejected before any storage work.
pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Maximum number of live images per asset. Checked before any I/O.
pub const MAX_IMAGES_PER_ASSET: usize = 10;

/// Content types accepted for asset photo uploads.
pub const ALLOWED_IMAGE_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

/// Thumbnail derivative dimensions (cover-fit, exact output size).
pub const THUMBNAIL_WIDTH: u32 = 300;
pub const THUMBNAIL_HEIGHT: u32 = 300;

/// JPEG quality for thumbnail derivatives.
pub const THUMBNAIL_JPEG_QUALITY: u8 = 80;

/// Thumbnails are always re-encoded as JPEG regardless of source format.
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

/// Filename prefix for thumbnail derivatives.
pub const THUMBNAIL_PREFIX: &str = "thumb_";

/// Maximum stored width for originals; wider sources are downscaled,
/// narrower sources pass through byte-identical.
pub const OPTIMIZE_MAX_WIDTH: u32 = 2000;

/// Cache directive for served image bytes. Derivatives are per-tenant
/// content, so the cache must be private.
pub const IMAGE_CACHE_CONTROL: &str = "private, max-age=86400";
