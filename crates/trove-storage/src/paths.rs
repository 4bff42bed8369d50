//! Shared filename and storage path generation.
//!
//! Filename format: `{prefix}{epoch_ms}-{rand6}.{ext}` where `rand6` is six
//! base36 characters and `ext` is the lowercased extension of the original
//! upload name, defaulting to `jpg`. Uniqueness is probabilistic (timestamp
//! plus random suffix); at expected upload rates a collision is vanishingly
//! unlikely, and paths are append-only per object so a collision would only
//! overwrite within the same tenant and asset.
//!
//! Storage path format: `{tenant_id}/assets/{asset_id}/{filename}`. Tenant
//! and asset ids are UUIDs, so a path can never escape its tenant prefix.

use rand::Rng;
use uuid::Uuid;

const RANDOM_SUFFIX_LEN: usize = 6;
const DEFAULT_EXTENSION: &str = "jpg";

/// Build a collision-resistant filename carrying the original name's
/// extension (lowercased, `jpg` when absent or unusable).
pub fn build_filename(prefix: &str, original_name: &str) -> String {
    build_filename_with_ext(prefix, &extension_of(original_name))
}

/// Build a filename with an explicit extension. Used for derivatives whose
/// format is fixed regardless of the source (thumbnails are always JPEG).
pub fn build_filename_with_ext(prefix: &str, ext: &str) -> String {
    format!(
        "{}{}-{}.{}",
        prefix,
        chrono::Utc::now().timestamp_millis(),
        random_suffix(),
        ext
    )
}

/// Build the tenant- and asset-scoped storage path for a filename.
pub fn build_storage_path(tenant_id: Uuid, asset_id: Uuid, filename: &str) -> String {
    format!("{}/assets/{}/{}", tenant_id, asset_id, filename)
}

/// Extract the extension from an upload name, lowercased. User-controlled
/// input: anything that isn't plain ASCII alphanumeric falls back to the
/// default rather than being normalized into a path segment.
fn extension_of(original_name: &str) -> String {
    let ext = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if ext.is_empty() || ext.len() > 8 || !ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        DEFAULT_EXTENSION.to_string()
    } else {
        ext
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| {
            let digit = rng.random_range(0..36u32);
            char::from_digit(digit, 36).unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_filename_format() {
        let name = build_filename("", "Photo.JPG");
        assert!(name.ends_with(".jpg"));
        let (stem, _) = name.rsplit_once('.').unwrap();
        let (ts, rand) = stem.split_once('-').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert_eq!(rand.len(), 6);
        assert!(rand.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_prefix_and_forced_extension() {
        let name = build_filename_with_ext("thumb_", "jpg");
        assert!(name.starts_with("thumb_"));
        assert!(name.ends_with(".jpg"));
    }

    #[test]
    fn test_extension_defaults() {
        assert!(build_filename("", "no-extension").ends_with(".jpg"));
        assert!(build_filename("", "photo.WebP").ends_with(".webp"));
        assert!(build_filename("", "trailing.").ends_with(".jpg"));
        // traversal characters in the extension never reach the filename
        assert!(build_filename("", "evil.jpg/../../x").ends_with(".jpg"));
        assert!(build_filename("", "evil.p/ng").ends_with(".jpg"));
    }

    #[test]
    fn test_storage_path_scheme() {
        let tenant = Uuid::new_v4();
        let asset = Uuid::new_v4();
        let path = build_storage_path(tenant, asset, "123-abc123.png");
        assert_eq!(path, format!("{}/assets/{}/123-abc123.png", tenant, asset));
        assert!(!path.starts_with('/'));
        assert!(!path.contains(".."));
    }

    #[test]
    fn test_filename_uniqueness() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(build_filename("", "same.jpg")));
        }
    }
}
