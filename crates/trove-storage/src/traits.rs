//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must
//! implement, plus the locator and read-outcome types shared by consumers.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;
use trove_core::StorageBackend;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Invalid storage path: {0}")]
    InvalidPath(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Value returned by a storage write, required to later read or delete the
/// object.
///
/// The variant is decided by the backend: `Path` is a backend-relative
/// storage path (local filesystem), `Url` is an absolute URL the backend
/// chose itself (S3). Consumers must branch on the variant explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Locator {
    Path(String),
    Url(String),
}

impl Locator {
    pub fn as_str(&self) -> &str {
        match self {
            Locator::Path(p) => p,
            Locator::Url(u) => u,
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Locator::Url(_))
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Outcome of a read, distinguishing absence from transient failure.
///
/// `NotFound` means the object is genuinely absent at the locator and a 404
/// is the right answer. `Unavailable` means the backend could not be reached
/// or answered with a non-not-found failure; callers must not treat it as
/// absence.
#[derive(Debug)]
pub enum ReadOutcome {
    Found(Bytes),
    NotFound,
    Unavailable(String),
}

/// Storage abstraction trait
///
/// All storage backends (S3, local filesystem) must implement this trait.
/// Exactly one instance is constructed at startup and injected into the
/// services that need it; backends are cheap to construct and hold no
/// per-request state.
///
/// **Path format:** `{tenant_id}/assets/{asset_id}/{filename}`; see the
/// crate root documentation and the `paths` module.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` at `storage_path` and return the locator to persist.
    ///
    /// The returned locator is deterministic for a given path (no added
    /// randomness), so re-uploading at the same path overwrites the prior
    /// content. Uniqueness is the path builder's responsibility.
    async fn upload(
        &self,
        storage_path: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<Locator>;

    /// Read the full object at `locator`.
    ///
    /// Absence is a value ([`ReadOutcome::NotFound`]), not an error; errors
    /// are reserved for failures the backend can attribute to something other
    /// than the object (bad locator, local IO faults). Remote transport
    /// failures surface as [`ReadOutcome::Unavailable`].
    async fn get_buffer(&self, locator: &Locator) -> StorageResult<ReadOutcome>;

    /// Delete the object at `locator`. Idempotent: deleting a missing object
    /// succeeds on every backend.
    async fn delete(&self, locator: &Locator) -> StorageResult<()>;

    /// True iff a subsequent `get_buffer` would return bytes.
    async fn exists(&self, locator: &Locator) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_serde_is_tagged() {
        let loc = Locator::Url("https://cdn.example.com/a/b.jpg".to_string());
        let json = serde_json::to_string(&loc).unwrap();
        assert!(json.contains("\"kind\":\"url\""));

        let back: Locator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, loc);
    }

    #[test]
    fn test_locator_accessors() {
        let path = Locator::Path("t/assets/a/f.jpg".to_string());
        assert!(!path.is_url());
        assert_eq!(path.as_str(), "t/assets/a/f.jpg");
        assert_eq!(path.to_string(), "t/assets/a/f.jpg");
    }
}
