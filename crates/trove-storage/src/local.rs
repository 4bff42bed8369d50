use crate::traits::{Locator, ReadOutcome, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use trove_core::StorageBackend;

/// Local filesystem storage implementation
///
/// Files live under one fixed private root that is not web-accessible;
/// serving goes through the application, never directly off the directory.
/// Writes are single-writer: there is no protection against two concurrent
/// writers to the same path, last writer wins.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/trove/media")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a storage path to a filesystem path with security validation.
    ///
    /// Storage paths are only ever built from UUID segments and generated
    /// filenames, but this is the trust boundary: anything carrying traversal
    /// sequences is rejected here rather than silently normalized.
    fn resolve(&self, storage_path: &str) -> StorageResult<PathBuf> {
        if storage_path.contains("..") || storage_path.starts_with('/') {
            return Err(StorageError::InvalidPath(
                "Storage path contains invalid characters".to_string(),
            ));
        }

        Ok(self.base_path.join(storage_path))
    }

    /// The local backend only understands path-shaped locators. A URL locator
    /// here means the record was written by the remote backend.
    fn path_of<'a>(&self, locator: &'a Locator) -> StorageResult<&'a str> {
        match locator {
            Locator::Path(p) => Ok(p),
            Locator::Url(u) => Err(StorageError::InvalidPath(format!(
                "URL locator not addressable by local backend: {}",
                u
            ))),
        }
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn upload(
        &self,
        storage_path: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<Locator> {
        let path = self.resolve(storage_path)?;
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            storage_path = %storage_path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        // The locator is the relative path as given; absolute resolution
        // stays internal to this backend.
        Ok(Locator::Path(storage_path.to_string()))
    }

    async fn get_buffer(&self, locator: &Locator) -> StorageResult<ReadOutcome> {
        let storage_path = self.path_of(locator)?;
        let path = self.resolve(storage_path)?;
        let start = std::time::Instant::now();

        match fs::read(&path).await {
            Ok(data) => {
                tracing::info!(
                    path = %path.display(),
                    storage_path = %storage_path,
                    size_bytes = data.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Local storage read successful"
                );
                Ok(ReadOutcome::Found(Bytes::from(data)))
            }
            // File missing is the absent sentinel; every other OS error is a
            // real storage failure and propagates.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ReadOutcome::NotFound),
            Err(e) => Err(StorageError::DownloadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn delete(&self, locator: &Locator) -> StorageResult<()> {
        let storage_path = match locator {
            Locator::Path(p) => p,
            Locator::Url(u) => {
                tracing::warn!(url = %u, "Ignoring URL locator on local delete");
                return Ok(());
            }
        };
        let path = self.resolve(storage_path)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(
                    path = %path.display(),
                    storage_path = %storage_path,
                    "Local storage delete successful"
                );
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, locator: &Locator) -> StorageResult<bool> {
        let storage_path = self.path_of(locator)?;
        let path = self.resolve(storage_path)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use uuid::Uuid;

    fn path_locator(s: &str) -> Locator {
        Locator::Path(s.to_string())
    }

    #[tokio::test]
    async fn test_upload_returns_given_path_and_round_trips() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let tenant = Uuid::new_v4();
        let asset = Uuid::new_v4();
        let storage_path = format!("{}/assets/{}/123-abcdef.jpg", tenant, asset);
        let data = b"jpeg bytes".to_vec();

        let locator = storage
            .upload(&storage_path, "image/jpeg", data.clone())
            .await
            .unwrap();

        assert_eq!(locator, Locator::Path(storage_path.clone()));

        match storage.get_buffer(&locator).await.unwrap() {
            ReadOutcome::Found(bytes) => assert_eq!(bytes.as_ref(), data.as_slice()),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found_not_error() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let outcome = storage
            .get_buffer(&path_locator("t/assets/a/missing.jpg"))
            .await
            .unwrap();
        assert!(matches!(outcome, ReadOutcome::NotFound));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let locator = storage
            .upload("t/assets/a/file.jpg", "image/jpeg", b"x".to_vec())
            .await
            .unwrap();

        storage.delete(&locator).await.unwrap();
        // Second delete of the same object is still success
        storage.delete(&locator).await.unwrap();
        // As is deleting something never uploaded
        storage
            .delete(&path_locator("t/assets/a/never-existed.jpg"))
            .await
            .unwrap();

        assert!(!storage.exists(&locator).await.unwrap());
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.get_buffer(&path_locator("../../../etc/passwd")).await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = storage.exists(&path_locator("/etc/passwd")).await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));

        let result = storage
            .upload("../outside.jpg", "image/jpeg", b"x".to_vec())
            .await;
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }

    #[tokio::test]
    async fn test_url_locator_rejected_on_read_ignored_on_delete() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let url = Locator::Url("https://bucket.s3.amazonaws.com/t/a.jpg".to_string());
        assert!(matches!(
            storage.get_buffer(&url).await,
            Err(StorageError::InvalidPath(_))
        ));
        // Delete stays idempotent even for foreign locators
        storage.delete(&url).await.unwrap();
    }

    #[tokio::test]
    async fn test_exists_after_upload() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let locator = storage
            .upload("t/assets/a/here.jpg", "image/jpeg", b"data".to_vec())
            .await
            .unwrap();

        assert!(storage.exists(&locator).await.unwrap());
        assert!(!storage
            .exists(&path_locator("t/assets/a/elsewhere.jpg"))
            .await
            .unwrap());
    }
}
