use crate::traits::{Locator, ReadOutcome, Storage, StorageError, StorageResult};
use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path as ObjectPath;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, PutPayload};
use trove_core::StorageBackend;

/// S3 storage implementation
///
/// Objects are written at exactly the given storage path with no randomized
/// suffix, so the resulting URL is reproducible from the path. Re-uploading
/// at the same path overwrites with no versioning; filename uniqueness is the
/// path builder's job, not this backend's.
#[derive(Clone)]
pub struct S3Storage {
    store: AmazonS3,
    bucket: String,
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO, "https://nyc3.digitaloceanspaces.com" for DigitalOcean Spaces)
    pub async fn new(
        bucket: String,
        region: String,
        endpoint_url: Option<String>,
    ) -> StorageResult<Self> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(S3Storage {
            store,
            bucket,
            region,
            endpoint_url,
        })
    }

    /// Generate public URL for an S3 object
    ///
    /// For AWS S3, uses the standard format: https://{bucket}.s3.{region}.amazonaws.com/{key}
    /// For S3-compatible providers, uses path-style with the configured endpoint
    fn generate_url(&self, key: &str) -> String {
        format!("{}{}", self.url_prefix(), key)
    }

    /// The URL prefix (including trailing slash) shared by every object this
    /// backend writes. Also used to map persisted URLs back to keys.
    fn url_prefix(&self) -> String {
        if let Some(ref endpoint) = self.endpoint_url {
            let base_url = endpoint.trim_end_matches('/');
            format!("{}/{}/", base_url, self.bucket)
        } else {
            format!("https://{}.s3.{}.amazonaws.com/", self.bucket, self.region)
        }
    }

    /// Resolve a locator to an object key. Path locators are used as-is;
    /// URL locators must be URLs this backend generated.
    fn key_of(&self, locator: &Locator) -> StorageResult<String> {
        match locator {
            Locator::Path(p) => Ok(p.clone()),
            Locator::Url(u) => u
                .strip_prefix(&self.url_prefix())
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::InvalidPath(format!(
                        "URL locator does not belong to bucket {}: {}",
                        self.bucket, u
                    ))
                }),
        }
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn upload(
        &self,
        storage_path: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<Locator> {
        let size = data.len() as u64;
        let bytes = Bytes::from(data);
        let location = ObjectPath::from(storage_path.to_string());

        let start = std::time::Instant::now();

        self.store
            .put(&location, PutPayload::from(bytes))
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %storage_path,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let url = self.generate_url(storage_path);

        tracing::info!(
            bucket = %self.bucket,
            key = %storage_path,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 upload successful"
        );

        Ok(Locator::Url(url))
    }

    async fn get_buffer(&self, locator: &Locator) -> StorageResult<ReadOutcome> {
        let key = self.key_of(locator)?;
        let location = ObjectPath::from(key.clone());
        let start = std::time::Instant::now();

        let result = match self.store.get(&location).await {
            Ok(result) => result,
            Err(ObjectStoreError::NotFound { .. }) => return Ok(ReadOutcome::NotFound),
            // Transport and server failures are not absence; surface them as
            // unavailability so callers can distinguish 404 from outage.
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 read failed"
                );
                return Ok(ReadOutcome::Unavailable(e.to_string()));
            }
        };

        match result.bytes().await {
            Ok(bytes) => {
                tracing::info!(
                    bucket = %self.bucket,
                    key = %key,
                    size_bytes = bytes.len(),
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 read successful"
                );
                Ok(ReadOutcome::Found(bytes))
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 body read failed"
                );
                Ok(ReadOutcome::Unavailable(e.to_string()))
            }
        }
    }

    async fn delete(&self, locator: &Locator) -> StorageResult<()> {
        let key = self.key_of(locator)?;
        let location = ObjectPath::from(key.clone());
        let start = std::time::Instant::now();

        match self.store.delete(&location).await {
            Ok(()) => {
                tracing::info!(
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 delete successful"
                );
            }
            Err(ObjectStoreError::NotFound { .. }) => {}
            // Best-effort: the referencing record may already be gone by the
            // time cleanup runs, so an orphaned object beats a failed request.
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "S3 delete failed, leaving object behind"
                );
            }
        }

        Ok(())
    }

    async fn exists(&self, locator: &Locator) -> StorageResult<bool> {
        let key = self.key_of(locator)?;
        let location = ObjectPath::from(key);
        match self.store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}

#[cfg(all(test, feature = "storage-s3"))]
mod tests {
    use super::*;

    async fn test_store() -> S3Storage {
        S3Storage::new("trove-test".to_string(), "eu-west-1".to_string(), None)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_url_generation_aws() {
        let storage = test_store().await;
        assert_eq!(
            storage.generate_url("t/assets/a/f.jpg"),
            "https://trove-test.s3.eu-west-1.amazonaws.com/t/assets/a/f.jpg"
        );
    }

    #[tokio::test]
    async fn test_url_generation_custom_endpoint() {
        let storage = S3Storage::new(
            "trove-test".to_string(),
            "us-east-1".to_string(),
            Some("http://localhost:9000/".to_string()),
        )
        .await
        .unwrap();

        assert_eq!(
            storage.generate_url("t/f.jpg"),
            "http://localhost:9000/trove-test/t/f.jpg"
        );
    }

    #[tokio::test]
    async fn test_key_of_round_trips_generated_urls() {
        let storage = test_store().await;
        let url = storage.generate_url("t/assets/a/f.jpg");
        let key = storage.key_of(&Locator::Url(url)).unwrap();
        assert_eq!(key, "t/assets/a/f.jpg");

        // Path locators pass through untouched
        let key = storage
            .key_of(&Locator::Path("t/assets/a/f.jpg".to_string()))
            .unwrap();
        assert_eq!(key, "t/assets/a/f.jpg");
    }

    #[tokio::test]
    async fn test_key_of_rejects_foreign_urls() {
        let storage = test_store().await;
        let result = storage.key_of(&Locator::Url(
            "https://other-bucket.s3.eu-west-1.amazonaws.com/f.jpg".to_string(),
        ));
        assert!(matches!(result, Err(StorageError::InvalidPath(_))));
    }
}
