//! Asset image repository port.
//!
//! The relational persistence layer is an external collaborator; this trait
//! is the seam the upload and serving paths depend on. The in-memory
//! implementation backs tests and standalone deployments.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;
use trove_core::models::{AssetImage, NewAssetImage};
use trove_core::AppError;
use uuid::Uuid;

#[async_trait]
pub trait AssetImageRepository: Send + Sync {
    /// Live image count for an asset; drives the per-asset limit and the
    /// primary/sort-order assignment.
    async fn count_for_asset(&self, tenant_id: Uuid, asset_id: Uuid) -> Result<usize, AppError>;

    async fn insert(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
        new: NewAssetImage,
    ) -> Result<AssetImage, AppError>;

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<AssetImage>, AppError>;

    async fn list_for_asset(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
    ) -> Result<Vec<AssetImage>, AppError>;

    /// Remove the record, returning it so the caller can clean up storage.
    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<AssetImage>, AppError>;
}

/// In-memory repository keyed by image id. Tenant scoping is enforced on
/// every lookup, mirroring the tenant-scoped queries of the real layer.
#[derive(Default)]
pub struct InMemoryAssetImages {
    inner: RwLock<HashMap<Uuid, AssetImage>>,
}

impl InMemoryAssetImages {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AssetImageRepository for InMemoryAssetImages {
    async fn count_for_asset(&self, tenant_id: Uuid, asset_id: Uuid) -> Result<usize, AppError> {
        let map = self.inner.read().await;
        Ok(map
            .values()
            .filter(|img| img.tenant_id == tenant_id && img.asset_id == asset_id)
            .count())
    }

    async fn insert(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
        new: NewAssetImage,
    ) -> Result<AssetImage, AppError> {
        let image = AssetImage {
            id: Uuid::new_v4(),
            tenant_id,
            asset_id,
            file_name: new.file_name,
            file_path: new.file_path,
            thumb_path: new.thumb_path,
            blob_url: new.blob_url,
            thumb_blob_url: new.thumb_blob_url,
            mime_type: new.mime_type,
            size: new.size,
            is_primary: new.is_primary,
            sort_order: new.sort_order,
            created_at: Utc::now(),
        };

        self.inner.write().await.insert(image.id, image.clone());
        Ok(image)
    }

    async fn get(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<AssetImage>, AppError> {
        let map = self.inner.read().await;
        Ok(map
            .get(&id)
            .filter(|img| img.tenant_id == tenant_id)
            .cloned())
    }

    async fn list_for_asset(
        &self,
        tenant_id: Uuid,
        asset_id: Uuid,
    ) -> Result<Vec<AssetImage>, AppError> {
        let map = self.inner.read().await;
        let mut images: Vec<AssetImage> = map
            .values()
            .filter(|img| img.tenant_id == tenant_id && img.asset_id == asset_id)
            .cloned()
            .collect();
        images.sort_by_key(|img| (img.sort_order, img.created_at));
        Ok(images)
    }

    async fn delete(&self, tenant_id: Uuid, id: Uuid) -> Result<Option<AssetImage>, AppError> {
        let mut map = self.inner.write().await;
        match map.get(&id) {
            Some(img) if img.tenant_id == tenant_id => Ok(map.remove(&id)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_image(name: &str, sort_order: i32) -> NewAssetImage {
        NewAssetImage {
            file_name: name.to_string(),
            file_path: Some(format!("t/assets/a/{}", name)),
            thumb_path: None,
            blob_url: None,
            thumb_blob_url: None,
            mime_type: "image/jpeg".to_string(),
            size: 10,
            is_primary: sort_order == 0,
            sort_order,
        }
    }

    #[tokio::test]
    async fn test_tenant_scoping_on_get() {
        let repo = InMemoryAssetImages::new();
        let tenant = Uuid::new_v4();
        let asset = Uuid::new_v4();

        let stored = repo.insert(tenant, asset, new_image("a.jpg", 0)).await.unwrap();

        assert!(repo.get(tenant, stored.id).await.unwrap().is_some());
        // Another tenant cannot see the record
        assert!(repo.get(Uuid::new_v4(), stored.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_count_and_list_are_per_asset() {
        let repo = InMemoryAssetImages::new();
        let tenant = Uuid::new_v4();
        let asset_a = Uuid::new_v4();
        let asset_b = Uuid::new_v4();

        repo.insert(tenant, asset_a, new_image("1.jpg", 0)).await.unwrap();
        repo.insert(tenant, asset_a, new_image("2.jpg", 1)).await.unwrap();
        repo.insert(tenant, asset_b, new_image("3.jpg", 0)).await.unwrap();

        assert_eq!(repo.count_for_asset(tenant, asset_a).await.unwrap(), 2);
        assert_eq!(repo.count_for_asset(tenant, asset_b).await.unwrap(), 1);

        let listed = repo.list_for_asset(tenant, asset_a).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].sort_order < listed[1].sort_order);
    }

    #[tokio::test]
    async fn test_delete_respects_tenant() {
        let repo = InMemoryAssetImages::new();
        let tenant = Uuid::new_v4();
        let asset = Uuid::new_v4();
        let stored = repo.insert(tenant, asset, new_image("a.jpg", 0)).await.unwrap();

        assert!(repo.delete(Uuid::new_v4(), stored.id).await.unwrap().is_none());
        assert!(repo.delete(tenant, stored.id).await.unwrap().is_some());
        assert!(repo.delete(tenant, stored.id).await.unwrap().is_none());
    }
}
