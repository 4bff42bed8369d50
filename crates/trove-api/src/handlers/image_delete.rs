use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use trove_core::models::AssetImage;
use trove_core::AppError;
use trove_storage::Locator;
use uuid::Uuid;

use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// Delete an image record and both of its storage artifacts.
///
/// Storage deletes are idempotent and best-effort: the record is the source
/// of truth, and an orphaned object is preferable to a record pointing at
/// freed storage. Primary status is never reassigned here.
#[utoipa::path(
    delete,
    path = "/api/v0/images/{id}",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 204, description = "Image deleted"),
        (status = 404, description = "Image not found", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(tenant_id = %tenant_ctx.tenant_id, image_id = %id, operation = "delete_image")
)]
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    tenant_ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, HttpAppError> {
    let image = state
        .images
        .delete(tenant_ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    for locator in locators_of(&image) {
        if let Err(e) = state.storage.delete(&locator).await {
            tracing::warn!(
                error = %e,
                locator = %locator,
                image_id = %id,
                "Failed to delete storage artifact for removed image"
            );
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Every storage artifact a record references, across both locator shapes.
fn locators_of(image: &AssetImage) -> Vec<Locator> {
    let mut locators = Vec::new();
    if let Some(p) = &image.file_path {
        locators.push(Locator::Path(p.clone()));
    }
    if let Some(p) = &image.thumb_path {
        locators.push(Locator::Path(p.clone()));
    }
    if let Some(u) = &image.blob_url {
        locators.push(Locator::Url(u.clone()));
    }
    if let Some(u) = &image.thumb_blob_url {
        locators.push(Locator::Url(u.clone()));
    }
    locators
}
