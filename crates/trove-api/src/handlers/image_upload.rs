use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use trove_core::models::AssetImageResponse;
use uuid::Uuid;

use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::upload::ImageUploadService;
use crate::state::AppState;
use crate::utils::extract_multipart_file;

/// Upload an asset photo.
///
/// Validates the file, derives the thumbnail, writes both artifacts through
/// the configured storage backend, and persists the record. The first image
/// of an asset becomes its primary image; sort order is the append position.
#[utoipa::path(
    post,
    path = "/api/v0/assets/{asset_id}/images",
    tag = "images",
    params(
        ("asset_id" = Uuid, Path, description = "Asset ID")
    ),
    responses(
        (status = 201, description = "Image uploaded successfully", body = AssetImageResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 409, description = "Per-asset image limit reached", body = ErrorResponse),
        (status = 413, description = "File too large", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, multipart),
    fields(tenant_id = %tenant_ctx.tenant_id, operation = "upload_image")
)]
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    tenant_ctx: TenantContext,
    Path(asset_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<AssetImageResponse>), HttpAppError> {
    let file = extract_multipart_file(multipart).await?;

    let current_count = state
        .images
        .count_for_asset(tenant_ctx.tenant_id, asset_id)
        .await?;

    let service = ImageUploadService::new(state.storage.clone());
    let new_image = service
        .upload(tenant_ctx.tenant_id, asset_id, current_count, file)
        .await?;

    let image = state
        .images
        .insert(tenant_ctx.tenant_id, asset_id, new_image)
        .await?;

    Ok((StatusCode::CREATED, Json(AssetImageResponse::from(image))))
}
