use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use trove_core::models::AssetImageResponse;
use uuid::Uuid;

use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::state::AppState;

/// List an asset's images, ordered by sort order.
#[utoipa::path(
    get,
    path = "/api/v0/assets/{asset_id}/images",
    tag = "images",
    params(
        ("asset_id" = Uuid, Path, description = "Asset ID")
    ),
    responses(
        (status = 200, description = "Images for the asset", body = [AssetImageResponse]),
        (status = 401, description = "Missing tenant context", body = ErrorResponse)
    )
)]
pub async fn list_images(
    State(state): State<Arc<AppState>>,
    tenant_ctx: TenantContext,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<Vec<AssetImageResponse>>, HttpAppError> {
    let images = state
        .images
        .list_for_asset(tenant_ctx.tenant_id, asset_id)
        .await?;

    Ok(Json(
        images.into_iter().map(AssetImageResponse::from).collect(),
    ))
}
