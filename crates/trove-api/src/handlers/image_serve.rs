use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use trove_core::constants::IMAGE_CACHE_CONTROL;
use trove_core::AppError;
use uuid::Uuid;

use crate::auth::TenantContext;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::serve::{resolve_image, ServeDecision};
use crate::state::AppState;

/// Serve an image's bytes or redirect to its CDN URL.
///
/// Picks the cheapest correct delivery path: redirect when a remote URL
/// exists, buffered read through the storage provider otherwise.
#[utoipa::path(
    get,
    path = "/api/v0/images/{id}/file",
    tag = "images",
    params(
        ("id" = Uuid, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image bytes", content_type = "application/octet-stream"),
        (status = 307, description = "Redirect to the remote image URL"),
        (status = 404, description = "Image not found", body = ErrorResponse),
        (status = 503, description = "Storage temporarily unavailable", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state),
    fields(tenant_id = %tenant_ctx.tenant_id, image_id = %id, operation = "serve_image")
)]
pub async fn serve_image(
    State(state): State<Arc<AppState>>,
    tenant_ctx: TenantContext,
    Path(id): Path<Uuid>,
) -> Result<Response, HttpAppError> {
    let image = state
        .images
        .get(tenant_ctx.tenant_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".to_string()))?;

    match resolve_image(&image, state.storage.as_ref()).await? {
        ServeDecision::Redirect(url) => Ok(Redirect::temporary(&url).into_response()),
        ServeDecision::Stream { data, content_type } => {
            let response = Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, data.len())
                .header(header::CACHE_CONTROL, IMAGE_CACHE_CONTROL)
                .body(Body::from(data))
                .map_err(|e| AppError::Internal(e.to_string()))?;
            Ok(response)
        }
        ServeDecision::NotFound => {
            Err(HttpAppError(AppError::NotFound("Image file not found".to_string())))
        }
    }
}
