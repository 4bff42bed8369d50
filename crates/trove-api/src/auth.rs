//! Tenant context extraction.
//!
//! Identity resolution and tenant-membership checks live upstream (gateway or
//! session layer); by the time a request reaches these handlers it carries a
//! validated tenant id in the `x-tenant-id` header. This extractor only
//! parses that header and performs no policy decisions of its own.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use trove_core::AppError;
use uuid::Uuid;

use crate::error::HttpAppError;

pub const TENANT_HEADER: &str = "x-tenant-id";

/// Validated tenant scope for a request.
#[derive(Debug, Clone, Copy)]
pub struct TenantContext {
    pub tenant_id: Uuid,
}

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = HttpAppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                HttpAppError(AppError::Unauthorized("Missing tenant context".to_string()))
            })?;

        let tenant_id = raw.parse::<Uuid>().map_err(|_| {
            HttpAppError(AppError::Unauthorized("Invalid tenant context".to_string()))
        })?;

        Ok(TenantContext { tenant_id })
    }
}
