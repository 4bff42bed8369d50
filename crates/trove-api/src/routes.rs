//! Route table and middleware stack.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use trove_core::constants::MAX_FILE_SIZE_BYTES;
use utoipa::OpenApi;

use crate::api_doc::ApiDoc;
use crate::handlers::{image_delete, image_list, image_serve, image_upload};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = setup_cors(&state.config.cors_origins);

    Router::new()
        .route(
            "/api/v0/assets/{asset_id}/images",
            post(image_upload::upload_image).get(image_list::list_images),
        )
        .route("/api/v0/images/{id}/file", get(image_serve::serve_image))
        .route("/api/v0/images/{id}", delete(image_delete::delete_image))
        .route(
            "/api-doc/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .route("/health", get(|| async { "ok" }))
        // Axum's default body limit is below the 5 MiB file ceiling; the
        // orchestrator still enforces the exact per-file limit itself.
        .layer(DefaultBodyLimit::max(MAX_FILE_SIZE_BYTES + 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Setup CORS configuration
fn setup_cors(origins: &[String]) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE, Method::OPTIONS];

    if origins.iter().any(|o| o == "*") {
        tracing::warn!("CORS configured to allow all origins - not recommended for production");
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|o| match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(parsed)
            .allow_methods(methods)
            .allow_headers(Any)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_cors_accepts_both_shapes() {
        // Wildcard and explicit-origin configurations both yield a layer;
        // unparseable entries are skipped rather than failing startup.
        let _ = setup_cors(&["*".to_string()]);
        let _ = setup_cors(&[
            "https://app.example.com".to_string(),
            "not a header value\u{7f}".to_string(),
        ]);
    }
}
