//! Trove API Library
//!
//! This crate provides the HTTP API handlers, services, and application
//! setup for the asset-photo storage subsystem.

// Module declarations
mod api_doc;
mod handlers;
mod utils;

// Public modules
pub mod auth;
pub mod error;
pub mod repository;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-exports
pub use error::ErrorResponse;
pub use repository::{AssetImageRepository, InMemoryAssetImages};
pub use routes::router;
pub use services::serve::{resolve_image, ServeDecision};
pub use services::upload::{ImageUploadService, InboundFile};
pub use state::AppState;
