//! Trove Storage Library
//!
//! This crate provides the storage abstraction and implementations for Trove.
//! It includes the Storage trait and backends for S3 and the local filesystem.
//!
//! # Storage path format
//!
//! Storage paths are tenant- and asset-scoped:
//!
//! - `{tenant_id}/assets/{asset_id}/{filename}`
//!
//! Paths must not contain `..` or a leading `/`. Path and filename generation
//! is centralized in the `paths` module so all backends stay consistent.
//!
//! # Locators
//!
//! A write returns a [`Locator`], a tagged value whose shape depends on the
//! backend: the local backend hands back the relative path it was given, the
//! S3 backend hands back an absolute URL it chose itself. Callers persist the
//! locator as returned and branch on its variant, never infer shape from the
//! string.

pub mod factory;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod paths;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Locator, ReadOutcome, Storage, StorageError, StorageResult};
pub use trove_core::StorageBackend;
