//! Trove Processing Library
//!
//! Pure image transformation functions for the asset-photo pipeline:
//! cover-fit thumbnail derivation, best-effort metadata extraction, and
//! size-bounded optimization of originals. No I/O happens here; callers own
//! buffers and storage.

pub mod image;

pub use crate::image::{
    create_thumbnail, extract_metadata, optimize, ImageMetadata, ThumbnailSpec,
};
