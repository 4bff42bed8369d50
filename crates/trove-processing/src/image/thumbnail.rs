//! Thumbnail derivation - cover-fit crop to a fixed box

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use std::io::Cursor;
use trove_core::constants::{THUMBNAIL_HEIGHT, THUMBNAIL_JPEG_QUALITY, THUMBNAIL_WIDTH};

/// Output dimensions and encoding quality for thumbnail derivatives.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailSpec {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        ThumbnailSpec {
            width: THUMBNAIL_WIDTH,
            height: THUMBNAIL_HEIGHT,
            quality: THUMBNAIL_JPEG_QUALITY,
        }
    }
}

/// Produce a JPEG thumbnail of exactly `spec.width × spec.height`.
///
/// Cover fit: the source is scaled so the target box is completely filled,
/// then center-cropped. Output dimensions are exact for portrait, landscape,
/// and square inputs alike; no letterboxing.
pub fn create_thumbnail(data: &[u8], spec: &ThumbnailSpec) -> Result<Bytes, anyhow::Error> {
    let img = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    let thumb = img.resize_to_fill(spec.width, spec.height, FilterType::Lanczos3);

    // JPEG carries no alpha channel
    let rgb = DynamicImage::ImageRgb8(thumb.to_rgb8());

    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, spec.quality);
    rgb.write_with_encoder(encoder)?;

    Ok(Bytes::from(buffer))
}
