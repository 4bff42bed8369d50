//! Size-bounded optimization of stored originals

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use trove_core::constants::THUMBNAIL_JPEG_QUALITY;

/// Downscale an image so its width does not exceed `max_width`, preserving
/// aspect ratio and the source format. Never upsizes.
///
/// Sources already within the bound are returned byte-identical; the check
/// is a header-only dimension probe, so no decode or re-encode touches the
/// pass-through path.
pub fn optimize(data: &[u8], max_width: u32) -> Result<Bytes, anyhow::Error> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader
        .format()
        .ok_or_else(|| anyhow::anyhow!("unrecognized image format"))?;
    let (width, _) = reader.into_dimensions()?;

    if width <= max_width {
        return Ok(Bytes::copy_from_slice(data));
    }

    let img = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()?
        .decode()?;

    // Bound by width only; u32::MAX leaves height free to follow the ratio.
    let resized = img.resize(max_width, u32::MAX, FilterType::Lanczos3);

    tracing::debug!(
        from_width = width,
        to_width = resized.width(),
        format = ?format,
        "Downscaled oversized original"
    );

    let mut buffer = Vec::new();
    match format {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
            let encoder = JpegEncoder::new_with_quality(&mut buffer, THUMBNAIL_JPEG_QUALITY);
            rgb.write_with_encoder(encoder)?;
        }
        other => {
            resized.write_to(&mut Cursor::new(&mut buffer), other)?;
        }
    }

    Ok(Bytes::from(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage};

    fn encoded(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([0, 120, 0]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
        buffer
    }

    fn dimensions(data: &[u8]) -> (u32, u32) {
        image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap()
            .dimensions()
    }

    #[test]
    fn test_pass_through_is_byte_identical() {
        let src = encoded(800, 600, ImageFormat::Png);
        let out = optimize(&src, 2000).unwrap();
        assert_eq!(out.as_ref(), src.as_slice());
    }

    #[test]
    fn test_exact_bound_is_pass_through() {
        let src = encoded(2000, 500, ImageFormat::Png);
        let out = optimize(&src, 2000).unwrap();
        assert_eq!(out.as_ref(), src.as_slice());
    }

    #[test]
    fn test_oversized_is_downscaled_preserving_ratio() {
        let src = encoded(3000, 1500, ImageFormat::Png);
        let out = optimize(&src, 2000).unwrap();
        assert_eq!(dimensions(&out), (2000, 1000));
    }

    #[test]
    fn test_never_wider_than_input() {
        let src = encoded(1200, 900, ImageFormat::Jpeg);
        let out = optimize(&src, 2000).unwrap();
        let (w, _) = dimensions(&out);
        assert!(w <= 1200);
    }

    #[test]
    fn test_format_is_preserved_on_reencode() {
        let src = encoded(2500, 1000, ImageFormat::Png);
        let out = optimize(&src, 2000).unwrap();
        let reader = image::ImageReader::new(Cursor::new(out.as_ref()))
            .with_guessed_format()
            .unwrap();
        assert_eq!(reader.format(), Some(ImageFormat::Png));
    }

    #[test]
    fn test_invalid_input_is_an_error() {
        assert!(optimize(b"definitely not pixels", 2000).is_err());
    }
}
