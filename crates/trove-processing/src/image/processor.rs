//! Image metadata extraction

use serde::Serialize;
use std::io::Cursor;

/// Best-effort image metadata. Any field may be absent when the decoder
/// cannot determine it.
#[derive(Debug, Clone, Serialize)]
pub struct ImageMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
}

/// Extract width, height and format from encoded image bytes.
///
/// Dimension probing is header-only; a recognized format with an unreadable
/// header still yields metadata with absent dimensions. Input whose format
/// cannot even be guessed is a hard error.
pub fn extract_metadata(data: &[u8]) -> Result<ImageMetadata, anyhow::Error> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader.format();

    if format.is_none() {
        anyhow::bail!("unrecognized image format");
    }

    let dimensions = reader.into_dimensions().ok();

    Ok(ImageMetadata {
        width: dimensions.map(|(w, _)| w),
        height: dimensions.map(|(_, h)| h),
        format: format.map(|f| format!("{:?}", f).to_lowercase()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage};

    fn png_image(width: u32, height: u32) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb([5, 5, 5]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_extract_metadata() {
        let meta = extract_metadata(&png_image(120, 80)).unwrap();
        assert_eq!(meta.width, Some(120));
        assert_eq!(meta.height, Some(80));
        assert_eq!(meta.format.as_deref(), Some("png"));
    }

    #[test]
    fn test_unrecognized_input_is_an_error() {
        assert!(extract_metadata(b"plain text").is_err());
    }

    #[test]
    fn test_truncated_header_yields_absent_dimensions() {
        // A valid PNG signature with the rest cut off: format is guessable,
        // dimensions are not.
        let mut data = png_image(64, 64);
        data.truncate(10);
        let meta = extract_metadata(&data).unwrap();
        assert_eq!(meta.format.as_deref(), Some("png"));
        assert_eq!(meta.width, None);
        assert_eq!(meta.height, None);
    }
}
