//! Encoding an RGB [`PixelBuffer`] to JPEG or PNG bytes.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};

use super::EncodeError;
use crate::buffer::PixelBuffer;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageFormat {
    /// Lossy JPEG (the default save format).
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
}

impl ImageFormat {
    /// Choose a format from a file extension.
    ///
    /// `.png` selects PNG; anything else, including no extension, selects
    /// JPEG.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("png") => ImageFormat::Png,
            _ => ImageFormat::Jpeg,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
        }
    }
}

/// Encode a buffer to bytes in the given format.
///
/// # Arguments
///
/// * `image` - RGB buffer to encode
/// * `format` - Output format
/// * `quality` - JPEG quality (1-100); ignored for PNG
///
/// # Errors
///
/// Returns an error if the buffer is empty, its pixel data length does not
/// match its dimensions, or the encoder fails.
pub fn encode_image(
    image: &PixelBuffer,
    format: ImageFormat,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);

    // Validate dimensions
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Validate pixel data length
    let expected_len = (width as usize) * (height as usize) * 3;
    if image.pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    let result = match format {
        ImageFormat::Jpeg => JpegEncoder::new_with_quality(&mut buffer, quality.clamp(1, 100))
            .write_image(&image.pixels, width, height, ExtendedColorType::Rgb8),
        ImageFormat::Png => PngEncoder::new(&mut buffer).write_image(
            &image.pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
    };
    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::filled(width, height, [128, 128, 128])
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_image(&gray(100, 100), ImageFormat::Jpeg, 90).unwrap();

        // SOI at the start, EOI at the end
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_png_signature() {
        let png = encode_image(&gray(10, 10), ImageFormat::Png, 90).unwrap();
        assert_eq!(&png[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        assert!(encode_image(&gray(10, 10), ImageFormat::Jpeg, 0).is_ok());
        assert!(encode_image(&gray(10, 10), ImageFormat::Jpeg, 255).is_ok());
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let bad = PixelBuffer {
            width: 10,
            height: 10,
            pixels: vec![0; 100],
        };
        let result = encode_image(&bad, ImageFormat::Png, 90);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 300,
                actual: 100
            })
        ));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let empty = PixelBuffer::new(0, 10, vec![]);
        assert!(matches!(
            encode_image(&empty, ImageFormat::Jpeg, 90),
            Err(EncodeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(ImageFormat::from_path(Path::new("out.png")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("OUT.PNG")), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("out.jpg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("out.jpeg")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("out")), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("out.tif")), ImageFormat::Jpeg);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    }
}
