//! The RGB pixel buffer every other module operates on.

use crate::error::EditError;

/// A 3-channel, 8-bit RGB raster in row-major order.
///
/// Buffers are never shared between edit states: every edit produces a new
/// buffer, and copies are made explicitly with `clone()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length should be width * height * 3.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from untrusted data, validating the byte length.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidPixelData` if `pixels.len()` is not
    /// `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, EditError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(EditError::InvalidPixelData {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a buffer with every pixel set to `color`.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let count = (width as usize) * (height as usize);
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a PixelBuffer from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage for further processing.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the RGB value at (x, y), or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.index(x, y);
        Some([self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]])
    }

    /// Set the RGB value at (x, y). Out-of-bounds writes are ignored.
    pub fn put_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.pixels[idx..idx + 3].copy_from_slice(&color);
    }

    /// Expand to RGBA with opaque alpha, the layout canvas hosts expect.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for px in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(px);
            rgba.push(255);
        }
        rgba
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + x as usize) * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_buffer_creation() {
        let img = PixelBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_pixel_buffer_empty() {
        let img = PixelBuffer::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_from_raw_rejects_length_mismatch() {
        let err = PixelBuffer::from_raw(2, 2, vec![0u8; 11]).unwrap_err();
        assert_eq!(
            err,
            EditError::InvalidPixelData {
                expected: 12,
                actual: 11
            }
        );
        assert!(PixelBuffer::from_raw(2, 2, vec![0u8; 12]).is_ok());
    }

    #[test]
    fn test_pixel_access() {
        let mut img = PixelBuffer::filled(3, 2, [1, 2, 3]);
        assert_eq!(img.pixel(2, 1), Some([1, 2, 3]));
        assert_eq!(img.pixel(3, 0), None);

        img.put_pixel(1, 1, [9, 8, 7]);
        assert_eq!(img.pixel(1, 1), Some([9, 8, 7]));
        // Channel order is preserved as written
        assert_eq!(&img.pixels[12..15], &[9, 8, 7]);

        // Out of bounds is a no-op
        img.put_pixel(5, 5, [0, 0, 0]);
        assert_eq!(img.pixels.len(), 18);
    }

    #[test]
    fn test_to_rgba() {
        let img = PixelBuffer::new(2, 1, vec![255, 128, 64, 32, 16, 8]);
        assert_eq!(img.to_rgba(), vec![255, 128, 64, 255, 32, 16, 8, 255]);
    }

    #[test]
    fn test_rgb_image_conversion() {
        let img = PixelBuffer::filled(4, 3, [10, 20, 30]);
        let rgb = img.to_rgb_image().unwrap();
        assert_eq!(rgb.dimensions(), (4, 3));
        assert_eq!(PixelBuffer::from_rgb_image(rgb), img);
    }
}
