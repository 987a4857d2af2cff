//! Mapping between the scaled display surface and the full-resolution image.
//!
//! The working image is shown scaled down so that its longest edge fits
//! within a maximum display dimension. Pointer events arrive in display
//! space and must be translated back into image space before they can drive
//! an edit.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner in both spaces
//! - Display dimensions are truncated, never rounded
//! - Display-to-image conversion floors toward negative infinity

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Default longest edge of the display surface, in pixels.
pub const DEFAULT_MAX_DISPLAY_DIMENSION: u32 = 800;

/// Filter type for display downscaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Compute the display size for an image.
///
/// Returns `(display_width, display_height, scale)` where `scale` is the
/// display-per-image factor. Images whose longest edge already fits are
/// shown at scale 1. Larger images are scaled so the longest edge becomes
/// `max_dimension`, with both products truncated to integers.
///
/// Zero-size input yields zero-size output.
pub fn compute_display_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32, f64) {
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height, 1.0);
    }

    let scale = max_dimension as f64 / longest as f64;
    let display_width = (width as f64 * scale) as u32;
    let display_height = (height as f64 * scale) as u32;

    (display_width, display_height, scale)
}

/// Convert a display-space point into image space.
///
/// `image_x = floor(display_x * image_width / display_width)`, and likewise
/// for y. Returns `None` when either display dimension is zero or the
/// product overflows.
pub fn to_image_space(
    display_x: i64,
    display_y: i64,
    display_width: u32,
    display_height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<(i64, i64)> {
    if display_width == 0 || display_height == 0 {
        return None;
    }

    let x = display_x
        .checked_mul(image_width as i64)?
        .div_euclid(display_width as i64);
    let y = display_y
        .checked_mul(image_height as i64)?
        .div_euclid(display_height as i64);
    Some((x, y))
}

/// Convert an image-space point into display space.
///
/// The inverse of [`to_image_space`], exact up to integer truncation.
/// Returns `None` when either image dimension is zero or the product
/// overflows.
pub fn to_display_space(
    image_x: i64,
    image_y: i64,
    display_width: u32,
    display_height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<(i64, i64)> {
    if image_width == 0 || image_height == 0 {
        return None;
    }

    let x = image_x
        .checked_mul(display_width as i64)?
        .div_euclid(image_width as i64);
    let y = image_y
        .checked_mul(display_height as i64)?
        .div_euclid(image_height as i64);
    Some((x, y))
}

/// Derived relationship between the working image and its display.
///
/// Recomputed whenever the working image changes; never stored as part of
/// the edit state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayMapping {
    pub image_width: u32,
    pub image_height: u32,
    pub display_width: u32,
    pub display_height: u32,
    /// Display-per-image factor applied to both axes.
    pub scale: f64,
}

impl DisplayMapping {
    /// Compute the mapping for an image of the given size.
    pub fn new(image_width: u32, image_height: u32, max_dimension: u32) -> Self {
        let (display_width, display_height, scale) =
            compute_display_size(image_width, image_height, max_dimension);
        Self {
            image_width,
            image_height,
            display_width,
            display_height,
            scale,
        }
    }

    /// Compute the mapping for a buffer.
    pub fn for_image(image: &PixelBuffer, max_dimension: u32) -> Self {
        Self::new(image.width, image.height, max_dimension)
    }

    /// Image pixels per display pixel along x.
    pub fn scale_x(&self) -> f64 {
        self.image_width as f64 / self.display_width as f64
    }

    /// Image pixels per display pixel along y.
    pub fn scale_y(&self) -> f64 {
        self.image_height as f64 / self.display_height as f64
    }

    /// Whether the display is a downscaled copy of the image.
    pub fn is_scaled(&self) -> bool {
        self.display_width != self.image_width || self.display_height != self.image_height
    }

    /// Translate a display-space point into image space.
    pub fn to_image_space(&self, display_x: i64, display_y: i64) -> Option<(i64, i64)> {
        to_image_space(
            display_x,
            display_y,
            self.display_width,
            self.display_height,
            self.image_width,
            self.image_height,
        )
    }

    /// Translate an image-space point into display space.
    pub fn to_display_space(&self, image_x: i64, image_y: i64) -> Option<(i64, i64)> {
        to_display_space(
            image_x,
            image_y,
            self.display_width,
            self.display_height,
            self.image_width,
            self.image_height,
        )
    }
}

/// Produce the buffer shown on the display surface.
///
/// Returns a copy of `image` resized to the mapping's display dimensions.
///
/// # Errors
///
/// Returns `EditError::InvalidImage` if the display size is degenerate or
/// the buffer cannot be converted.
pub fn render_display_buffer(
    image: &PixelBuffer,
    mapping: &DisplayMapping,
    filter: FilterType,
) -> Result<PixelBuffer, EditError> {
    let (width, height) = (mapping.display_width, mapping.display_height);
    if width == 0 || height == 0 {
        return Err(EditError::InvalidImage { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image.to_rgb_image().ok_or(EditError::InvalidPixelData {
        expected: image.pixel_count() * 3,
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_rgb_image(resized))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Images within the bound are displayed at their own size.
        #[test]
        fn prop_small_images_unscaled(
            width in 1u32..=800,
            height in 1u32..=800,
        ) {
            let (w, h, scale) = compute_display_size(width, height, 800);
            prop_assert_eq!((w, h), (width, height));
            prop_assert_eq!(scale, 1.0);
        }

        /// Property: Large images fit within the bound and keep their aspect ratio.
        #[test]
        fn prop_large_images_fit(
            width in 1u32..=6000,
            height in 1u32..=6000,
            max_dim in 16u32..=1024,
        ) {
            prop_assume!(width.max(height) > max_dim);
            let (w, h, _) = compute_display_size(width, height, max_dim);

            prop_assert!(w.max(h) <= max_dim);

            // w/width == h/height up to one pixel of truncation on either side
            let lhs = w as f64 * height as f64;
            let rhs = h as f64 * width as f64;
            let tolerance = width.max(height) as f64;
            prop_assert!((lhs - rhs).abs() <= tolerance,
                "ratio mismatch: {}x{} -> {}x{}", width, height, w, h);
        }

        /// Property: Image -> display -> image stays within one display pixel.
        #[test]
        fn prop_round_trip_within_one_display_pixel(
            (width, height) in (1u32..=4000, 1u32..=4000),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let mapping = DisplayMapping::new(width, height, 800);
            prop_assume!(mapping.display_width > 0 && mapping.display_height > 0);

            let x = (fx * width as f64) as i64;
            let y = (fy * height as f64) as i64;
            let (dx, dy) = mapping.to_display_space(x, y).unwrap();
            let (rx, ry) = mapping.to_image_space(dx, dy).unwrap();

            prop_assert!(rx <= x && ry <= y);
            prop_assert!((x - rx) as f64 <= mapping.scale_x().ceil());
            prop_assert!((y - ry) as f64 <= mapping.scale_y().ceil());
        }

        /// Property: Display -> image -> display is within ±1 display pixel.
        #[test]
        fn prop_display_round_trip_within_one_pixel(
            (width, height) in (1u32..=4000, 1u32..=4000),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let mapping = DisplayMapping::new(width, height, 800);
            prop_assume!(mapping.display_width > 0 && mapping.display_height > 0);

            let dx = (fx * mapping.display_width as f64) as i64;
            let dy = (fy * mapping.display_height as f64) as i64;
            let (x, y) = mapping.to_image_space(dx, dy).unwrap();
            let (rx, ry) = mapping.to_display_space(x, y).unwrap();

            prop_assert!((dx - rx).abs() <= 1);
            prop_assert!((dy - ry).abs() <= 1);
        }

        /// Property: Unscaled images round-trip exactly.
        #[test]
        fn prop_unscaled_round_trip_exact(
            (width, height) in (1u32..=800, 1u32..=800),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let mapping = DisplayMapping::new(width, height, 800);
            let x = (fx * width as f64) as i64;
            let y = (fy * height as f64) as i64;
            let (dx, dy) = mapping.to_display_space(x, y).unwrap();
            prop_assert_eq!(mapping.to_image_space(dx, dy), Some((x, y)));
        }

        /// Property: In-surface display points land inside the image.
        #[test]
        fn prop_display_points_map_inside_image(
            (width, height) in (1u32..=4000, 1u32..=4000),
            fx in 0.0f64..1.0,
            fy in 0.0f64..1.0,
        ) {
            let mapping = DisplayMapping::new(width, height, 800);
            prop_assume!(mapping.display_width > 0 && mapping.display_height > 0);

            let dx = (fx * mapping.display_width as f64) as i64;
            let dy = (fy * mapping.display_height as f64) as i64;
            let (x, y) = mapping.to_image_space(dx, dy).unwrap();

            prop_assert!(x >= 0 && x < width as i64);
            prop_assert!(y >= 0 && y < height as i64);
        }
    }
}
