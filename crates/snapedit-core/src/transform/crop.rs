//! Image cropping in pixel coordinates.
//!
//! A crop is given by two opposite corners in image space. The region is the
//! half-open rectangle `[x1, x2) x [y1, y2)` after normalization.
//!
//! # Normalization
//!
//! - The x pair and the y pair are swapped independently so that
//!   `x1 <= x2` and `y1 <= y2`; an x value never trades places with a y value
//! - Bounds are then clamped to `[0, width] x [0, height]`
//! - A rectangle with no area after clamping is rejected
//!
//! # Example
//!
//! ```ignore
//! // Corners may arrive in any order
//! let cropped = apply_crop(&image, 50, 10, 10, 50)?;
//! assert_eq!((cropped.width, cropped.height), (40, 40));
//! ```

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Two opposite corners of a crop region, in image space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl CropRect {
    /// Build a rectangle from two corners, normalizing the order.
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self { x1, y1, x2, y2 }.normalized()
    }

    /// Swap the x pair and the y pair independently so that each is ascending.
    pub fn normalized(self) -> Self {
        let (x1, x2) = if self.x1 > self.x2 {
            (self.x2, self.x1)
        } else {
            (self.x1, self.x2)
        };
        let (y1, y2) = if self.y1 > self.y2 {
            (self.y2, self.y1)
        } else {
            (self.y1, self.y2)
        };
        Self { x1, y1, x2, y2 }
    }

    /// Clamp a normalized rectangle to `[0, width] x [0, height]`.
    fn clamped(self, width: u32, height: u32) -> (u32, u32, u32, u32) {
        let clamp_x = |v: i64| v.clamp(0, width as i64) as u32;
        let clamp_y = |v: i64| v.clamp(0, height as i64) as u32;
        (
            clamp_x(self.x1),
            clamp_y(self.y1),
            clamp_x(self.x2),
            clamp_y(self.y2),
        )
    }
}

/// Crop an image to the rectangle spanned by two corners.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `x1`, `y1` - First corner
/// * `x2`, `y2` - Opposite corner
///
/// # Returns
///
/// A new `PixelBuffer` containing only the cropped region.
///
/// # Errors
///
/// Returns `EditError::InvalidRange` if the normalized, clamped rectangle is
/// empty.
///
/// # Behavior
///
/// - Bounds beyond the image are clamped, not rejected
/// - Full crop (0, 0, width, height) returns a copy of the input
pub fn apply_crop(
    image: &PixelBuffer,
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
) -> Result<PixelBuffer, EditError> {
    let rect = CropRect::new(x1, y1, x2, y2);
    let (left, top, right, bottom) = rect.clamped(image.width, image.height);

    if left == right || top == bottom {
        return Err(EditError::InvalidRange(format!(
            "crop region ({}, {})-({}, {}) is empty within a {}x{} image",
            rect.x1, rect.y1, rect.x2, rect.y2, image.width, image.height
        )));
    }

    // Fast path: full crop returns a clone
    if left == 0 && top == 0 && right == image.width && bottom == image.height {
        return Ok(image.clone());
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let row_bytes = out_width as usize * 3;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row for efficiency
    for y in top..bottom {
        let row_start = (y as usize * image.width as usize + left as usize) * 3;
        output.extend_from_slice(&image.pixels[row_start..row_start + row_bytes]);
    }

    Ok(PixelBuffer::new(out_width, out_height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn create_test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v);
                pixels.push(v);
                pixels.push(v);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=64, 1u32..=64)
    }

    proptest! {
        /// Property: Full-extent crop is pixel-identical to the input.
        #[test]
        fn prop_full_crop_returns_original(
            (width, height) in dimensions_strategy(),
        ) {
            let img = create_test_image(width, height);
            let result = apply_crop(&img, 0, 0, width as i64, height as i64).unwrap();
            prop_assert_eq!(result, img);
        }

        /// Property: Corner order does not matter.
        #[test]
        fn prop_corner_order_irrelevant(
            (width, height) in dimensions_strategy(),
            x1 in -8i64..72, y1 in -8i64..72, x2 in -8i64..72, y2 in -8i64..72,
        ) {
            let img = create_test_image(width, height);
            let a = apply_crop(&img, x1, y1, x2, y2);
            let b = apply_crop(&img, x2, y1, x1, y2);
            let c = apply_crop(&img, x1, y2, x2, y1);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(&a, &c);
        }

        /// Property: Successful crops have the clamped size and valid data.
        #[test]
        fn prop_output_matches_clamped_rect(
            (width, height) in dimensions_strategy(),
            x1 in -8i64..72, y1 in -8i64..72, x2 in -8i64..72, y2 in -8i64..72,
        ) {
            let img = create_test_image(width, height);
            let rect = CropRect::new(x1, y1, x2, y2);
            let (l, t, r, b) = rect.clamped(width, height);

            match apply_crop(&img, x1, y1, x2, y2) {
                Ok(result) => {
                    prop_assert_eq!(result.width, r - l);
                    prop_assert_eq!(result.height, b - t);
                    prop_assert_eq!(result.pixels.len(), result.pixel_count() * 3);
                    prop_assert_eq!(result.pixel(0, 0), img.pixel(l, t));
                }
                Err(_) => prop_assert!(l == r || t == b),
            }
        }
    }
}
