//! Image rotation about the center with a fixed-size canvas.
//!
//! The output keeps the input dimensions. Content rotated past the edges is
//! clipped and areas exposed by the rotation are filled with a background
//! color.
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source position maps onto it and sample there. With
//! the integer center `(cx, cy) = (w / 2, h / 2)` and angle θ
//! (counter-clockwise as seen on screen, y pointing down):
//! ```text
//! src_x = (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + cx
//! src_y = (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```
//!
//! Samples that fall partly outside the source blend with the background,
//! as a constant border would.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterpolationFilter {
    /// Nearest neighbor - reproducible, no new colors introduced.
    Nearest,
    /// Bilinear interpolation over the 2x2 neighborhood.
    #[default]
    Bilinear,
    /// Lanczos3 over a 6x6 neighborhood - sharper, slower.
    Lanczos3,
}

/// Rotate an image about its center.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
/// * `filter` - Resampling method
/// * `background` - Fill color for areas exposed by the rotation
///
/// # Returns
///
/// New `PixelBuffer` with the rotated content and the input's dimensions.
///
/// # Errors
///
/// Returns `EditError::InvalidRange` if the angle is NaN or infinite.
pub fn apply_rotation(
    image: &PixelBuffer,
    angle_degrees: f64,
    filter: InterpolationFilter,
    background: [u8; 3],
) -> Result<PixelBuffer, EditError> {
    if !angle_degrees.is_finite() {
        return Err(EditError::InvalidRange(format!(
            "rotation angle must be finite, got {angle_degrees}"
        )));
    }

    // Fast path: whole turns leave every pixel in place
    if angle_degrees % 360.0 == 0.0 {
        return Ok(image.clone());
    }

    let (width, height) = (image.width, image.height);
    let angle_rad = angle_degrees.to_radians();
    let (sin, cos) = angle_rad.sin_cos();

    let cx = (width / 2) as f64;
    let cy = (height / 2) as f64;
    let bg = background.map(f64::from);

    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..height {
        let dy = dst_y as f64 - cy;
        for dst_x in 0..width {
            let dx = dst_x as f64 - cx;

            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            let pixel = match filter {
                InterpolationFilter::Nearest => sample_nearest(image, src_x, src_y, bg),
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y, bg),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y, bg),
            };

            let dst_idx = ((dst_y as usize) * (width as usize) + dst_x as usize) * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&pixel);
        }
    }

    Ok(PixelBuffer::new(width, height, output))
}

/// Get a pixel as [f64; 3], or the background when outside the image.
#[inline]
fn fetch(image: &PixelBuffer, px: i64, py: i64, bg: [f64; 3]) -> [f64; 3] {
    if px < 0 || py < 0 || px >= image.width as i64 || py >= image.height as i64 {
        return bg;
    }
    let idx = ((py as usize) * (image.width as usize) + px as usize) * 3;
    [
        image.pixels[idx] as f64,
        image.pixels[idx + 1] as f64,
        image.pixels[idx + 2] as f64,
    ]
}

#[inline]
fn to_u8(v: [f64; 3]) -> [u8; 3] {
    v.map(|c| c.clamp(0.0, 255.0).round() as u8)
}

fn sample_nearest(image: &PixelBuffer, x: f64, y: f64, bg: [f64; 3]) -> [u8; 3] {
    to_u8(fetch(image, x.round() as i64, y.round() as i64, bg))
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &PixelBuffer, x: f64, y: f64, bg: [f64; 3]) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);

    // Entirely outside: no source pixel contributes
    if x <= -1.0 || y <= -1.0 || x >= w || y >= h {
        return to_u8(bg);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = fetch(image, x0, y0, bg);
    let p10 = fetch(image, x0 + 1, y0, bg);
    let p01 = fetch(image, x0, y0 + 1, bg);
    let p11 = fetch(image, x0 + 1, y0 + 1, bg);

    let mut result = [0.0f64; 3];
    for i in 0..3 {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    to_u8(result)
}

/// Sample a pixel using Lanczos3 interpolation.
///
/// Taps that fall outside the source read the background color.
fn sample_lanczos3(image: &PixelBuffer, x: f64, y: f64, bg: [f64; 3]) -> [u8; 3] {
    let (w, h) = (image.width as f64, image.height as f64);
    if x <= -3.0 || y <= -3.0 || x >= w + 2.0 || y >= h + 2.0 {
        return to_u8(bg);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 3];
    let mut weight_sum = 0.0;

    // Sample 6x6 neighborhood
    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;

            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);
            let pixel = fetch(image, px, py, bg);

            sum[0] += pixel[0] * weight;
            sum[1] += pixel[1] * weight;
            sum[2] += pixel[2] * weight;
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return to_u8(bg);
    }

    to_u8(sum.map(|s| s / weight_sum))
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;

    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: [u8; 3] = [0, 0, 0];

    /// Create a test image where every pixel is distinct.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 10 % 256) as u8); // R
                pixels.push((y * 10 % 256) as u8); // G
                pixels.push(200); // B
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_no_rotation() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, 0.0, InterpolationFilter::Bilinear, BLACK).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_full_turns_are_identity() {
        let img = test_image(31, 17);
        for angle in [360.0, -360.0, 720.0] {
            let result =
                apply_rotation(&img, angle, InterpolationFilter::Bilinear, BLACK).unwrap();
            assert_eq!(result, img, "angle {angle}");
        }
    }

    #[test]
    fn test_output_keeps_dimensions() {
        let img = test_image(200, 100);
        for angle in [15.0, 45.0, 90.0, -30.0, 180.0] {
            let result =
                apply_rotation(&img, angle, InterpolationFilter::Bilinear, BLACK).unwrap();
            assert_eq!((result.width, result.height), (200, 100));
            assert_eq!(result.pixels.len(), img.pixels.len());
        }
    }

    #[test]
    fn test_90_degrees_is_counter_clockwise() {
        let img = test_image(5, 5);
        let result = apply_rotation(&img, 90.0, InterpolationFilter::Bilinear, BLACK).unwrap();

        // The right-middle source pixel moves to the top-middle
        assert_eq!(result.pixel(2, 0), img.pixel(4, 2));
        // The top-middle source pixel moves to the left-middle
        assert_eq!(result.pixel(0, 2), img.pixel(2, 0));
        // Center stays put
        assert_eq!(result.pixel(2, 2), img.pixel(2, 2));
    }

    #[test]
    fn test_180_degrees_odd_size_flips_both_axes() {
        let img = test_image(5, 3);
        let result = apply_rotation(&img, 180.0, InterpolationFilter::Bilinear, BLACK).unwrap();

        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(result.pixel(x, y), img.pixel(4 - x, 2 - y), "at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_exposed_corners_use_background() {
        let img = PixelBuffer::filled(40, 40, [200, 200, 200]);
        let bg = [10, 20, 30];
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear, bg).unwrap();

        assert_eq!(result.pixel(0, 0), Some(bg));
        assert_eq!(result.pixel(39, 39), Some(bg));
        assert_eq!(result.pixel(20, 20), Some([200, 200, 200]));
    }

    #[test]
    fn test_nearest_introduces_no_new_colors() {
        let img = test_image(20, 20);
        let result = apply_rotation(&img, 33.0, InterpolationFilter::Nearest, BLACK).unwrap();

        for px in result.pixels.chunks(3) {
            let known = px == BLACK
                || img.pixels.chunks(3).any(|src| src == px);
            assert!(known, "unexpected color {px:?}");
        }
    }

    #[test]
    fn test_rotation_is_deterministic() {
        let img = test_image(30, 20);
        for filter in [
            InterpolationFilter::Nearest,
            InterpolationFilter::Bilinear,
            InterpolationFilter::Lanczos3,
        ] {
            let a = apply_rotation(&img, 17.5, filter, BLACK).unwrap();
            let b = apply_rotation(&img, 17.5, filter, BLACK).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_non_finite_angle_rejected() {
        let img = test_image(4, 4);
        assert!(matches!(
            apply_rotation(&img, f64::NAN, InterpolationFilter::Bilinear, BLACK),
            Err(EditError::InvalidRange(_))
        ));
        assert!(apply_rotation(&img, f64::INFINITY, InterpolationFilter::Bilinear, BLACK).is_err());
    }

    #[test]
    fn test_rotation_does_not_modify_input() {
        let img = test_image(10, 10);
        let before = img.clone();
        let _ = apply_rotation(&img, 30.0, InterpolationFilter::Lanczos3, BLACK).unwrap();
        assert_eq!(img, before);
    }

    #[test]
    fn test_1x1_image_rotation() {
        let img = PixelBuffer::new(1, 1, vec![128, 128, 128]);
        let result = apply_rotation(&img, 45.0, InterpolationFilter::Bilinear, BLACK).unwrap();
        assert_eq!(result.pixel(0, 0), Some([128, 128, 128]));
    }

    #[test]
    fn test_lanczos_weight_at_zero() {
        let w = lanczos_weight(0.0, 3.0);
        assert!((w - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_at_boundary() {
        let w = lanczos_weight(3.0, 3.0);
        assert!(w.abs() < f64::EPSILON);
    }

    #[test]
    fn test_lanczos_weight_symmetry() {
        let w1 = lanczos_weight(1.5, 3.0);
        let w2 = lanczos_weight(-1.5, 3.0);
        assert!((w1 - w2).abs() < 1e-10);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Any finite angle keeps the canvas size.
        #[test]
        fn prop_dimensions_preserved(
            (width, height) in (1u32..=32, 1u32..=32),
            angle in -720.0f64..720.0,
        ) {
            let img = PixelBuffer::filled(width, height, [90, 120, 150]);
            let result = apply_rotation(&img, angle, InterpolationFilter::Bilinear, [0, 0, 0]).unwrap();
            prop_assert_eq!((result.width, result.height), (width, height));
            prop_assert_eq!(result.pixels.len(), img.pixels.len());
        }

        /// Property: A uniform image stays within its color and the background.
        #[test]
        fn prop_uniform_image_bounded(
            (width, height) in (1u32..=24, 1u32..=24),
            angle in -180.0f64..180.0,
            value in 0u8..=255,
        ) {
            let img = PixelBuffer::filled(width, height, [value; 3]);
            let result = apply_rotation(&img, angle, InterpolationFilter::Bilinear, [0, 0, 0]).unwrap();
            prop_assert!(result.pixels.iter().all(|&v| v <= value));
        }
    }
}
