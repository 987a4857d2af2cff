//! Circle outline annotation.
//!
//! A pixel belongs to the outline when its distance `d` from the center
//! satisfies `r - t/2 <= d < r + t/2`, where `r` is the radius and `t` the
//! stroke thickness. Parts of the circle outside the buffer are clipped.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;
use crate::error::EditError;

/// Stroke color and thickness for circle annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleStyle {
    /// RGB stroke color.
    pub color: [u8; 3],
    /// Stroke thickness in pixels (at least 1).
    pub thickness: u32,
}

impl Default for CircleStyle {
    fn default() -> Self {
        Self {
            color: [255, 0, 0],
            thickness: 2,
        }
    }
}

/// Draw a circle outline onto a copy of `image`.
///
/// # Errors
///
/// Returns `EditError::InvalidRange` for a negative radius or zero thickness.
pub fn draw_circle(
    image: &PixelBuffer,
    x: i64,
    y: i64,
    radius: i64,
    style: CircleStyle,
) -> Result<PixelBuffer, EditError> {
    let mut output = image.clone();
    draw_circle_mut(&mut output, x, y, radius, style)?;
    Ok(output)
}

/// Draw a circle outline in place.
///
/// The caller must own `image` outright; nothing else may expect it to stay
/// unchanged. On error the buffer is left untouched.
pub fn draw_circle_mut(
    image: &mut PixelBuffer,
    x: i64,
    y: i64,
    radius: i64,
    style: CircleStyle,
) -> Result<(), EditError> {
    if radius < 0 {
        return Err(EditError::InvalidRange(format!(
            "circle radius must be non-negative, got {radius}"
        )));
    }
    if style.thickness == 0 {
        return Err(EditError::InvalidRange(
            "circle thickness must be at least 1".to_string(),
        ));
    }

    let half = style.thickness as f64 / 2.0;
    let inner = (radius as f64 - half).max(0.0);
    let outer = radius as f64 + half;
    let (inner_sq, outer_sq) = (inner * inner, outer * outer);

    // Bounding box of the stroke, clipped to the buffer. Centers and radii
    // may sit anywhere in i64, so the box saturates instead of wrapping.
    let reach = outer.ceil() as i64;
    let left = x.saturating_sub(reach).max(0);
    let top = y.saturating_sub(reach).max(0);
    let right = x.saturating_add(reach).min(image.width as i64 - 1);
    let bottom = y.saturating_add(reach).min(image.height as i64 - 1);

    if left > right || top > bottom {
        return Ok(());
    }

    for py in top..=bottom {
        let dy = py as f64 - y as f64;
        for px in left..=right {
            let dx = px as f64 - x as f64;
            let dist_sq = dx * dx + dy * dy;
            if dist_sq >= inner_sq && dist_sq < outer_sq {
                image.put_pixel(px as u32, py as u32, style.color);
            }
        }
    }

    Ok(())
}
