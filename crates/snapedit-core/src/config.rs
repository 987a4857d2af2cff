//! Session settings.
//!
//! All fields have defaults, so a host can deserialize a partial settings
//! object and get the stock behavior for everything it leaves out.

use serde::{Deserialize, Serialize};

use crate::display::{FilterType, DEFAULT_MAX_DISPLAY_DIMENSION};
use crate::error::EditError;
use crate::transform::{CircleStyle, InterpolationFilter};

/// Settings for an [`EditSession`](crate::session::EditSession).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Longest edge of the display surface in pixels.
    pub max_display_dimension: u32,
    /// Filter used to downscale the working image for display.
    pub display_filter: FilterType,
    /// Resampling used by rotation.
    pub rotation_filter: InterpolationFilter,
    /// Fill for areas exposed by rotation.
    pub background: [u8; 3],
    /// Circle annotation stroke.
    pub circle: CircleStyle,
    /// JPEG quality for saves (1-100).
    pub jpeg_quality: u8,
    /// Offset of the coordinate label from the pointer, in display pixels.
    pub overlay_offset: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_display_dimension: DEFAULT_MAX_DISPLAY_DIMENSION,
            display_filter: FilterType::Bilinear,
            rotation_filter: InterpolationFilter::Bilinear,
            background: [0, 0, 0],
            circle: CircleStyle::default(),
            jpeg_quality: 90,
            overlay_offset: 10,
        }
    }
}

impl SessionConfig {
    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.max_display_dimension == 0 {
            return Err(EditError::InvalidConfig(
                "max_display_dimension must be positive".to_string(),
            ));
        }
        if self.circle.thickness == 0 {
            return Err(EditError::InvalidConfig(
                "circle thickness must be at least 1".to_string(),
            ));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(EditError::InvalidConfig(format!(
                "jpeg_quality must be in 1..=100, got {}",
                self.jpeg_quality
            )));
        }
        Ok(())
    }
}
