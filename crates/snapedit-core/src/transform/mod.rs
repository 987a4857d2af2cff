//! Edit operations: channel isolation, crop, rotation, and circle drawing.
//!
//! Every operation reads an input buffer and returns a new one. The input is
//! never modified, except by [`draw_circle_mut`], which expects to be handed
//! a buffer its caller owns outright.
//!
//! # Coordinate System
//!
//! - All coordinates are in image space (full-resolution pixels)
//! - Origin is the top-left corner
//! - Rotation angles are in degrees, positive = counter-clockwise

mod channel;
mod circle;
mod crop;
mod rotation;

pub use channel::{isolate_channel, Channel};
pub use circle::{draw_circle, draw_circle_mut, CircleStyle};
pub use crop::{apply_crop, CropRect};
pub use rotation::{apply_rotation, InterpolationFilter};
