//! WASM-compatible wrapper types and name lookups.
//!
//! JavaScript passes tool fields, channels, and formats as short strings;
//! the lookups here turn them into core enums.

use snapedit_core::{
    ActiveTarget, Channel, CircleField, ClickOutcome, CropField, CropPhase, ImageFormat,
    PixelBuffer,
};
use wasm_bindgen::prelude::*;

/// An RGB image held in WASM memory.
///
/// Calling `pixels()` copies the data out to a JavaScript `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Wrap RGB pixel data (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(buffer: PixelBuffer) -> Self {
        Self {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }

    /// Copy into a core buffer. The length is checked when it is loaded.
    pub(crate) fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

pub(crate) fn crop_field_from_name(name: &str) -> Option<CropField> {
    match name {
        "x1" => Some(CropField::X1),
        "y1" => Some(CropField::Y1),
        "x2" => Some(CropField::X2),
        "y2" => Some(CropField::Y2),
        _ => None,
    }
}

pub(crate) fn circle_field_from_name(name: &str) -> Option<CircleField> {
    match name {
        "x" => Some(CircleField::X),
        "y" => Some(CircleField::Y),
        "radius" => Some(CircleField::Radius),
        _ => None,
    }
}

pub(crate) fn channel_from_name(name: &str) -> Option<Channel> {
    match name {
        "red" => Some(Channel::Red),
        "green" => Some(Channel::Green),
        "blue" => Some(Channel::Blue),
        _ => None,
    }
}

pub(crate) fn target_from_name(name: &str) -> Option<ActiveTarget> {
    match name {
        "none" => Some(ActiveTarget::None),
        "crop" => Some(ActiveTarget::Crop),
        "circle" => Some(ActiveTarget::Circle),
        _ => None,
    }
}

/// `"png"` selects PNG; anything else saves as JPEG.
pub(crate) fn format_from_name(name: &str) -> ImageFormat {
    if name.eq_ignore_ascii_case("png") {
        ImageFormat::Png
    } else {
        ImageFormat::Jpeg
    }
}

/// Short name for what a click did, for UI hints.
pub(crate) fn click_outcome_name(outcome: ClickOutcome) -> &'static str {
    match outcome {
        ClickOutcome::Ignored => "ignored",
        ClickOutcome::CropCorner(CropPhase::AwaitingSecondCorner) => "crop-first-corner",
        ClickOutcome::CropCorner(_) => "crop-second-corner",
        ClickOutcome::CircleCenter => "circle-center",
    }
}
