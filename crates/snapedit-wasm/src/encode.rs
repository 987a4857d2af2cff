//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const bytes = encode_image(image, "png", 90);
//! const writable = await fileHandle.createWritable();
//! await writable.write(new Blob([bytes], { type: "image/png" }));
//! await writable.close();
//! ```

use crate::types::{format_from_name, JsPixelBuffer};
use snapedit_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an image as `"png"`, or as JPEG for any other format name.
///
/// `quality` (1-100) applies to JPEG only.
///
/// # Errors
///
/// Returns an error if the pixel data does not match the dimensions or
/// either dimension is zero.
#[wasm_bindgen]
pub fn encode_image(image: &JsPixelBuffer, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image(&image.to_buffer(), format_from_name(format), quality)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// MIME type for a format name, for building download blobs.
#[wasm_bindgen]
pub fn mime_type(format: &str) -> String {
    format_from_name(format).mime_type().to_string()
}
