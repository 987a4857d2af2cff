//! Image decoding WASM bindings.
//!
//! Most pages load straight into a session with `JsEditSession.load_bytes`;
//! `decode_image` is for callers that want the pixels on their own.

use crate::types::JsPixelBuffer;
use snapedit_core::decode;
use wasm_bindgen::prelude::*;

/// Decode JPEG, PNG, or BMP bytes into RGB pixels.
///
/// EXIF orientation is applied, so the result is upright.
///
/// # Errors
///
/// Returns an error if the format is not recognized or the data is corrupt.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} image`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsPixelBuffer, JsValue> {
    decode::decode_image(bytes)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
