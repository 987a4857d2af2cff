//! SnapEdit WASM - WebAssembly bindings for SnapEdit
//!
//! This crate exposes the snapedit-core editing session to JavaScript, so a
//! web page can provide the canvas, the pointer events, and the form fields.
//!
//! # Module Structure
//!
//! - `session` - The editing session and pointer readouts
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Standalone image decoding
//! - `encode` - Standalone image encoding (JPEG, PNG)
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession } from '@snapedit/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! session.rotate(15);
//! const jpeg = session.encode("jpg");
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

pub use decode::decode_image;
pub use encode::{encode_image, mime_type};
pub use session::{JsEditSession, JsPointerReadout};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.1.0");
    }
}
