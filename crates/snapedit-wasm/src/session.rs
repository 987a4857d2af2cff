//! WASM bindings for the editing session.
//!
//! A page creates one `JsEditSession`, loads an image into it, and forwards
//! canvas pointer events and form input. After each call it redraws the
//! canvas from `display_rgba()`.
//!
//! # Example
//!
//! ```typescript
//! const session = new JsEditSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! canvas.onclick = (e) => session.pointer_click(e.offsetX, e.offsetY);
//! canvas.onmousemove = (e) => {
//!   const readout = session.pointer_move(e.offsetX, e.offsetY);
//!   if (readout) document.title = readout.title();
//! };
//!
//! session.begin_crop();
//! // ...two clicks later
//! session.commit_crop();
//! const data = new ImageData(session.display_rgba(), session.display_width, session.display_height);
//! ```

use std::fmt::Display;

use snapedit_core::{EditSession, MemorySink, MemorySource, PointerReadout, SessionConfig};
use wasm_bindgen::prelude::*;

use crate::types::{
    channel_from_name, circle_field_from_name, click_outcome_name, crop_field_from_name,
    format_from_name, target_from_name, JsPixelBuffer,
};

/// Convert an error to a JavaScript error string and log it to the console.
fn js_error(e: impl Display) -> JsValue {
    let value = JsValue::from_str(&e.to_string());
    web_sys::console::warn_1(&value);
    value
}

fn unknown_name(kind: &str, name: &str) -> JsValue {
    js_error(format!("Unknown {kind}: {name}"))
}

/// Saturate an image-space coordinate into the JavaScript number range we hand out.
fn to_js_coord(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Pointer position in image space, plus where to draw its label.
#[wasm_bindgen]
pub struct JsPointerReadout {
    inner: PointerReadout,
}

#[wasm_bindgen]
impl JsPointerReadout {
    #[wasm_bindgen(getter)]
    pub fn image_x(&self) -> i32 {
        to_js_coord(self.inner.image_x)
    }

    #[wasm_bindgen(getter)]
    pub fn image_y(&self) -> i32 {
        to_js_coord(self.inner.image_y)
    }

    /// Label anchor on the canvas.
    #[wasm_bindgen(getter)]
    pub fn label_x(&self) -> i32 {
        to_js_coord(self.inner.label_x)
    }

    #[wasm_bindgen(getter)]
    pub fn label_y(&self) -> i32 {
        to_js_coord(self.inner.label_y)
    }

    /// Overlay text, e.g. `(125, 125)`.
    pub fn label(&self) -> String {
        self.inner.label()
    }

    /// Window title carrying the coordinates.
    pub fn title(&self) -> String {
        self.inner.title()
    }
}

/// An editing session for JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with default settings.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditSession::default(),
        }
    }

    /// Create a session from a (possibly partial) settings object.
    ///
    /// ```typescript
    /// const session = JsEditSession.with_config({ max_display_dimension: 1024 });
    /// ```
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: SessionConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| js_error(format!("Invalid session config: {e}")))?;
        let inner = EditSession::new(config).map_err(js_error)?;
        Ok(Self { inner })
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.state().has_image()
    }

    /// Decode an encoded image (JPEG, PNG, BMP) and start editing it.
    pub fn load_bytes(&mut self, bytes: Vec<u8>) -> Result<(), JsValue> {
        self.inner
            .load_from(&mut MemorySource::new(bytes))
            .map_err(js_error)
    }

    /// Start editing raw RGB pixels, e.g. a captured camera frame.
    pub fn load_pixels(&mut self, image: &JsPixelBuffer) -> Result<(), JsValue> {
        self.inner.load(image.to_buffer()).map_err(js_error)
    }

    /// Canvas width for the current image, or 0 without one.
    #[wasm_bindgen(getter)]
    pub fn display_width(&self) -> u32 {
        self.inner
            .display_mapping()
            .map_or(0, |m| m.display_width)
    }

    /// Canvas height for the current image, or 0 without one.
    #[wasm_bindgen(getter)]
    pub fn display_height(&self) -> u32 {
        self.inner
            .display_mapping()
            .map_or(0, |m| m.display_height)
    }

    /// RGBA pixels ready for `new ImageData(...)`.
    pub fn display_rgba(&self) -> Result<js_sys::Uint8ClampedArray, JsValue> {
        let shown = self.inner.render_display().map_err(js_error)?;
        Ok(js_sys::Uint8ClampedArray::from(shown.to_rgba().as_slice()))
    }

    /// The working image at full resolution.
    pub fn working_image(&self) -> Option<JsPixelBuffer> {
        self.inner
            .state()
            .working()
            .cloned()
            .map(JsPixelBuffer::from_buffer)
    }

    pub fn pointer_move(&self, x: i32, y: i32) -> Option<JsPointerReadout> {
        self.inner
            .pointer_moved(x as i64, y as i64)
            .map(|inner| JsPointerReadout { inner })
    }

    /// Route a canvas click. Returns a short description of what it did.
    pub fn pointer_click(&mut self, x: i32, y: i32) -> String {
        click_outcome_name(self.inner.pointer_clicked(x as i64, y as i64)).to_string()
    }

    pub fn begin_crop(&mut self) {
        self.inner.begin_crop();
    }

    pub fn begin_circle(&mut self) {
        self.inner.begin_circle();
    }

    pub fn cancel_crop(&mut self) {
        self.inner.cancel_crop();
    }

    pub fn cancel_circle(&mut self) {
        self.inner.cancel_circle();
    }

    /// Make `"crop"`, `"circle"`, or `"none"` receive clicks.
    pub fn focus(&mut self, target: &str) -> Result<(), JsValue> {
        let target = target_from_name(target).ok_or_else(|| unknown_name("target", target))?;
        self.inner.focus(target).map_err(js_error)
    }

    /// Set crop field `"x1"`, `"y1"`, `"x2"`, or `"y2"` from typed text.
    pub fn set_crop_field(&mut self, field: &str, text: &str) -> Result<(), JsValue> {
        let field = crop_field_from_name(field).ok_or_else(|| unknown_name("crop field", field))?;
        self.inner.set_crop_field(field, text).map_err(js_error)
    }

    /// Set circle field `"x"`, `"y"`, or `"radius"` from typed text.
    pub fn set_circle_field(&mut self, field: &str, text: &str) -> Result<(), JsValue> {
        let field =
            circle_field_from_name(field).ok_or_else(|| unknown_name("circle field", field))?;
        self.inner.set_circle_field(field, text).map_err(js_error)
    }

    pub fn commit_crop(&mut self) -> Result<(), JsValue> {
        self.inner.commit_crop().map_err(js_error)
    }

    pub fn commit_circle(&mut self) -> Result<(), JsValue> {
        self.inner.commit_circle().map_err(js_error)
    }

    /// Rotate by `angle_degrees` (positive is counter-clockwise).
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<(), JsValue> {
        self.inner.rotate(angle_degrees).map_err(js_error)
    }

    /// Show `"red"`, `"green"`, or `"blue"` only. The working image is kept.
    pub fn show_channel(&mut self, channel: &str) -> Result<(), JsValue> {
        let channel = channel_from_name(channel).ok_or_else(|| unknown_name("channel", channel))?;
        self.inner.show_channel(channel).map_err(js_error)
    }

    pub fn show_original(&mut self) -> Result<(), JsValue> {
        self.inner.show_original().map_err(js_error)
    }

    /// Encode the working image as `"png"` or JPEG (anything else).
    pub fn encode(&self, format: &str) -> Result<Vec<u8>, JsValue> {
        let mut sink = MemorySink::new(format_from_name(format), self.inner.config().jpeg_quality);
        self.inner.save_to(&mut sink).map_err(js_error)?;
        Ok(sink.bytes)
    }
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn loaded() -> JsEditSession {
        let mut session = JsEditSession::new();
        session
            .load_pixels(&JsPixelBuffer::new(20, 10, vec![50u8; 20 * 10 * 3]))
            .unwrap();
        session
    }

    #[wasm_bindgen_test]
    fn test_display_rgba_length() {
        let rgba = loaded().display_rgba().unwrap();
        assert_eq!(rgba.length(), 20 * 10 * 4);
    }

    #[wasm_bindgen_test]
    fn test_display_rgba_without_image() {
        assert!(JsEditSession::new().display_rgba().is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_radius_rejected() {
        let mut session = loaded();
        session.begin_circle();
        session.pointer_click(5, 5);
        session.set_circle_field("radius", "abc").unwrap();
        assert!(session.commit_circle().is_err());
        assert_eq!(session.working_image().unwrap().pixels(), vec![50u8; 600]);
    }

    #[wasm_bindgen_test]
    fn test_unknown_names_rejected() {
        let mut session = loaded();
        assert!(session.show_channel("alpha").is_err());
        assert!(session.focus("lasso").is_err());
        session.begin_crop();
        assert!(session.set_crop_field("z", "1").is_err());
    }

    #[wasm_bindgen_test]
    fn test_with_config_partial() {
        let config = js_sys::Object::new();
        js_sys::Reflect::set(&config, &"max_display_dimension".into(), &10.into()).unwrap();
        let mut session = JsEditSession::with_config(config.into()).unwrap();
        session
            .load_pixels(&JsPixelBuffer::new(20, 10, vec![0u8; 600]))
            .unwrap();
        assert_eq!(session.display_width(), 10);
        assert_eq!(session.display_height(), 5);
    }
}
