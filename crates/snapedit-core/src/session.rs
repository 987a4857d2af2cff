//! The editing session: one image, its edits, and pending pointer input.
//!
//! `EditSession` is the single entry point a host drives. Events are handled
//! synchronously, one at a time:
//!
//! ```text
//! load/capture -> EditState -> DisplayMapping -> render
//! pointer event -> DisplayMapping -> InteractionSequencer -> commit -> EditState
//! ```
//!
//! Only the commit methods write to the edit state, and each either applies
//! a whole edit or changes nothing.

use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::config::SessionConfig;
use crate::decode::ImageSource;
use crate::display::{render_display_buffer, DisplayMapping};
use crate::encode::ImageSink;
use crate::error::{EditError, SessionError};
use crate::interaction::{
    ActiveTarget, CircleField, ClickOutcome, CropField, InteractionSequencer,
};
use crate::state::EditState;
use crate::transform::{apply_crop, apply_rotation, draw_circle_mut, Channel};

/// Window title prefix used in coordinate readouts.
pub const WINDOW_TITLE: &str = "Image Processor";

/// Where the pointer is, in image space, and where to draw its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PointerReadout {
    pub image_x: i64,
    pub image_y: i64,
    /// Label anchor (top-left) in display space.
    pub label_x: i64,
    pub label_y: i64,
}

impl PointerReadout {
    /// Overlay text, e.g. `(125, 125)`.
    pub fn label(&self) -> String {
        format!("({}, {})", self.image_x, self.image_y)
    }

    /// Window title carrying the coordinates.
    pub fn title(&self) -> String {
        format!("{WINDOW_TITLE} - Coordinates: {}", self.label())
    }
}

/// An interactive single-image editing session.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    config: SessionConfig,
    state: EditState,
    sequencer: InteractionSequencer,
}

impl EditSession {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidConfig` if the settings are unusable.
    pub fn new(config: SessionConfig) -> Result<Self, EditError> {
        config.validate()?;
        Ok(Self {
            config,
            state: EditState::new(),
            sequencer: InteractionSequencer::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    pub fn sequencer(&self) -> &InteractionSequencer {
        &self.sequencer
    }

    // ------------------------------------------------------------------
    // Image in / out
    // ------------------------------------------------------------------

    /// Start editing a new image.
    pub fn load(&mut self, buffer: PixelBuffer) -> Result<(), EditError> {
        let (width, height) = (buffer.width, buffer.height);
        self.state.load(buffer)?;
        info!(width, height, "image loaded");
        Ok(())
    }

    /// Pull one image from a source and load it.
    ///
    /// If the source fails, the current image stays as it was.
    pub fn load_from<S: ImageSource + ?Sized>(
        &mut self,
        source: &mut S,
    ) -> Result<(), SessionError> {
        let buffer = source.acquire().inspect_err(|e| {
            warn!(error = %e, "image source failed");
        })?;
        self.load(buffer)?;
        Ok(())
    }

    /// Write the working image (never a channel view) to a sink.
    pub fn save_to<S: ImageSink + ?Sized>(&self, sink: &mut S) -> Result<(), SessionError> {
        let working = self.state.working().ok_or(EditError::NoImage)?;
        sink.write(working).inspect_err(|e| {
            warn!(error = %e, "image sink failed");
        })?;
        info!(width = working.width, height = working.height, "image saved");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Display
    // ------------------------------------------------------------------

    /// Display geometry for the current working image.
    pub fn display_mapping(&self) -> Option<DisplayMapping> {
        self.state
            .working()
            .map(|img| DisplayMapping::for_image(img, self.config.max_display_dimension))
    }

    /// The scaled buffer to show, with any channel view applied.
    pub fn render_display(&self) -> Result<PixelBuffer, EditError> {
        let image = self.state.display_image().ok_or(EditError::NoImage)?;
        let mapping = DisplayMapping::for_image(&image, self.config.max_display_dimension);
        render_display_buffer(&image, &mapping, self.config.display_filter)
    }

    /// Translate a pointer position into an image-space readout.
    ///
    /// Returns `None` when no image is loaded.
    pub fn pointer_moved(&self, display_x: i64, display_y: i64) -> Option<PointerReadout> {
        let (image_x, image_y) = self.display_mapping()?.to_image_space(display_x, display_y)?;
        let offset = self.config.overlay_offset as i64;
        Some(PointerReadout {
            image_x,
            image_y,
            label_x: display_x.saturating_add(offset),
            label_y: display_y.saturating_add(offset),
        })
    }

    /// Route a pointer click to the active interaction.
    ///
    /// Clicks are ignored when no image is loaded.
    pub fn pointer_clicked(&mut self, display_x: i64, display_y: i64) -> ClickOutcome {
        let Some((x, y)) = self
            .display_mapping()
            .and_then(|m| m.to_image_space(display_x, display_y))
        else {
            return ClickOutcome::Ignored;
        };

        let outcome = self.sequencer.click(x, y);
        debug!(x, y, ?outcome, "pointer click");
        outcome
    }

    // ------------------------------------------------------------------
    // Channel views
    // ------------------------------------------------------------------

    /// Show a single channel of the working image without editing it.
    pub fn show_channel(&mut self, channel: Channel) -> Result<(), EditError> {
        self.state.apply_channel_view(channel)?;
        debug!(%channel, "channel view");
        Ok(())
    }

    /// Discard every edit and show the image as loaded.
    pub fn show_original(&mut self) -> Result<(), EditError> {
        self.state.revert_to_original()?;
        info!("reverted to original");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pending input
    // ------------------------------------------------------------------

    pub fn begin_crop(&mut self) {
        self.sequencer.begin_crop();
    }

    pub fn begin_circle(&mut self) {
        self.sequencer.begin_circle();
    }

    pub fn cancel_crop(&mut self) {
        self.sequencer.cancel_crop();
    }

    pub fn cancel_circle(&mut self) {
        self.sequencer.cancel_circle();
    }

    pub fn focus(&mut self, target: ActiveTarget) -> Result<(), EditError> {
        self.sequencer.focus(target)
    }

    pub fn set_crop_field(&mut self, field: CropField, text: &str) -> Result<(), EditError> {
        self.sequencer.set_crop_field(field, text)
    }

    pub fn set_circle_field(&mut self, field: CircleField, text: &str) -> Result<(), EditError> {
        self.sequencer.set_circle_field(field, text)
    }

    // ------------------------------------------------------------------
    // Commits
    // ------------------------------------------------------------------

    /// Crop the crop reference to the pending corners.
    ///
    /// On failure the image and the pending corners are left as they were,
    /// so the user can fix the input and retry.
    pub fn commit_crop(&mut self) -> Result<(), EditError> {
        let result = self.try_commit_crop();
        if let Err(e) = &result {
            warn!(error = %e, "crop rejected");
        }
        result
    }

    fn try_commit_crop(&mut self) -> Result<(), EditError> {
        let rect = self.sequencer.crop_request()?;
        let reference = self.state.crop_reference().ok_or(EditError::NoImage)?;
        let cropped = apply_crop(reference, rect.x1, rect.y1, rect.x2, rect.y2)?;
        let (width, height) = (cropped.width, cropped.height);

        self.state.commit_edit(cropped)?;
        self.sequencer.finish_crop();
        debug!(?rect, width, height, "crop committed");
        Ok(())
    }

    /// Draw the pending circle onto the working image.
    ///
    /// On failure the image and the pending fields are left as they were.
    pub fn commit_circle(&mut self) -> Result<(), EditError> {
        let result = self.try_commit_circle();
        if let Err(e) = &result {
            warn!(error = %e, "circle rejected");
        }
        result
    }

    fn try_commit_circle(&mut self) -> Result<(), EditError> {
        let params = self.sequencer.circle_request()?;
        let mut canvas = self.state.working().ok_or(EditError::NoImage)?.clone();
        draw_circle_mut(
            &mut canvas,
            params.x,
            params.y,
            params.radius,
            self.config.circle,
        )?;

        self.state.commit_edit(canvas)?;
        self.sequencer.finish_circle();
        debug!(?params, "circle committed");
        Ok(())
    }

    /// Rotate the working image about its center.
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<(), EditError> {
        let working = self.state.working().ok_or(EditError::NoImage)?;
        let rotated = apply_rotation(
            working,
            angle_degrees,
            self.config.rotation_filter,
            self.config.background,
        )?;

        self.state.commit_edit(rotated)?;
        debug!(angle_degrees, "rotation committed");
        Ok(())
    }
}
