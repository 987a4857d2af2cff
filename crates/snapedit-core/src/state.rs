//! The original / working / crop-reference image triad.
//!
//! `EditState` is the only owner of the image buffers. Loads and committed
//! edits replace buffers wholesale; nothing outside this module can reach a
//! buffer mutably.
//!
//! # Invariants
//!
//! - `original` changes only on load
//! - after every load, commit, and revert, `crop_reference` is a copy of
//!   `working`
//! - a channel view never alters any buffer; it is cleared by any commit,
//!   load, or revert

use std::borrow::Cow;

use crate::buffer::PixelBuffer;
use crate::error::EditError;
use crate::transform::{isolate_channel, Channel};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Buffers {
    original: PixelBuffer,
    working: PixelBuffer,
    crop_reference: PixelBuffer,
}

/// Image buffers for one editing session.
#[derive(Debug, Clone, Default)]
pub struct EditState {
    buffers: Option<Buffers>,
    channel_view: Option<Channel>,
}

impl EditState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all three buffers with copies of `buffer`.
    ///
    /// # Errors
    ///
    /// Returns `EditError::InvalidImage` for an empty buffer and
    /// `EditError::InvalidPixelData` when the byte length is wrong. The
    /// current state is kept on error.
    pub fn load(&mut self, buffer: PixelBuffer) -> Result<(), EditError> {
        validate(&buffer)?;
        self.buffers = Some(Buffers {
            original: buffer.clone(),
            working: buffer.clone(),
            crop_reference: buffer,
        });
        self.channel_view = None;
        Ok(())
    }

    pub fn has_image(&self) -> bool {
        self.buffers.is_some()
    }

    pub fn original(&self) -> Option<&PixelBuffer> {
        self.buffers.as_ref().map(|b| &b.original)
    }

    pub fn working(&self) -> Option<&PixelBuffer> {
        self.buffers.as_ref().map(|b| &b.working)
    }

    pub fn crop_reference(&self) -> Option<&PixelBuffer> {
        self.buffers.as_ref().map(|b| &b.crop_reference)
    }

    pub fn channel_view(&self) -> Option<Channel> {
        self.channel_view
    }

    /// Show one channel of the working image without committing it.
    pub fn apply_channel_view(&mut self, channel: Channel) -> Result<(), EditError> {
        if self.buffers.is_none() {
            return Err(EditError::NoImage);
        }
        self.channel_view = Some(channel);
        Ok(())
    }

    /// The buffer to put on screen: the working image, masked to the
    /// channel view if one is set.
    pub fn display_image(&self) -> Option<Cow<'_, PixelBuffer>> {
        let working = self.working()?;
        Some(match self.channel_view {
            Some(channel) => Cow::Owned(isolate_channel(working, channel)),
            None => Cow::Borrowed(working),
        })
    }

    /// Install the result of an edit as the new working image.
    ///
    /// The crop reference becomes a copy of it and any channel view is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns `EditError::NoImage` before anything was loaded, or an
    /// image error if `buffer` is empty. The state is kept on error.
    pub fn commit_edit(&mut self, buffer: PixelBuffer) -> Result<(), EditError> {
        validate(&buffer)?;
        let buffers = self.buffers.as_mut().ok_or(EditError::NoImage)?;
        buffers.crop_reference = buffer.clone();
        buffers.working = buffer;
        self.channel_view = None;
        Ok(())
    }

    /// Reset working and crop reference to fresh copies of the original.
    pub fn revert_to_original(&mut self) -> Result<(), EditError> {
        let buffers = self.buffers.as_mut().ok_or(EditError::NoImage)?;
        buffers.working = buffers.original.clone();
        buffers.crop_reference = buffers.original.clone();
        self.channel_view = None;
        Ok(())
    }
}

fn validate(buffer: &PixelBuffer) -> Result<(), EditError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(EditError::InvalidImage {
            width: buffer.width,
            height: buffer.height,
        });
    }
    let expected = buffer.pixel_count() * 3;
    if buffer.pixels.len() != expected {
        return Err(EditError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }
    Ok(())
}
