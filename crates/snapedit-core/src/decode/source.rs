//! Where loaded images come from.
//!
//! The editing engine does not open files or talk to cameras itself. A host
//! hands it an [`ImageSource`] and the session asks for one buffer. Camera
//! capture is just another implementor supplied by the host.

use std::path::{Path, PathBuf};

use super::{decode_image, DecodeError};
use crate::buffer::PixelBuffer;

/// Supplies one decoded image on demand.
pub trait ImageSource {
    /// Produce a buffer, or explain why none is available.
    ///
    /// Failures are reported once and never retried by the engine.
    fn acquire(&mut self) -> Result<PixelBuffer, DecodeError>;
}

/// An image file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ImageSource for FileSource {
    fn acquire(&mut self) -> Result<PixelBuffer, DecodeError> {
        let bytes = std::fs::read(&self.path).map_err(|e| {
            DecodeError::SourceUnavailable(format!("{}: {e}", self.path.display()))
        })?;
        decode_image(&bytes)
    }
}

/// Encoded image bytes already in memory (e.g. from a browser file picker).
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Vec<u8>,
}

impl MemorySource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}

impl ImageSource for MemorySource {
    fn acquire(&mut self) -> Result<PixelBuffer, DecodeError> {
        decode_image(&self.bytes)
    }
}

/// An already-decoded frame, such as a single camera capture.
impl ImageSource for PixelBuffer {
    fn acquire(&mut self) -> Result<PixelBuffer, DecodeError> {
        Ok(self.clone())
    }
}
