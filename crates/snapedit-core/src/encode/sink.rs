//! Where saved images go.

use std::path::{Path, PathBuf};

use super::{encode_image, EncodeError, ImageFormat};
use crate::buffer::PixelBuffer;

/// Accepts a finished image for storage.
pub trait ImageSink {
    /// Store the buffer. Failures are reported once and never retried.
    fn write(&mut self, image: &PixelBuffer) -> Result<(), EncodeError>;
}

/// Writes an encoded image to a file, picking the format from its extension.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: ImageFormat,
    quality: u8,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, quality: u8) -> Self {
        let path = path.into();
        let format = ImageFormat::from_path(&path);
        Self {
            path,
            format,
            quality,
        }
    }

    /// Override the format chosen from the extension.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }
}

impl ImageSink for FileSink {
    fn write(&mut self, image: &PixelBuffer) -> Result<(), EncodeError> {
        let bytes = encode_image(image, self.format, self.quality)?;
        std::fs::write(&self.path, bytes)
            .map_err(|e| EncodeError::WriteFailed(format!("{}: {e}", self.path.display())))
    }
}

/// Collects encoded bytes in memory (e.g. for a browser download).
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub format: ImageFormat,
    pub quality: u8,
    pub bytes: Vec<u8>,
}

impl MemorySink {
    pub fn new(format: ImageFormat, quality: u8) -> Self {
        Self {
            format,
            quality,
            bytes: Vec::new(),
        }
    }
}

impl ImageSink for MemorySink {
    fn write(&mut self, image: &PixelBuffer) -> Result<(), EncodeError> {
        self.bytes = encode_image(image, self.format, self.quality)?;
        Ok(())
    }
}
