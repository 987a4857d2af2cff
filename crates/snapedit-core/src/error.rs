//! Error types for the editing engine.
//!
//! Engine errors never leave partial state behind: a call that returns an
//! error has not touched the edit state or any pending input.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::interaction::ActiveTarget;

/// Errors raised by the edit engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Width or height is zero.
    #[error("Invalid image: width ({width}) and height ({height}) must be non-zero")]
    InvalidImage { width: u32, height: u32 },

    /// Pixel data length doesn't match the stated dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Operation parameters are missing, non-numeric, or describe an empty region.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// No image has been loaded yet.
    #[error("No image loaded")]
    NoImage,

    /// Commit requested for an interaction that was never started.
    #[error("No pending {0} input")]
    NoPendingInput(ActiveTarget),

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors from session operations that cross an I/O boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
