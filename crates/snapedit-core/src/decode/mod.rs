//! Image input: decoding and the image source contract.
//!
//! This module provides functionality for:
//! - Decoding encoded bytes (JPEG, PNG, BMP) into an RGB buffer
//! - Applying EXIF orientation on decode
//! - The [`ImageSource`] trait hosts implement for files, memory, or cameras
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::decode::{FileSource, ImageSource};
//!
//! let image = FileSource::new("photo.jpg").acquire()?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod source;
mod types;

pub use reader::{decode_image, get_orientation};
pub use source::{FileSource, ImageSource, MemorySource};
pub use types::{DecodeError, Orientation};
