//! Image output: encoding and the image sink contract.
//!
//! # Examples
//!
//! ```ignore
//! use snapedit_core::encode::{FileSink, ImageSink};
//!
//! // Format follows the extension; unknown extensions save as JPEG
//! FileSink::new("edited.png", 90).write(&image)?;
//! ```

mod sink;
mod types;
mod writer;

pub use sink::{FileSink, ImageSink, MemorySink};
pub use types::EncodeError;
pub use writer::{encode_image, ImageFormat};
