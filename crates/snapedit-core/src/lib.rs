//! SnapEdit Core - Interactive single-image editing engine
//!
//! This crate holds everything behind a simple photo editor window: the
//! original/working image state, mapping between the scaled display surface
//! and image pixels, routing of pointer clicks to the crop or circle tool
//! that is waiting for them, and the edit operations themselves (crop,
//! rotate, circle annotation, channel isolation).
//!
//! Hosts drive an [`EditSession`] and supply images through [`ImageSource`]
//! and [`ImageSink`] implementations.

pub mod buffer;
pub mod config;
pub mod decode;
pub mod display;
pub mod encode;
pub mod error;
pub mod interaction;
pub mod session;
pub mod state;
pub mod transform;

pub use buffer::PixelBuffer;
pub use config::SessionConfig;
pub use decode::{decode_image, DecodeError, FileSource, ImageSource, MemorySource};
pub use display::{DisplayMapping, FilterType};
pub use encode::{encode_image, EncodeError, FileSink, ImageFormat, ImageSink, MemorySink};
pub use error::{EditError, SessionError};
pub use interaction::{
    ActiveTarget, CircleField, ClickOutcome, CropField, CropPhase, InteractionSequencer,
};
pub use session::{EditSession, PointerReadout};
pub use state::EditState;
pub use transform::{
    apply_crop, apply_rotation, draw_circle, isolate_channel, Channel, CircleStyle, CropRect,
    InterpolationFilter,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reexports_drive_a_session() {
        let mut session = EditSession::new(SessionConfig::default()).unwrap();
        session.load(PixelBuffer::filled(20, 10, [10, 20, 30])).unwrap();
        session.show_channel(Channel::Red).unwrap();

        let shown = session.render_display().unwrap();
        assert_eq!(shown.pixel(0, 0), Some([10, 0, 0]));
    }

    #[test]
    fn test_reexported_transforms_compose() {
        let img = PixelBuffer::filled(10, 10, [1, 2, 3]);
        let cropped = apply_crop(&img, 2, 2, 6, 6).unwrap();
        let circled = draw_circle(&cropped, 2, 2, 1, CircleStyle::default()).unwrap();
        assert_eq!((circled.width, circled.height), (4, 4));
        assert_eq!(isolate_channel(&circled, Channel::Blue).pixel(0, 3), Some([0, 0, 3]));
    }
}
