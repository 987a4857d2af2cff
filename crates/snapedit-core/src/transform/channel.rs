//! Single-channel isolation.

use serde::{Deserialize, Serialize};

use crate::buffer::PixelBuffer;

/// One of the three color channels of a [`PixelBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// Byte offset of this channel within an RGB pixel.
    pub fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        };
        f.write_str(name)
    }
}

/// Keep one channel and zero the other two at every pixel.
///
/// The output has the same dimensions as the input.
pub fn isolate_channel(image: &PixelBuffer, channel: Channel) -> PixelBuffer {
    let keep = channel.offset();
    let mut output = vec![0u8; image.pixels.len()];

    for (dst, src) in output
        .chunks_exact_mut(3)
        .zip(image.pixels.chunks_exact(3))
    {
        dst[keep] = src[keep];
    }

    PixelBuffer::new(image.width, image.height, output)
}
