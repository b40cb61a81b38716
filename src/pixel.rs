// pixel.rs - BGR888 to device pixel encoding
use serde::Serialize;

use crate::error::{FramebufferError, Result};

/// Bit position and width of a color channel within a device pixel word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Channel {
    pub offset: u32,
    pub length: u32,
}

impl Channel {
    pub const fn new(offset: u32, length: u32) -> Self {
        Self { offset, length }
    }

    /// Mask an 8-bit value to the channel width and move it into place
    #[inline]
    fn place(&self, value: u8) -> u32 {
        let mask = if self.length >= 32 { u32::MAX } else { (1u32 << self.length) - 1 };
        (value as u32 & mask).checked_shl(self.offset).unwrap_or(0)
    }
}

/// Native encoding of the device's pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum PixelFormat {
    /// 16 bpp, red in the top 5 bits, green middle 6, blue low 5
    Packed565,
    /// 24/32 bpp with per-channel offsets reported by the driver
    OffsetDescribed {
        red: Channel,
        green: Channel,
        blue: Channel,
        bits_per_pixel: u32,
    },
}

impl PixelFormat {
    /// Classic 32-bit XRGB8888
    pub const XRGB8888: PixelFormat = PixelFormat::OffsetDescribed {
        red: Channel::new(16, 8),
        green: Channel::new(8, 8),
        blue: Channel::new(0, 8),
        bits_per_pixel: 32,
    };

    /// Pick the encoding for a reported bit depth and channel layout.
    ///
    /// 16 bpp is always treated as 5-6-5 regardless of the reported offsets.
    /// 24 and 32 bpp use the reported layout, which must fit inside the pixel
    /// word with no channel wider than 8 bits. Anything else is rejected.
    pub fn from_layout(bits_per_pixel: u32, red: Channel, green: Channel, blue: Channel) -> Result<Self> {
        match bits_per_pixel {
            16 => Ok(PixelFormat::Packed565),
            24 | 32 => {
                for (name, channel) in [("red", red), ("green", green), ("blue", blue)] {
                    if channel.length == 0 {
                        return Err(FramebufferError::unsupported(
                            bits_per_pixel,
                            format!("{name} channel has zero length"),
                        ));
                    }
                    if channel.length > 8 {
                        return Err(FramebufferError::unsupported(
                            bits_per_pixel,
                            format!("{name} channel is {} bits wide, sources carry 8", channel.length),
                        ));
                    }
                    if channel.offset.saturating_add(channel.length) > bits_per_pixel {
                        return Err(FramebufferError::unsupported(
                            bits_per_pixel,
                            format!(
                                "{name} channel (offset {}, length {}) overflows the pixel word",
                                channel.offset, channel.length
                            ),
                        ));
                    }
                }
                Ok(PixelFormat::OffsetDescribed {
                    red,
                    green,
                    blue,
                    bits_per_pixel,
                })
            }
            other => Err(FramebufferError::unsupported(
                other,
                "only 16 bpp (565) and 24/32 bpp offset-described formats are supported",
            )),
        }
    }

    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            PixelFormat::Packed565 => 16,
            PixelFormat::OffsetDescribed { bits_per_pixel, .. } => *bits_per_pixel,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        (self.bits_per_pixel() / 8) as usize
    }

    /// Pack one pixel into the device word, before byte-order conversion
    #[inline]
    pub fn pack(&self, blue: u8, green: u8, red: u8) -> u32 {
        match self {
            PixelFormat::Packed565 => {
                let r = (red >> 3) as u32;
                let g = (green >> 2) as u32;
                let b = (blue >> 3) as u32;
                (r << 11) | (g << 5) | b
            }
            PixelFormat::OffsetDescribed { red: rc, green: gc, blue: bc, .. } => {
                rc.place(red) | gc.place(green) | bc.place(blue)
            }
        }
    }
}

/// An encoded pixel: up to 4 bytes in native byte order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedPixel {
    bytes: [u8; 4],
    len: u8,
}

impl EncodedPixel {
    #[inline]
    fn from_word(word: u32, len: usize) -> Self {
        let ne = word.to_ne_bytes();
        // On big-endian hosts the significant bytes sit at the end of the word
        let start = if cfg!(target_endian = "big") { 4 - len } else { 0 };
        let mut bytes = [0u8; 4];
        bytes[..len].copy_from_slice(&ne[start..start + len]);
        Self { bytes, len: len as u8 }
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }
}

/// Encode one BGR888 source pixel for the device
#[inline]
pub fn encode(blue: u8, green: u8, red: u8, format: &PixelFormat) -> EncodedPixel {
    EncodedPixel::from_word(format.pack(blue, green, red), format.bytes_per_pixel())
}
