use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use super::ioctl::{FbBitfield, FixScreenInfo, VarScreenInfo};
use crate::error::{FramebufferError, Result};
use crate::pixel::{Channel, PixelFormat};

/// Screen layout negotiated with the device, fixed for the session lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeviceGeometry {
    /// Visible resolution in pixels
    pub width: u32,
    pub height: u32,
    /// Allocated scanout resolution, may exceed the visible one
    pub virtual_width: u32,
    pub virtual_height: u32,
    /// Panning offset of the visible area inside the virtual one
    pub x_offset: u32,
    pub y_offset: u32,
    pub format: PixelFormat,
    /// Bytes between the starts of consecutive scanlines
    pub line_stride: usize,
    /// Always `virtual_height * line_stride`
    pub mapped_length: usize,
}

impl DeviceGeometry {
    /// Build geometry from the two screen-info queries and check it is usable
    pub fn from_screen_info(fix: &FixScreenInfo, var: &VarScreenInfo) -> Result<Self> {
        let channel = |field: &FbBitfield| Channel::new(field.offset, field.length);
        let format = PixelFormat::from_layout(
            var.bits_per_pixel,
            channel(&var.red),
            channel(&var.green),
            channel(&var.blue),
        )?;

        let line_stride = fix.line_length as usize;
        let geometry = Self {
            width: var.xres,
            height: var.yres,
            virtual_width: var.xres_virtual,
            virtual_height: var.yres_virtual,
            x_offset: var.xoffset,
            y_offset: var.yoffset,
            format,
            line_stride,
            mapped_length: var.yres_virtual as usize * line_stride,
        };
        geometry.validate()?;

        if fix.smem_len != 0 && (fix.smem_len as usize) < geometry.mapped_length {
            return Err(FramebufferError::invalid_geometry(
                "FBIOGET_FSCREENINFO",
                format!(
                    "video memory is {} bytes but the virtual screen needs {}",
                    fix.smem_len, geometry.mapped_length
                ),
            ));
        }

        Ok(geometry)
    }

    /// Tightly packed geometry for a file-backed stand-in device
    pub fn emulated(mode: EmulatedMode) -> Result<Self> {
        let format = match mode.bits_per_pixel {
            16 => PixelFormat::Packed565,
            32 => PixelFormat::XRGB8888,
            other => {
                return Err(FramebufferError::unsupported(
                    other,
                    "emulated devices support 16 or 32 bpp",
                ))
            }
        };
        let line_stride = mode.width as usize * format.bytes_per_pixel();
        let geometry = Self {
            width: mode.width,
            height: mode.height,
            virtual_width: mode.width,
            virtual_height: mode.height,
            x_offset: 0,
            y_offset: 0,
            format,
            line_stride,
            mapped_length: mode.height as usize * line_stride,
        };
        geometry.validate()?;
        Ok(geometry)
    }

    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Check every invariant the blitter relies on for bounds safety
    pub fn validate(&self) -> Result<()> {
        let fail = |detail: String| Err(FramebufferError::invalid_geometry("FBIOGET_VSCREENINFO", detail));

        if self.width == 0 || self.height == 0 {
            return fail(format!("empty visible area {}x{}", self.width, self.height));
        }
        if self.x_offset as u64 + self.width as u64 > self.virtual_width as u64
            || self.y_offset as u64 + self.height as u64 > self.virtual_height as u64
        {
            return fail(format!(
                "visible area {}x{}+{}+{} exceeds virtual area {}x{}",
                self.width, self.height, self.x_offset, self.y_offset, self.virtual_width, self.virtual_height
            ));
        }
        let row_bytes = self.virtual_width as usize * self.bytes_per_pixel();
        if self.line_stride < row_bytes {
            return fail(format!(
                "line stride {} is shorter than a {}-pixel row ({} bytes)",
                self.line_stride, self.virtual_width, row_bytes
            ));
        }
        if self.virtual_height as usize * self.line_stride != self.mapped_length {
            return fail(format!(
                "mapped length {} != {} rows * {} stride",
                self.mapped_length, self.virtual_height, self.line_stride
            ));
        }
        Ok(())
    }
}

impl fmt::Display for DeviceGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} {}bpp", self.width, self.height, self.format.bits_per_pixel())
    }
}

/// `WIDTHxHEIGHTxBPP`, e.g. `640x480x32`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmulatedMode {
    pub width: u32,
    pub height: u32,
    pub bits_per_pixel: u32,
}

impl FromStr for EmulatedMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('x').collect();
        let [width, height, bits_per_pixel] = parts.as_slice() else {
            return Err(format!("expected WIDTHxHEIGHTxBPP, got {s:?}"));
        };
        let number = |value: &str, name: &str| {
            value
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid {name} {value:?}: {e}"))
        };
        Ok(Self {
            width: number(*width, "width")?,
            height: number(*height, "height")?,
            bits_per_pixel: number(*bits_per_pixel, "bpp")?,
        })
    }
}
