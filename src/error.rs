use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced while negotiating with or writing to a framebuffer device
#[derive(Debug, Error)]
pub enum FramebufferError {
    /// Device node missing or permission denied
    #[error("cannot open framebuffer device {}: {source}", .path.display())]
    DeviceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A screen-info query failed or returned geometry we cannot trust
    #[error("{call} failed: {source}")]
    GeometryQueryFailed {
        call: &'static str,
        #[source]
        source: io::Error,
    },

    /// The kernel refused to map video memory
    #[error("mmap of {len} bytes failed: {source}")]
    MappingFailed {
        len: usize,
        #[source]
        source: io::Error,
    },

    /// Bit depth or channel layout outside Packed565 / offset-described
    #[error("unsupported pixel format ({bits_per_pixel} bpp): {detail}")]
    UnsupportedPixelFormat {
        bits_per_pixel: u32,
        detail: String,
    },

    /// Write attempted after the session was torn down
    #[error("framebuffer session already closed")]
    SessionClosed,
}

impl FramebufferError {
    pub(crate) fn invalid_geometry(call: &'static str, detail: impl Into<String>) -> Self {
        Self::GeometryQueryFailed {
            call,
            source: io::Error::new(io::ErrorKind::InvalidData, detail.into()),
        }
    }

    pub(crate) fn unsupported(bits_per_pixel: u32, detail: impl Into<String>) -> Self {
        Self::UnsupportedPixelFormat {
            bits_per_pixel,
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FramebufferError>;
