//! Linux fbdev access: screen-info negotiation and mapped video memory

mod geometry;
mod ioctl;
mod session;

pub use geometry::{DeviceGeometry, EmulatedMode};
pub use ioctl::{FbBitfield, FixScreenInfo, VarScreenInfo};
pub use session::DeviceSession;

/// Device node used when none is given
pub const DEFAULT_DEVICE: &str = "/dev/fb0";
