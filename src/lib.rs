pub mod blit;
pub mod cli;
pub mod device;
pub mod error;
pub mod frame;
pub mod image;
pub mod pixel;
pub mod producer;
pub mod render_loop;
pub mod scenes;
pub mod signal;

pub use blit::blit;
pub use device::{DeviceGeometry, DeviceSession, EmulatedMode};
pub use error::FramebufferError;
pub use image::ImageBuffer;
pub use pixel::{encode, Channel, PixelFormat};
pub use producer::FrameProducer;
