// cli.rs - Command-line interface configuration
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::device::{EmulatedMode, DEFAULT_DEVICE};
use crate::render_loop::LoopOptions;

#[derive(Parser, Debug, Clone)]
#[command(name = "fb-compositor")]
#[command(about = "Draws a rotating wireframe cube straight into a Linux framebuffer", long_about = None)]
pub struct Cli {
    /// Framebuffer device node [default: /dev/fb0]
    #[arg(value_name = "DEVICE", conflicts_with = "device_flag")]
    pub device_path: Option<PathBuf>,

    /// Same as the positional DEVICE
    #[arg(long = "device", value_name = "PATH")]
    pub device_flag: Option<PathBuf>,

    /// Sleep between frames, in milliseconds
    #[arg(long = "interval-ms", default_value_t = 16)]
    pub interval_ms: u64,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Print the negotiated geometry as JSON and exit
    #[arg(long = "print-geometry")]
    pub print_geometry: bool,

    /// Treat DEVICE as a regular file with this geometry, e.g. 640x480x32
    #[arg(long, value_name = "WxHxBPP")]
    pub emulate: Option<EmulatedMode>,
}

impl Cli {
    /// Device node from either form, `/dev/fb0` when neither is given
    pub fn device(&self) -> PathBuf {
        self.device_path
            .clone()
            .or_else(|| self.device_flag.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DEVICE))
    }

    pub fn loop_options(&self) -> LoopOptions {
        LoopOptions {
            interval: Duration::from_millis(self.interval_ms),
            frame_limit: self.frames,
        }
    }
}
