use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::{debug, info};

use crate::device::DeviceSession;
use crate::error::Result;
use crate::frame::{FrameIterator, FrameStats};
use crate::image::ImageBuffer;
use crate::producer::FrameProducer;

/// Frames between fps log lines
const STATS_INTERVAL: u64 = 300;

/// Cadence and length of a render run
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Fixed sleep after each frame
    pub interval: Duration,
    /// Stop after this many frames
    pub frame_limit: Option<u64>,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(16),
            frame_limit: None,
        }
    }
}

/// Generate, blit, sleep until `stop` is set or the frame limit is reached.
///
/// Returns the number of frames presented. Any blit failure ends the loop;
/// the session is left for the caller to drop.
pub fn run<P: FrameProducer>(
    session: &mut DeviceSession,
    producer: &mut P,
    options: &LoopOptions,
    stop: &AtomicBool,
) -> Result<u64> {
    let geometry = *session.geometry();
    let mut image = ImageBuffer::new(geometry.width, geometry.height);
    let mut frames = FrameIterator::new(options.frame_limit);
    let mut stats = FrameStats::new(STATS_INTERVAL);
    let mut presented = 0;

    info!("rendering {} at {} every {:?}", producer.name(), geometry, options.interval);

    for frame in frames.by_ref() {
        if stop.load(Ordering::SeqCst) {
            info!("stop requested after {} frames", presented);
            break;
        }

        producer.render(&mut image);
        session.present(&image)?;
        producer.advance();
        presented += 1;

        if let Some(fps) = stats.tick(frame.delta) {
            debug!("frame {}: {:.1} fps", frame.number, fps);
        }

        thread::sleep(options.interval);
    }

    info!("presented {} frames in {:.1?}", presented, frames.elapsed());
    Ok(presented)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::EmulatedMode;
    use crate::scenes::CubeScene;

    fn emulated_session(name: &str) -> (DeviceSession, std::path::PathBuf) {
        let path = std::env::temp_dir().join(format!("fb-compositor-loop-{}-{}", std::process::id(), name));
        let mode = EmulatedMode { width: 64, height: 48, bits_per_pixel: 16 };
        (DeviceSession::open_emulated(&path, mode).unwrap(), path)
    }

    #[test]
    fn runs_until_frame_limit() {
        let (mut session, path) = emulated_session("limit");
        let mut scene = CubeScene::new();
        let options = LoopOptions { interval: Duration::ZERO, frame_limit: Some(5) };

        let presented = run(&mut session, &mut scene, &options, &AtomicBool::new(false)).unwrap();

        assert_eq!(presented, 5);
        assert!((scene.angle - 0.15).abs() < 1e-5);
        drop(session);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn stop_flag_ends_loop_before_drawing() {
        let (mut session, path) = emulated_session("stop");
        let mut scene = CubeScene::new();
        let options = LoopOptions { interval: Duration::ZERO, frame_limit: None };

        let presented = run(&mut session, &mut scene, &options, &AtomicBool::new(true)).unwrap();

        assert_eq!(presented, 0);
        assert!(session.memory().unwrap().iter().all(|&b| b == 0));
        drop(session);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn closed_session_ends_loop_with_error() {
        let (mut session, path) = emulated_session("closed");
        session.close();
        let options = LoopOptions { interval: Duration::ZERO, frame_limit: Some(3) };

        let result = run(&mut session, &mut CubeScene::new(), &options, &AtomicBool::new(false));

        assert!(result.is_err());
        std::fs::remove_file(path).unwrap();
    }
}
