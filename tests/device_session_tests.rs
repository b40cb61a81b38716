use std::path::PathBuf;

use fb_compositor::{DeviceSession, EmulatedMode, FramebufferError, ImageBuffer};

struct ScratchFile(PathBuf);

impl ScratchFile {
    fn new(name: &str) -> Self {
        Self(std::env::temp_dir().join(format!("fb-compositor-it-{}-{}", std::process::id(), name)))
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn missing_node_reports_device_unavailable() {
    let err = DeviceSession::open("/dev/this-framebuffer-does-not-exist").unwrap_err();
    assert!(matches!(err, FramebufferError::DeviceUnavailable { .. }));
    assert!(err.to_string().contains("this-framebuffer-does-not-exist"));
}

#[test]
fn non_framebuffer_node_fails_geometry_query() {
    let err = DeviceSession::open("/dev/null").unwrap_err();
    assert!(matches!(err, FramebufferError::GeometryQueryFailed { .. }));
}

#[test]
fn emulated_device_receives_frames() {
    let scratch = ScratchFile::new("green");
    let mode = EmulatedMode { width: 4, height: 4, bits_per_pixel: 16 };

    let mut session = DeviceSession::open_emulated(&scratch.0, mode).unwrap();
    assert_eq!(session.geometry().mapped_length, 32);
    session.present(&ImageBuffer::filled(4, 4, [0, 255, 0])).unwrap();
    session.close();

    let bytes = std::fs::read(&scratch.0).unwrap();
    assert_eq!(bytes.len(), 32);
    for cell in bytes.chunks_exact(2) {
        assert_eq!(u16::from_ne_bytes([cell[0], cell[1]]), 0x07E0);
    }
}

#[test]
fn teardown_runs_once_across_close_and_drop() {
    let scratch = ScratchFile::new("teardown");
    let mode = EmulatedMode { width: 16, height: 8, bits_per_pixel: 32 };

    let mut session = DeviceSession::open_emulated(&scratch.0, mode).unwrap();
    session.present(&ImageBuffer::filled(16, 8, [1, 2, 3])).unwrap();
    session.close();
    session.close();
    assert!(!session.is_open());
    assert!(session.memory_mut().is_none());
    drop(session);

    // reopening sees the frame written before teardown
    let session = DeviceSession::open_emulated(&scratch.0, mode).unwrap();
    let memory = session.memory().unwrap();
    assert_eq!(&memory[..4], &0x0003_0201u32.to_ne_bytes());
}

#[test]
fn unsupported_emulated_depth_leaves_no_file_behind() {
    let scratch = ScratchFile::new("bad-depth");
    let err = DeviceSession::open_emulated(&scratch.0, EmulatedMode { width: 4, height: 4, bits_per_pixel: 8 }).unwrap_err();
    assert!(matches!(err, FramebufferError::UnsupportedPixelFormat { bits_per_pixel: 8, .. }));
    assert!(!scratch.0.exists());
}
