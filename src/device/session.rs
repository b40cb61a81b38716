use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

use log::{debug, info};
use memmap2::{MmapMut, MmapOptions};

use super::geometry::{DeviceGeometry, EmulatedMode};
use super::ioctl;
use crate::blit::blit;
use crate::error::{FramebufferError, Result};
use crate::image::ImageBuffer;

/// An open framebuffer: descriptor, negotiated geometry and mapped video memory.
///
/// Dropping the session (or calling [`close`](Self::close)) unmaps the memory
/// and then closes the descriptor. Both steps happen at most once.
#[derive(Debug)]
pub struct DeviceSession {
    path: PathBuf,
    geometry: DeviceGeometry,
    memory: Option<MmapMut>,
    file: Option<File>,
}

impl DeviceSession {
    /// Open a framebuffer device node, query its geometry and map its memory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = open_read_write(path, false)?;

        let fd = file.as_raw_fd();
        let fix = ioctl::fixed_screen_info(fd).map_err(|source| FramebufferError::GeometryQueryFailed {
            call: "FBIOGET_FSCREENINFO",
            source,
        })?;
        let var = ioctl::variable_screen_info(fd).map_err(|source| FramebufferError::GeometryQueryFailed {
            call: "FBIOGET_VSCREENINFO",
            source,
        })?;
        let geometry = DeviceGeometry::from_screen_info(&fix, &var)?;

        info!(
            "{}: {} ({}), virtual {}x{} at +{}+{}, stride {} bytes",
            path.display(),
            geometry,
            fix.id(),
            geometry.virtual_width,
            geometry.virtual_height,
            geometry.x_offset,
            geometry.y_offset,
            geometry.line_stride
        );

        Self::map(path, file, geometry)
    }

    /// Use a regular file as a stand-in device with the given geometry.
    ///
    /// The file is created if missing and resized to the mapped length, so
    /// frames can be inspected after the session ends.
    pub fn open_emulated(path: impl AsRef<Path>, mode: EmulatedMode) -> Result<Self> {
        let path = path.as_ref();
        let geometry = DeviceGeometry::emulated(mode)?;
        let file = open_read_write(path, true)?;
        file.set_len(geometry.mapped_length as u64)
            .map_err(|source| FramebufferError::DeviceUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        info!("{}: emulated {}", path.display(), geometry);
        Self::map(path, file, geometry)
    }

    fn map(path: &Path, file: File, geometry: DeviceGeometry) -> Result<Self> {
        // SAFETY: the mapping is owned by the session and dropped before the
        // descriptor. Other writers to the same device are outside our control.
        let memory = unsafe { MmapOptions::new().len(geometry.mapped_length).map_mut(&file) }
            .map_err(|source| FramebufferError::MappingFailed {
                len: geometry.mapped_length,
                source,
            })?;
        debug!("mapped {} bytes of {}", geometry.mapped_length, path.display());

        Ok(Self {
            path: path.to_path_buf(),
            geometry,
            memory: Some(memory),
            file: Some(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn geometry(&self) -> &DeviceGeometry {
        &self.geometry
    }

    /// True until the session is torn down
    pub fn is_open(&self) -> bool {
        self.memory.is_some()
    }

    /// The mapped video memory, `None` once closed
    pub fn memory(&self) -> Option<&[u8]> {
        self.memory.as_deref()
    }

    pub fn memory_mut(&mut self) -> Option<&mut [u8]> {
        self.memory.as_deref_mut()
    }

    /// Blit a frame into video memory
    pub fn present(&mut self, image: &ImageBuffer) -> Result<()> {
        let memory = self.memory.as_deref_mut().ok_or(FramebufferError::SessionClosed)?;
        blit(image, memory, &self.geometry);
        Ok(())
    }

    /// Unmap then close. Safe to call more than once.
    pub fn close(&mut self) {
        if let Some(memory) = self.memory.take() {
            drop(memory);
            debug!("unmapped {}", self.path.display());
        }
        if let Some(file) = self.file.take() {
            drop(file);
            debug!("closed {}", self.path.display());
        }
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        self.close();
    }
}

fn open_read_write(path: &Path, create: bool) -> Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(create)
        .truncate(false)
        .open(path)
        .map_err(|source| FramebufferError::DeviceUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("fb-compositor-{}-{}", std::process::id(), name))
    }

    #[test]
    fn missing_device_is_unavailable() {
        let err = DeviceSession::open("/nonexistent/fb99").unwrap_err();
        assert!(matches!(err, FramebufferError::DeviceUnavailable { .. }));
    }

    #[test]
    fn regular_file_fails_geometry_query() {
        let path = scratch_path("not-a-device");
        std::fs::write(&path, [0u8; 64]).unwrap();

        let err = DeviceSession::open(&path).unwrap_err();
        assert!(matches!(
            err,
            FramebufferError::GeometryQueryFailed { call: "FBIOGET_FSCREENINFO", .. }
        ));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unmappable_node_reports_mapping_failure() {
        let null = Path::new("/dev/null");
        let file = open_read_write(null, false).unwrap();
        let mode = EmulatedMode { width: 4, height: 4, bits_per_pixel: 16 };
        let geometry = DeviceGeometry::emulated(mode).unwrap();

        let err = DeviceSession::map(null, file, geometry).unwrap_err();
        assert!(matches!(err, FramebufferError::MappingFailed { len: 32, .. }));
    }

    #[test]
    fn close_is_idempotent() {
        let path = scratch_path("idempotent");
        let mode = EmulatedMode { width: 8, height: 8, bits_per_pixel: 32 };
        let mut session = DeviceSession::open_emulated(&path, mode).unwrap();
        assert!(session.is_open());

        session.close();
        session.close();
        assert!(!session.is_open());
        assert!(session.memory().is_none());
        drop(session);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn present_after_close_is_rejected() {
        let path = scratch_path("closed");
        let mode = EmulatedMode { width: 4, height: 4, bits_per_pixel: 16 };
        let mut session = DeviceSession::open_emulated(&path, mode).unwrap();
        session.close();

        let image = ImageBuffer::new(4, 4);
        assert!(matches!(session.present(&image), Err(FramebufferError::SessionClosed)));

        std::fs::remove_file(&path).unwrap();
    }
}
