// ioctl.rs - Linux fbdev screen-info queries
//
// Layouts mirror <linux/fb.h>. Only the fields the compositor reads are
// touched; the rest exist so the kernel can fill the full struct.

use std::io;
use std::os::fd::RawFd;

use bytemuck::Zeroable;

pub const FBIOGET_VSCREENINFO: libc::c_ulong = 0x4600;
pub const FBIOGET_FSCREENINFO: libc::c_ulong = 0x4602;

/// Position and width of one color channel inside a pixel word
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Zeroable)]
pub struct FbBitfield {
    pub offset: u32,
    pub length: u32,
    pub msb_right: u32,
}

/// `struct fb_fix_screeninfo`
#[repr(C)]
#[derive(Debug, Clone, Copy, Zeroable)]
pub struct FixScreenInfo {
    pub id: [u8; 16],
    pub smem_start: libc::c_ulong,
    pub smem_len: u32,
    pub type_: u32,
    pub type_aux: u32,
    pub visual: u32,
    pub xpanstep: u16,
    pub ypanstep: u16,
    pub ywrapstep: u16,
    pub line_length: u32,
    pub mmio_start: libc::c_ulong,
    pub mmio_len: u32,
    pub accel: u32,
    pub capabilities: u16,
    pub reserved: [u16; 2],
}

impl FixScreenInfo {
    /// Driver identification string, trimmed at the first NUL
    pub fn id(&self) -> String {
        let end = self.id.iter().position(|&b| b == 0).unwrap_or(self.id.len());
        String::from_utf8_lossy(&self.id[..end]).into_owned()
    }
}

/// `struct fb_var_screeninfo`
#[repr(C)]
#[derive(Debug, Clone, Copy, Zeroable)]
pub struct VarScreenInfo {
    pub xres: u32,
    pub yres: u32,
    pub xres_virtual: u32,
    pub yres_virtual: u32,
    pub xoffset: u32,
    pub yoffset: u32,
    pub bits_per_pixel: u32,
    pub grayscale: u32,
    pub red: FbBitfield,
    pub green: FbBitfield,
    pub blue: FbBitfield,
    pub transp: FbBitfield,
    pub nonstd: u32,
    pub activate: u32,
    pub height: u32,
    pub width: u32,
    pub accel_flags: u32,
    pub pixclock: u32,
    pub left_margin: u32,
    pub right_margin: u32,
    pub upper_margin: u32,
    pub lower_margin: u32,
    pub hsync_len: u32,
    pub vsync_len: u32,
    pub sync: u32,
    pub vmode: u32,
    pub rotate: u32,
    pub colorspace: u32,
    pub reserved: [u32; 4],
}

/// Issue a read-style ioctl that fills `T` in place
///
/// # Safety
/// `request` must be an ioctl whose argument is a pointer to a `T`.
unsafe fn read_ioctl<T: Zeroable>(fd: RawFd, request: libc::c_ulong) -> io::Result<T> {
    let mut value = T::zeroed();
    if libc::ioctl(fd, request as _, &mut value as *mut T) == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(value)
}

/// FBIOGET_FSCREENINFO: line stride and memory size
pub fn fixed_screen_info(fd: RawFd) -> io::Result<FixScreenInfo> {
    // SAFETY: FBIOGET_FSCREENINFO writes exactly one fb_fix_screeninfo.
    unsafe { read_ioctl(fd, FBIOGET_FSCREENINFO) }
}

/// FBIOGET_VSCREENINFO: resolution, virtual resolution, offsets, channel layout
pub fn variable_screen_info(fd: RawFd) -> io::Result<VarScreenInfo> {
    // SAFETY: FBIOGET_VSCREENINFO writes exactly one fb_var_screeninfo.
    unsafe { read_ioctl(fd, FBIOGET_VSCREENINFO) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::os::fd::AsRawFd;

    #[test]
    fn var_screeninfo_matches_kernel_size() {
        // 40 u32 words in <linux/fb.h>
        assert_eq!(std::mem::size_of::<VarScreenInfo>(), 160);
    }

    #[test]
    fn fix_screeninfo_id_trims_nul() {
        let mut info = FixScreenInfo::zeroed();
        info.id[..7].copy_from_slice(b"simplfb");
        assert_eq!(info.id(), "simplfb");
    }

    #[test]
    fn query_on_regular_file_is_rejected() {
        let file = File::open("Cargo.toml").unwrap();
        let err = fixed_screen_info(file.as_raw_fd()).unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
    }
}
