// blit.rs - copy a BGR image into mapped video memory
use crate::device::DeviceGeometry;
use crate::image::ImageBuffer;
use crate::pixel::encode;

/// Copy `source` into `mapped`, converting each pixel to the device format.
///
/// The copied rectangle is the intersection of the source and the visible
/// area, placed at the device's panning offset. `mapped` must be the session's
/// full mapping; writing outside it means the geometry is inconsistent, which
/// panics rather than corrupting memory.
pub fn blit(source: &ImageBuffer, mapped: &mut [u8], geometry: &DeviceGeometry) {
    assert!(
        mapped.len() >= geometry.mapped_length,
        "mapping is {} bytes, geometry expects {}",
        mapped.len(),
        geometry.mapped_length
    );

    let bytes_per_pixel = geometry.bytes_per_pixel();
    let copy_width = source.width().min(geometry.width) as usize;
    let copy_height = source.height().min(geometry.height);
    if copy_width == 0 {
        return;
    }

    let row_bytes = copy_width * bytes_per_pixel;
    let x_start = geometry.x_offset as usize * bytes_per_pixel;

    for y in 0..copy_height {
        let row_start = (y as usize + geometry.y_offset as usize) * geometry.line_stride + x_start;
        let dst = &mut mapped[row_start..row_start + row_bytes];
        let src = source.row(y);

        for (dst_px, src_px) in dst.chunks_exact_mut(bytes_per_pixel).zip(src.chunks_exact(ImageBuffer::CHANNELS)) {
            let encoded = encode(src_px[0], src_px[1], src_px[2], &geometry.format);
            dst_px.copy_from_slice(encoded.as_bytes());
        }
    }
}
