// image.rs - BGR888 source image handed to the blitter

/// Blue, green, red
pub type Bgr = [u8; 3];

/// Row-major image of 8-bit BGR triples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageBuffer {
    pub const CHANNELS: usize = 3;

    /// Black image of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0])
    }

    /// Image with every pixel set to `color`
    pub fn filled(width: u32, height: u32, color: Bgr) -> Self {
        let data = color.repeat(width as usize * height as usize);
        Self { width, height, data }
    }

    /// Wrap existing BGR data; `None` if the length does not match the size
    pub fn from_bgr(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        (data.len() == width as usize * height as usize * Self::CHANNELS).then_some(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row
    pub fn stride(&self) -> usize {
        self.width as usize * Self::CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// One row of BGR triples
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride();
        &self.data[start..start + self.stride()]
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Bgr> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * Self::CHANNELS;
        Some([self.data[idx], self.data[idx + 1], self.data[idx + 2]])
    }

    /// Fill the whole image with one color
    pub fn clear(&mut self, color: Bgr) {
        for px in self.data.chunks_exact_mut(Self::CHANNELS) {
            px.copy_from_slice(&color);
        }
    }

    /// Set a pixel, ignoring coordinates outside the image
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Bgr) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = y as usize * self.stride() + x as usize * Self::CHANNELS;
        self.data[idx..idx + Self::CHANNELS].copy_from_slice(&color);
    }

    /// Fill a `size`x`size` square roughly centred on (x, y)
    fn stamp(&mut self, x: i32, y: i32, size: u32, color: Bgr) {
        let size = size.max(1) as i32;
        let start = -(size - 1) / 2;
        for dy in start..start + size {
            for dx in start..start + size {
                self.set_pixel(x + dx, y + dy, color);
            }
        }
    }

    /// Draw a line using Bresenham's algorithm, clipped to the image
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Bgr, thickness: u32) {
        let (mut x, mut y) = from;
        let (x2, y2) = to;

        let dx = (x2 - x).abs();
        let dy = -(y2 - y).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sy = if y < y2 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.stamp(x, y, thickness, color);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }
}
