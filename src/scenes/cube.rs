use glam::{Mat3, Vec2, Vec3};

use crate::image::{Bgr, ImageBuffer};
use crate::producer::FrameProducer;

/// Radians added to the angle every frame
pub const ANGLE_STEP: f32 = 0.03;
/// Projection scale in pixels
pub const FOCAL_LENGTH: f32 = 400.0;
/// Distance from the camera to the cube centre
pub const CAMERA_DISTANCE: f32 = 4.0;

const YAW_RATE: f32 = 0.9;
const PITCH_RATE: f32 = 0.7;

/// Corners of a cube of side 2 centred on the origin
pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Vertex index pairs: back face, front face, then the connecting edges
pub const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1), (1, 2), (2, 3), (3, 0),
    (4, 5), (5, 6), (6, 7), (7, 4),
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// Rotating wireframe cube
#[derive(Debug, Clone)]
pub struct CubeScene {
    pub angle: f32,
    pub color: Bgr,
    pub background: Bgr,
    pub thickness: u32,
}

impl CubeScene {
    pub fn new() -> Self {
        Self {
            angle: 0.0,
            color: [200, 255, 255],
            background: [0, 0, 0],
            thickness: 2,
        }
    }

    /// Start at a given angle instead of zero
    pub fn at_angle(angle: f32) -> Self {
        Self { angle, ..Self::new() }
    }

    /// Yaw about the vertical axis, then pitch about the horizontal one
    pub fn rotation(&self) -> Mat3 {
        Mat3::from_rotation_x(self.angle * PITCH_RATE) * Mat3::from_rotation_y(self.angle * YAW_RATE)
    }

    /// Screen-space positions of the 8 vertices for a `width`x`height` target
    pub fn project(&self, width: u32, height: u32) -> [Vec2; 8] {
        let rotation = self.rotation();
        let centre = Vec2::new(width as f32 * 0.5, height as f32 * 0.5);

        CUBE_VERTICES.map(|vertex| {
            let v = rotation * vertex;
            let z = v.z + CAMERA_DISTANCE;
            Vec2::new(v.x, v.y) * FOCAL_LENGTH / z + centre
        })
    }
}

impl Default for CubeScene {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameProducer for CubeScene {
    fn render(&self, image: &mut ImageBuffer) {
        image.clear(self.background);

        let points = self
            .project(image.width(), image.height())
            .map(|p| (p.x.round() as i32, p.y.round() as i32));

        for &(a, b) in &CUBE_EDGES {
            image.draw_line(points[a], points[b], self.color, self.thickness);
        }
    }

    fn advance(&mut self) {
        self.angle += ANGLE_STEP;
    }

    fn name(&self) -> &str {
        "Cube"
    }
}
