mod cube;

pub use cube::{CubeScene, ANGLE_STEP, CAMERA_DISTANCE, CUBE_EDGES, CUBE_VERTICES, FOCAL_LENGTH};
