// Render-facing outputs: orbit camera and per-part instance data

pub mod camera;
pub mod part_instance;

pub use camera::{CameraController, CameraState};
pub use part_instance::PartInstance;
