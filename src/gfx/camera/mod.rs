#[allow(clippy::module_inception)]
pub mod camera;
pub mod camera_utils;

// Re-export main types
pub use camera::{Camera, Frustum, ProjectionKind};
pub use camera_utils::{CameraUniform, ModelUniform};
