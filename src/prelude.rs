//! # SuperGroup Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use supergroup::prelude::*;
//!
//! let mut scene = Scene::new(Camera::default());
//! let mut group = Group::new(Vector3::new(0.0, 0.0, -2900.0));
//! group.add(SceneObject::from_mesh(Arc::new(pyramid(500.0, 500.0, Color::GREEN))));
//! scene.add(group);
//! ```

pub use std::sync::Arc;

// Re-export core application types
pub use crate::app::SceneRunner;
pub use crate::error::RenderError;
pub use crate::headless;

// Re-export math and scene types
pub use crate::math::{Matrix4, Vector3};
pub use crate::gfx::scene::{
    Axis, Color, DrawMode, Group, InsertionPolicy, Mesh, MeshColor, NodeId, Scale, Scene,
    SceneNode, SceneObject, Transform, TransformStep,
};
pub use crate::gfx::camera::{Camera, Frustum, ProjectionKind};
pub use crate::gfx::geometry::{cube, icosphere, plane, pyramid, GeometryData};

// Re-export rendering types
pub use crate::gfx::rendering::{
    DrawList, RecordingBackend, RenderBackend, Renderer, RendererConfig, WgpuBackend,
};
