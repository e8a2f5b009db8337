//! # Scene Graph Module
//!
//! Scene graph values and traversal: transforms, meshes, drawable objects,
//! groups, and the [`Scene`] that flattens them into a draw list.
//!
//! ## Key Components
//!
//! - [`Transform`] - Rotation, scaling and translation slots composed in a configurable order
//! - [`Mesh`] - Indexed triangle geometry with derived per-corner normals
//! - [`SceneObject`] - A mesh placed in the scene with its own transform
//! - [`Group`] - Ordered children sharing a transform
//! - [`Scene`] - Top-level forest, camera, lighting and wireframe toggle
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use supergroup::gfx::camera::Camera;
//! use supergroup::gfx::scene::{Color, Group, Mesh, Scene, SceneObject};
//!
//! let mesh = Arc::new(Mesh::flat(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![[0, 1, 2]],
//!     Color::RED,
//! ));
//!
//! let mut group = Group::default();
//! group.add(SceneObject::from_mesh(mesh));
//!
//! let mut scene = Scene::new(Camera::default());
//! scene.add(group);
//! let frame = scene.draw_list();
//! ```

pub mod group;
pub mod mesh;
pub mod object;
#[allow(clippy::module_inception)]
pub mod scene;
pub mod transform;
pub mod vertex;

// Re-export main types
pub use group::{Group, InsertionPolicy, NodeId, SceneNode};
pub use mesh::{Color, Face, Mesh, MeshColor};
pub use object::{Scale, SceneObject};
pub use scene::{Scene, SceneStatistics};
pub use transform::{Axis, Transform, TransformStep};
pub use vertex::{DrawMode, Vertex3D, VertexBuffers};
