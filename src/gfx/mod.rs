//! # Graphics Module
//!
//! Everything between a scene description and pixels.
//!
//! ## Architecture Overview
//!
//! - **Scene Graph** ([`scene`]) - Transforms, meshes, objects, groups and the scene
//! - **Camera** ([`camera`]) - Look-at view matrix with orthographic and perspective projections
//! - **Geometry** ([`geometry`]) - Procedural vertex and face lists
//! - **Rendering** ([`rendering`]) - Draw lists, renderer lifecycle and backends
//! - **Resources** ([`resources`]) - Offscreen GPU targets
//!
//! ## Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use supergroup::gfx::camera::Camera;
//! use supergroup::gfx::geometry::cube;
//! use supergroup::gfx::rendering::{RecordingBackend, Renderer};
//! use supergroup::gfx::scene::{Color, Scene, SceneObject};
//!
//! let mut scene = Scene::new(Camera::default());
//! scene.add(SceneObject::from_mesh(Arc::new(cube(1.0, Color::RED, false))));
//!
//! let mut renderer = Renderer::new(RecordingBackend::new());
//! renderer.initialize().unwrap();
//! renderer.render(&scene).unwrap();
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::Camera;
pub use rendering::Renderer;
pub use scene::Scene;
