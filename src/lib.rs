// src/lib.rs
//! SuperGroup
//!
//! A scene-graph and transform library with a headless wgpu renderer.
//! Scenes are plain values; a [`Renderer`](gfx::rendering::Renderer) turns
//! them into draw calls for a pluggable backend.

pub mod app;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod math;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::SceneRunner;
pub use error::{RenderError, Result};

use gfx::rendering::{RendererConfig, WgpuBackend};
use gfx::scene::Scene;

/// Creates a runner drawing `scene` offscreen with the default wgpu settings
pub fn headless(scene: Scene) -> SceneRunner<WgpuBackend> {
    SceneRunner::new(scene, WgpuBackend::new(RendererConfig::default()))
}
