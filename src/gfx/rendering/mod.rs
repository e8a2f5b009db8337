//! # Rendering Module
//!
//! Turns a [`Scene`](crate::gfx::scene::Scene) into draw calls and hands them
//! to a backend.
//!
//! ## Key Components
//!
//! - [`DrawList`] - Per-frame uniforms plus one draw call per visible leaf
//! - [`Renderer`] - Lifecycle state machine around a [`RenderBackend`]
//! - [`RecordingBackend`] - In-memory backend for inspection and tests
//! - [`WgpuBackend`] - Headless GPU backend rendering to an offscreen target

pub mod draw_list;
pub mod pipeline_manager;
pub mod recording;
pub mod renderer;
pub mod wgpu_backend;

// Re-export main types
pub use draw_list::{DrawCall, DrawList, FrameUniforms};
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use recording::{RecordedDraw, RecordedFrame, RecordingBackend};
pub use renderer::{FrameStats, RenderBackend, Renderer, RendererState};
pub use wgpu_backend::{RendererConfig, WgpuBackend};
