//! In-memory backend that records every frame it is given.
//!
//! Useful for tests and tools that need to inspect what a scene submits
//! without a GPU.

use crate::error::{RenderError, Result};
use crate::gfx::scene::group::NodeId;
use crate::gfx::scene::vertex::{DrawMode, VertexBuffers};
use crate::math::Matrix4;

use super::draw_list::{DrawCall, FrameUniforms};
use super::renderer::RenderBackend;

/// Owned copy of one draw call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedDraw {
    pub node: NodeId,
    pub model: Matrix4,
    pub mode: DrawMode,
    pub buffers: VertexBuffers,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub uniforms: FrameUniforms,
    pub draws: Vec<RecordedDraw>,
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    frames: Vec<RecordedFrame>,
    current: Option<RecordedFrame>,
    init_failure: Option<String>,
    initialize_calls: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose initialization fails with a shader error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            init_failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Completed frames, oldest first
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }

    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn initialize(&mut self) -> Result<()> {
        self.initialize_calls += 1;
        match &self.init_failure {
            Some(message) => Err(RenderError::Shader(message.clone())),
            None => Ok(()),
        }
    }

    fn begin_frame(&mut self, uniforms: &FrameUniforms) {
        self.current = Some(RecordedFrame {
            uniforms: *uniforms,
            draws: Vec::new(),
        });
    }

    fn draw(&mut self, _uniforms: &FrameUniforms, call: &DrawCall<'_>) {
        if let Some(frame) = self.current.as_mut() {
            frame.draws.push(RecordedDraw {
                node: call.node,
                model: call.model,
                mode: call.mode,
                buffers: call.buffers.clone().into_owned(),
            });
        }
    }

    fn end_frame(&mut self) -> Result<()> {
        let frame = self
            .current
            .take()
            .ok_or_else(|| RenderError::Backend("end_frame without begin_frame".to_string()))?;
        self.frames.push(frame);
        Ok(())
    }
}
