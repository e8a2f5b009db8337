//! # Draw Lists
//!
//! The flattened output of a scene traversal. A [`DrawList`] carries the
//! per-frame uniforms once and one [`DrawCall`] per visible leaf, in the
//! order the leaves were visited.

use std::borrow::Cow;

use crate::gfx::camera::CameraUniform;
use crate::gfx::scene::group::NodeId;
use crate::gfx::scene::vertex::{DrawMode, VertexBuffers};
use crate::math::{Matrix4, Vector3};

/// Values shared by every draw call of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameUniforms {
    pub projection: Matrix4,
    pub camera: Matrix4,
    pub lighting: Vector3,
}

impl FrameUniforms {
    /// GPU layout of these uniforms
    pub fn to_camera_uniform(&self) -> CameraUniform {
        CameraUniform::new(self.camera, self.projection, self.lighting)
    }
}

/// One leaf ready to be drawn
#[derive(Debug, Clone)]
pub struct DrawCall<'a> {
    pub node: NodeId,
    /// Accumulated parent transforms times the leaf's own transform
    pub model: Matrix4,
    pub mode: DrawMode,
    pub buffers: Cow<'a, VertexBuffers>,
}

impl DrawCall<'_> {
    pub fn vertex_count(&self) -> usize {
        self.buffers.vertex_count()
    }

    /// Detaches the call from the scene it was built from
    pub fn into_owned(self) -> DrawCall<'static> {
        DrawCall {
            node: self.node,
            model: self.model,
            mode: self.mode,
            buffers: Cow::Owned(self.buffers.into_owned()),
        }
    }
}

/// Everything a backend needs to draw one frame
#[derive(Debug, Clone)]
pub struct DrawList<'a> {
    pub uniforms: FrameUniforms,
    pub calls: Vec<DrawCall<'a>>,
}

impl<'a> DrawList<'a> {
    pub fn new(uniforms: FrameUniforms) -> Self {
        Self {
            uniforms,
            calls: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCall<'a>> {
        self.calls.iter()
    }

    /// Total vertices submitted across all calls
    pub fn vertex_count(&self) -> usize {
        self.calls.iter().map(DrawCall::vertex_count).sum()
    }
}

impl<'l, 'a> IntoIterator for &'l DrawList<'a> {
    type Item = &'l DrawCall<'a>;
    type IntoIter = std::slice::Iter<'l, DrawCall<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.iter()
    }
}
