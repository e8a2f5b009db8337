//! # Scene Objects
//!
//! Leaf nodes of the scene graph. A [`SceneObject`] pairs a shared [`Mesh`]
//! with its own [`Transform`] and caches the mesh flattened for its native
//! draw mode. Per-frame changes only touch the transform.

use std::borrow::Cow;
use std::sync::Arc;

use crate::math::Vector3;

use super::mesh::Mesh;
use super::transform::Transform;
use super::vertex::{DrawMode, VertexBuffers};

/// Scale applied to an object's scaling slot at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Uniform(f32),
    PerAxis([f32; 3]),
}

impl Default for Scale {
    fn default() -> Self {
        Scale::Uniform(1.0)
    }
}

impl Scale {
    pub fn to_array(self) -> [f32; 3] {
        match self {
            Scale::Uniform(s) => [s, s, s],
            Scale::PerAxis(xyz) => xyz,
        }
    }
}

impl From<f32> for Scale {
    fn from(s: f32) -> Self {
        Scale::Uniform(s)
    }
}

/// A drawable leaf: one mesh, one transform
#[derive(Debug, Clone)]
pub struct SceneObject {
    /// Hidden objects stay in the graph but produce no draw call
    pub visible: bool,
    mesh: Arc<Mesh>,
    transform: Transform,
    scale: Scale,
    mode: DrawMode,
    buffers: VertexBuffers,
}

impl SceneObject {
    /// Creates an object at `position`, scaled by `scale`, drawn as `mode`
    pub fn new(mesh: Arc<Mesh>, position: Vector3, scale: impl Into<Scale>, mode: DrawMode) -> Self {
        let scale = scale.into();
        let mut transform = Transform::new(position);
        let [sx, sy, sz] = scale.to_array();
        transform.set_scaling(sx, sy, sz);

        let buffers = mesh.buffers(mode);

        Self {
            visible: true,
            mesh,
            transform,
            scale,
            mode,
            buffers,
        }
    }

    /// Object at the origin with unit scale, drawn as triangles
    pub fn from_mesh(mesh: Arc<Mesh>) -> Self {
        Self::new(mesh, Vector3::zero(), Scale::default(), DrawMode::Triangles)
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn scale(&self) -> Scale {
        self.scale
    }

    /// Native draw mode chosen at construction
    pub fn mode(&self) -> DrawMode {
        self.mode
    }

    /// Cached buffers for the native draw mode
    pub fn buffers(&self) -> &VertexBuffers {
        &self.buffers
    }

    /// Buffers for drawing as `mode`.
    ///
    /// Borrows the cache when `mode` is the native mode, otherwise flattens
    /// the mesh again for the requested mode.
    pub fn buffers_for(&self, mode: DrawMode) -> Cow<'_, VertexBuffers> {
        if mode == self.mode {
            Cow::Borrowed(&self.buffers)
        } else {
            Cow::Owned(self.mesh.buffers(mode))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::mesh::Color;
    use crate::math::Matrix4;

    fn triangle() -> Arc<Mesh> {
        Arc::new(Mesh::flat(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
            Color::RED,
        ))
    }

    #[test]
    fn test_keeps_mesh_reference() {
        let mesh = triangle();
        let object = SceneObject::new(
            mesh.clone(),
            Vector3::new(0.0, -20.0, -2900.0),
            1000.0,
            DrawMode::Lines,
        );
        assert!(Arc::ptr_eq(object.mesh(), &mesh));
        assert_eq!(object.mode(), DrawMode::Lines);
        assert_eq!(object.buffers().vertex_count(), 6);
    }

    #[test]
    fn test_scale_and_position_feed_transform() {
        let object = SceneObject::new(triangle(), Vector3::new(1.0, 2.0, 3.0), 2.0, DrawMode::Triangles);
        let expected = Matrix4::translation(1.0, 2.0, 3.0) * Matrix4::scaling(2.0, 2.0, 2.0);
        assert_eq!(object.transform().combined(), expected);

        let stretched = SceneObject::new(
            triangle(),
            Vector3::zero(),
            Scale::PerAxis([1.0, 2.0, 3.0]),
            DrawMode::Triangles,
        );
        assert_eq!(stretched.transform().scaling(), &Matrix4::scaling(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_buffers_for_borrows_native_mode() {
        let object = SceneObject::from_mesh(triangle());
        assert!(matches!(object.buffers_for(DrawMode::Triangles), Cow::Borrowed(_)));

        let lines = object.buffers_for(DrawMode::Lines);
        assert!(matches!(lines, Cow::Owned(_)));
        assert_eq!(lines.vertex_count(), 6);
        assert_eq!(lines.normals.len(), lines.positions.len());
    }

    #[test]
    fn test_moving_does_not_touch_vertices() {
        let mut object = SceneObject::from_mesh(triangle());
        let before = object.buffers().clone();
        object.transform_mut().translate_by(4.0, 5.0, 6.0);
        object.transform_mut().set_rotation_y(0.5, 0.5);
        assert_eq!(object.buffers(), &before);
    }
}
