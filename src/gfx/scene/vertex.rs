//! # Vertex Data Structures
//!
//! Draw-ready vertex data produced by flattening a mesh, in the two shapes a
//! backend may want it: separate flat attribute arrays (3 floats per vertex
//! each) or an interleaved, GPU-compatible [`Vertex3D`] list.

/// Primitive assembly mode for a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DrawMode {
    /// Every three vertices form a triangle
    #[default]
    Triangles,
    /// Every two vertices form a line segment
    Lines,
}

impl DrawMode {
    /// Matching wgpu primitive topology
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            DrawMode::Triangles => wgpu::PrimitiveTopology::TriangleList,
            DrawMode::Lines => wgpu::PrimitiveTopology::LineList,
        }
    }
}

/// Flattened per-vertex attribute arrays.
///
/// All three arrays hold 3 floats per vertex and always have equal length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VertexBuffers {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
    pub normals: Vec<f32>,
}

impl VertexBuffers {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Interleaves the three arrays into one [`Vertex3D`] per vertex
    pub fn interleaved(&self) -> Vec<Vertex3D> {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.chunks_exact(3))
            .zip(self.normals.chunks_exact(3))
            .map(|((p, c), n)| Vertex3D {
                position: [p[0], p[1], p[2]],
                color: [c[0], c[1], c[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect()
    }
}

/// A 3D vertex with position, colour and normal data.
///
/// `#[repr(C)]` gives the struct the C-compatible layout required for GPU
/// buffer uploads.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// Linear RGB colour
    pub color: [f32; 3],
    /// Normal vector used for the lighting term
    pub normal: [f32; 3],
}

impl Vertex3D {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3];

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: position (Float32x3)
    /// - Attribute 1: colour (Float32x3)
    /// - Attribute 2: normal (Float32x3)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
