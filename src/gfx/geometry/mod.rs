//! # Procedural Geometry Generation
//!
//! Vertex and face lists for common shapes, so simple scenes need no model
//! files.
//!
//! ## Supported Primitives
//!
//! - **Pyramid**: Square base, single apex
//! - **Cube**: Eight shared corners, two triangles per side
//! - **Plane**: Height-mapped grid with `2^precision` splits per axis
//! - **Icosphere**: Subdivided icosahedron on the unit sphere
//!
//! ## Usage
//!
//! ```rust
//! use supergroup::gfx::geometry::{generate_cube, icosphere};
//! use supergroup::gfx::scene::Color;
//!
//! let cube_data = generate_cube(2.0);
//! assert_eq!(cube_data.triangle_count(), 12);
//!
//! let sphere = icosphere(2, Color::WHITE, true);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::mesh::{Face, Mesh, MeshColor};

/// Generated vertex and face lists
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Triangles as indices into `vertices`
    pub faces: Vec<Face>,
}

impl GeometryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Builds a mesh, deriving normals from the faces
    pub fn into_mesh(self, color: impl Into<MeshColor>, smooth: bool) -> Mesh {
        Mesh::new(self.vertices, self.faces, color, smooth)
    }
}
