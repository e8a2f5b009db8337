//! # Meshes
//!
//! Immutable indexed geometry: vertices, triangle faces, colour and the
//! normals derived from them at construction time. A mesh can be flattened
//! into raw triangle-list or line-list arrays for drawing.

use crate::math::Vector3;

use super::vertex::{DrawMode, VertexBuffers};

/// Indices of the three corners of a triangle
pub type Face = [usize; 3];

/// Linear RGB colour
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLUE
    }
}

/// Colour source of a mesh
#[derive(Debug, Clone, PartialEq)]
pub enum MeshColor {
    /// One colour for every vertex
    Flat(Color),
    /// One colour per vertex, indexed like the vertex list
    PerVertex(Vec<Color>),
}

impl Default for MeshColor {
    fn default() -> Self {
        MeshColor::Flat(Color::default())
    }
}

impl From<Color> for MeshColor {
    fn from(color: Color) -> Self {
        MeshColor::Flat(color)
    }
}

/// Indexed triangle geometry with precomputed normals.
///
/// Normals are stored once per face corner (three per face) in both shading
/// modes:
/// - faceted: each corner repeats its own face normal, so faces never share
///   a normal and edges stay hard;
/// - smooth: each corner gets the renormalized sum of the normals of every
///   face touching that vertex index.
///
/// Face indices are not validated against the vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<[f32; 3]>,
    faces: Vec<Face>,
    color: MeshColor,
    smooth: bool,
    normals: Vec<[f32; 3]>,
}

impl Mesh {
    pub fn new(
        vertices: Vec<[f32; 3]>,
        faces: Vec<Face>,
        color: impl Into<MeshColor>,
        smooth: bool,
    ) -> Self {
        let (normals, degenerate) = compute_vertex_normals(&vertices, &faces, smooth);
        if degenerate > 0 {
            log::warn!(
                "Mesh has {} degenerate face(s) out of {}; their normals are undefined",
                degenerate,
                faces.len()
            );
        }

        Self {
            vertices,
            faces,
            color: color.into(),
            smooth,
            normals,
        }
    }

    /// Mesh with hard edges
    pub fn flat(vertices: Vec<[f32; 3]>, faces: Vec<Face>, color: impl Into<MeshColor>) -> Self {
        Self::new(vertices, faces, color, false)
    }

    /// Mesh with blended normals across shared vertices
    pub fn smooth(vertices: Vec<[f32; 3]>, faces: Vec<Face>, color: impl Into<MeshColor>) -> Self {
        Self::new(vertices, faces, color, true)
    }

    /// Mesh with no geometry
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), MeshColor::default(), true)
    }

    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn color(&self) -> &MeshColor {
        &self.color
    }

    pub fn is_smooth(&self) -> bool {
        self.smooth
    }

    /// One normal per face corner
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Face corners concatenated, 3 floats per corner
    pub fn to_raw_triangle_array(&self) -> Vec<f32> {
        to_raw_triangle_array(&self.vertices, &self.faces)
    }

    /// Face edges as line segments, wrapping the last corner back to the first
    pub fn to_raw_line_array(&self) -> Vec<f32> {
        to_raw_line_array(&self.vertices, &self.faces)
    }

    /// Corner normals flattened for `mode`
    pub fn raw_normals(&self, mode: DrawMode) -> Vec<f32> {
        match mode {
            DrawMode::Triangles => self.normals.iter().flatten().copied().collect(),
            DrawMode::Lines => self
                .normals
                .chunks_exact(3)
                .flat_map(|corners| line_walk(corners))
                .flatten()
                .collect(),
        }
    }

    /// Per-vertex colours flattened for `mode`, expanding a flat colour
    pub fn raw_colors(&self, mode: DrawMode) -> Vec<f32> {
        match &self.color {
            MeshColor::Flat(color) => {
                let count = self.faces.len() * corners_per_face(mode);
                std::iter::repeat(color.to_array())
                    .take(count)
                    .flatten()
                    .collect()
            }
            MeshColor::PerVertex(colors) => {
                let colors: Vec<[f32; 3]> = colors.iter().map(|c| c.to_array()).collect();
                match mode {
                    DrawMode::Triangles => to_raw_triangle_array(&colors, &self.faces),
                    DrawMode::Lines => to_raw_line_array(&colors, &self.faces),
                }
            }
        }
    }

    /// Positions, colours and normals flattened for `mode`
    pub fn buffers(&self, mode: DrawMode) -> VertexBuffers {
        let positions = match mode {
            DrawMode::Triangles => self.to_raw_triangle_array(),
            DrawMode::Lines => self.to_raw_line_array(),
        };

        VertexBuffers {
            positions,
            colors: self.raw_colors(mode),
            normals: self.raw_normals(mode),
        }
    }
}

fn corners_per_face(mode: DrawMode) -> usize {
    match mode {
        DrawMode::Triangles => 3,
        DrawMode::Lines => 6,
    }
}

/// Edge walk over one face: `(c0, c1), (c1, c2), (c2, c0)`
fn line_walk<T: Copy>(corners: &[T]) -> Vec<T> {
    let count = corners.len();
    (0..count)
        .flat_map(|i| [corners[i], corners[(i + 1) % count]])
        .collect()
}

/// Turns indexed vertices into a raw coordinate array arranged as triangles
pub fn to_raw_triangle_array(vertices: &[[f32; 3]], faces: &[Face]) -> Vec<f32> {
    faces
        .iter()
        .flat_map(|face| face.iter().map(|&index| vertices[index]))
        .flatten()
        .collect()
}

/// Turns indexed vertices into a raw coordinate array arranged as line segments
pub fn to_raw_line_array(vertices: &[[f32; 3]], faces: &[Face]) -> Vec<f32> {
    faces
        .iter()
        .flat_map(|face| line_walk(face))
        .flat_map(|index| vertices[index])
        .collect()
}

/// Computes one normal per face corner.
///
/// Returns the normals and the number of degenerate (zero-area) faces.
/// Degenerate faces get NaN normals in faceted mode. In smooth mode they are
/// left out of the per-vertex sums so they cannot poison their neighbours; a
/// vertex touched only by degenerate faces still ends up NaN.
pub fn compute_vertex_normals(
    vertices: &[[f32; 3]],
    faces: &[Face],
    smooth: bool,
) -> (Vec<[f32; 3]>, usize) {
    let mut normals = Vec::with_capacity(faces.len() * 3);
    let mut sums = if smooth {
        vec![Vector3::zero(); vertices.len()]
    } else {
        Vec::new()
    };
    let mut degenerate = 0;

    for face in faces {
        let n = face_normal(vertices, face);
        let valid = n.is_finite();
        if !valid {
            degenerate += 1;
        }

        if smooth {
            if valid {
                for &index in face {
                    sums[index] = sums[index] + n;
                }
            }
        } else {
            normals.extend([n.to_array(); 3]);
        }
    }

    if smooth {
        for face in faces {
            for &index in face {
                normals.push(sums[index].unit().to_array());
            }
        }
    }

    (normals, degenerate)
}

/// Unit normal of a triangle, `cross(v1 - v0, v2 - v0)` normalized
pub fn face_normal(vertices: &[[f32; 3]], face: &Face) -> Vector3 {
    let p0 = Vector3::from_array(vertices[face[0]]);
    let p1 = Vector3::from_array(vertices[face[1]]);
    let p2 = Vector3::from_array(vertices[face[2]]);
    (p1 - p0).cross(p2 - p0).unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        Vector3::from_array(a).approx_eq(Vector3::from_array(b), 1e-6)
    }

    #[test]
    fn test_empty_mesh_flattens_to_nothing() {
        let mesh = Mesh::empty();
        assert!(mesh.to_raw_triangle_array().is_empty());
        assert!(mesh.to_raw_line_array().is_empty());
        assert!(mesh.normals().is_empty());
        assert!(mesh.buffers(DrawMode::Triangles).is_empty());
    }

    #[test]
    fn test_triangle_array_follows_face_order() {
        let vertices = vec![[1.0, 3.0, 5.0], [2.0, 4.0, 6.0], [1.0, 1.0, 3.0]];
        let faces = vec![[0, 2, 1], [2, 1, 0]];
        assert_eq!(
            to_raw_triangle_array(&vertices, &faces),
            vec![
                1.0, 3.0, 5.0, 1.0, 1.0, 3.0, 2.0, 4.0, 6.0, 1.0, 1.0, 3.0, 2.0, 4.0, 6.0, 1.0,
                3.0, 5.0
            ]
        );
    }

    #[test]
    fn test_line_array_wraps_each_face() {
        let vertices = vec![
            [0.0, 1.0, 4.0],
            [2.0, 5.0, 3.0],
            [1.0, 1.0, 3.0],
            [0.0, 1.0, 3.0],
            [3.0, 1.0, 2.0],
        ];
        let faces = vec![[2, 1, 4], [3, 2, 1]];
        let lines = to_raw_line_array(&vertices, &faces);
        assert_eq!(
            lines,
            vec![
                1.0, 1.0, 3.0, 2.0, 5.0, 3.0, 2.0, 5.0, 3.0, 3.0, 1.0, 2.0, 3.0, 1.0, 2.0, 1.0,
                1.0, 3.0, 0.0, 1.0, 3.0, 1.0, 1.0, 3.0, 1.0, 1.0, 3.0, 2.0, 5.0, 3.0, 2.0, 5.0,
                3.0, 0.0, 1.0, 3.0
            ]
        );
        // 2 endpoints per edge, 3 edges per face
        assert_eq!(lines.len() / 3, faces.len() * 2 * 3);
    }

    #[test]
    fn test_faceted_normal_repeats_per_corner() {
        let mesh = Mesh::flat(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
            Color::RED,
        );
        assert_eq!(mesh.normals(), &[[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn test_smooth_normals_blend_shared_edge() {
        // Two triangles folded along the edge (0, 1)
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -1.0],
        ];
        let faces = vec![[0, 1, 2], [0, 3, 1]];
        let smooth = Mesh::smooth(vertices.clone(), faces.clone(), Color::RED);
        let faceted = Mesh::flat(vertices.clone(), faces.clone(), Color::RED);

        let n0 = face_normal(&vertices, &faces[0]);
        let n1 = face_normal(&vertices, &faces[1]);
        let blended = (n0 + n1).unit().to_array();

        // Corners 0 and 1 of face 0 are the shared vertices
        assert!(approx(smooth.normals()[0], blended));
        assert!(approx(smooth.normals()[1], blended));
        assert!(!approx(smooth.normals()[0], n0.to_array()));
        assert!(!approx(smooth.normals()[0], n1.to_array()));
        // Same vertex referenced from face 1 gets the same blended normal
        assert!(approx(smooth.normals()[3], blended));
        assert!(approx(smooth.normals()[5], blended));
        // Unshared vertex keeps its own face normal
        assert!(approx(smooth.normals()[2], n0.to_array()));

        assert!(approx(faceted.normals()[0], n0.to_array()));
        assert!(approx(faceted.normals()[3], n1.to_array()));
    }

    #[test]
    fn test_degenerate_face_in_faceted_mode_is_nan() {
        crate::logging::init_test_logging();
        let vertices = vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        let (normals, degenerate) = compute_vertex_normals(&vertices, &[[0, 1, 2]], false);
        assert_eq!(degenerate, 1);
        assert!(normals.iter().all(|n| n[0].is_nan()));
    }

    #[test]
    fn test_degenerate_face_excluded_from_smooth_sum() {
        let vertices = vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [2.0, 0.0, 0.0],
        ];
        // Second face is collinear but shares vertices 0 and 1
        let faces = vec![[0, 1, 2], [0, 1, 3]];
        let (normals, degenerate) = compute_vertex_normals(&vertices, &faces, true);
        assert_eq!(degenerate, 1);
        assert!(approx(normals[0], [0.0, 0.0, 1.0]));
        assert!(approx(normals[4], [0.0, 0.0, 1.0]));
        // Vertex 3 only touches the degenerate face
        assert!(normals[5][0].is_nan());
    }

    #[test]
    fn test_smooth_mesh_with_degenerate_face_keeps_shared_normals() {
        crate::logging::init_test_logging();
        let mesh = Mesh::smooth(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [2.0, 0.0, 0.0]],
            vec![[0, 1, 2], [0, 1, 3]],
            Color::WHITE,
        );
        assert_eq!(mesh.normals().len(), 6);
        assert!(mesh.normals()[..5].iter().all(|n| n[2].is_finite()));
    }

    #[test]
    fn test_buffers_are_aligned_in_both_modes() {
        let mesh = Mesh::flat(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
            vec![[0, 1, 2], [2, 1, 3]],
            Color::GREEN,
        );
        for mode in [DrawMode::Triangles, DrawMode::Lines] {
            let buffers = mesh.buffers(mode);
            assert_eq!(buffers.positions.len(), buffers.colors.len());
            assert_eq!(buffers.positions.len(), buffers.normals.len());
        }
        assert_eq!(mesh.buffers(DrawMode::Triangles).vertex_count(), 6);
        assert_eq!(mesh.buffers(DrawMode::Lines).vertex_count(), 12);
        assert_eq!(&mesh.raw_colors(DrawMode::Triangles)[..3], &[0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_per_vertex_colors_follow_faces() {
        let mesh = Mesh::flat(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[2, 0, 1]],
            MeshColor::PerVertex(vec![Color::RED, Color::GREEN, Color::BLUE]),
        );
        assert_eq!(
            mesh.raw_colors(DrawMode::Triangles),
            vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.raw_colors(DrawMode::Lines).len(), 18);
    }
}
