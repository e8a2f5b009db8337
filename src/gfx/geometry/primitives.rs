//! # Primitive Shape Generation
//!
//! Vertex and face lists for common shapes. Normals are not produced here:
//! [`Mesh`](crate::gfx::scene::Mesh) derives them from the faces.

use std::collections::HashMap;

use crate::gfx::scene::mesh::{Face, Mesh, MeshColor};

use super::GeometryData;

/// Square pyramid with its base on the XZ plane and apex at `(0, height, 0)`
pub fn generate_pyramid(base: f32, height: f32) -> GeometryData {
    let b = base / 2.0;
    GeometryData {
        vertices: vec![
            [-b, 0.0, -b],
            [b, 0.0, -b],
            [b, 0.0, b],
            [-b, 0.0, b],
            [0.0, height, 0.0],
        ],
        faces: vec![
            [4, 1, 0],
            [4, 2, 1],
            [4, 3, 2],
            [4, 0, 3],
            [3, 0, 1],
            [1, 2, 3],
        ],
    }
}

/// Cube of edge `size` centered at the origin, two triangles per side
pub fn generate_cube(size: f32) -> GeometryData {
    let a = size / 2.0;
    let mut vertices = Vec::with_capacity(8);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                vertices.push([x * a, y * a, z * a]);
            }
        }
    }

    GeometryData {
        vertices,
        faces: vec![
            [2, 0, 1],
            [1, 3, 2],
            [2, 4, 0],
            [4, 2, 6],
            [7, 3, 1],
            [5, 7, 1],
            [5, 4, 7],
            [7, 4, 6],
            [1, 4, 5],
            [0, 4, 1],
            [3, 6, 2],
            [3, 7, 6],
        ],
    }
}

/// Height-mapped grid on the XZ plane.
///
/// The grid is split `2^precision` times along each axis. Each vertex gets
/// `y = height(x / 2, z / 2)`.
pub fn generate_plane(
    length: f32,
    width: f32,
    precision: u32,
    height: impl Fn(f32, f32) -> f32,
) -> GeometryData {
    let splits = 1usize << precision;
    let side = splits + 1;
    let step_x = width / splits as f32;
    let step_z = length / splits as f32;
    let min_x = -width / 2.0;
    let min_z = -length / 2.0;

    let mut vertices = Vec::with_capacity(side * side);
    for i in 0..side {
        let x = min_x + i as f32 * step_x;
        for j in 0..side {
            let z = min_z + j as f32 * step_z;
            vertices.push([x, height(x / 2.0, z / 2.0), z]);
        }
    }

    let mut faces = Vec::with_capacity(splits * splits * 2);
    for i in 0..splits {
        for j in 0..splits {
            let a = i * side + j;
            let b = (i + 1) * side + j;
            faces.push([a, a + 1, b + 1]);
            faces.push([a, b + 1, b]);
        }
    }

    GeometryData { vertices, faces }
}

/// Unit icosahedron refined `subdivisions` times onto the unit sphere
pub fn generate_icosphere(subdivisions: u32) -> GeometryData {
    const X: f32 = 0.525_731_1;
    const Z: f32 = 0.850_650_8;

    let mut vertices = vec![
        [-X, 0.0, Z],
        [X, 0.0, Z],
        [-X, 0.0, -Z],
        [X, 0.0, -Z],
        [0.0, Z, X],
        [0.0, Z, -X],
        [0.0, -Z, X],
        [0.0, -Z, -X],
        [Z, X, 0.0],
        [-Z, X, 0.0],
        [Z, -X, 0.0],
        [-Z, -X, 0.0],
    ];
    let mut faces: Vec<Face> = vec![
        [1, 4, 0],
        [4, 9, 0],
        [4, 5, 9],
        [8, 5, 4],
        [1, 8, 4],
        [1, 10, 8],
        [10, 3, 8],
        [8, 3, 5],
        [3, 2, 5],
        [3, 7, 2],
        [3, 10, 7],
        [10, 6, 7],
        [6, 11, 7],
        [6, 0, 11],
        [6, 1, 0],
        [10, 1, 6],
        [11, 0, 9],
        [2, 11, 9],
        [5, 2, 9],
        [11, 2, 7],
    ];

    for _ in 0..subdivisions {
        let mut midpoints: HashMap<(usize, usize), usize> = HashMap::new();
        let mut refined = Vec::with_capacity(faces.len() * 4);

        for [a, b, c] in faces {
            let ab = midpoint(&mut vertices, &mut midpoints, a, b);
            let bc = midpoint(&mut vertices, &mut midpoints, b, c);
            let ca = midpoint(&mut vertices, &mut midpoints, c, a);
            refined.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
        }
        faces = refined;
    }

    GeometryData { vertices, faces }
}

/// Index of the unit-length midpoint of edge `a`-`b`, shared between faces
fn midpoint(
    vertices: &mut Vec<[f32; 3]>,
    cache: &mut HashMap<(usize, usize), usize>,
    a: usize,
    b: usize,
) -> usize {
    let key = (a.min(b), a.max(b));
    if let Some(&index) = cache.get(&key) {
        return index;
    }

    let (p, q) = (vertices[a], vertices[b]);
    let mid = [(p[0] + q[0]) / 2.0, (p[1] + q[1]) / 2.0, (p[2] + q[2]) / 2.0];
    let len = (mid[0] * mid[0] + mid[1] * mid[1] + mid[2] * mid[2]).sqrt();
    vertices.push([mid[0] / len, mid[1] / len, mid[2] / len]);

    let index = vertices.len() - 1;
    cache.insert(key, index);
    index
}

pub fn pyramid(base: f32, height: f32, color: impl Into<MeshColor>) -> Mesh {
    generate_pyramid(base, height).into_mesh(color, false)
}

pub fn cube(size: f32, color: impl Into<MeshColor>, smooth: bool) -> Mesh {
    generate_cube(size).into_mesh(color, smooth)
}

pub fn plane(
    length: f32,
    width: f32,
    precision: u32,
    color: impl Into<MeshColor>,
    smooth: bool,
    height: impl Fn(f32, f32) -> f32,
) -> Mesh {
    generate_plane(length, width, precision, height).into_mesh(color, smooth)
}

pub fn icosphere(subdivisions: u32, color: impl Into<MeshColor>, smooth: bool) -> Mesh {
    generate_icosphere(subdivisions).into_mesh(color, smooth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::mesh::Color;
    use crate::math::Vector3;

    fn indices_in_bounds(data: &GeometryData) -> bool {
        data.faces
            .iter()
            .flatten()
            .all(|&index| index < data.vertices.len())
    }

    #[test]
    fn test_pyramid_generation() {
        let data = generate_pyramid(2.0, 3.0);
        assert_eq!(data.vertex_count(), 5);
        assert_eq!(data.triangle_count(), 6);
        assert_eq!(data.vertices[4], [0.0, 3.0, 0.0]);
        assert!(indices_in_bounds(&data));
    }

    #[test]
    fn test_cube_generation() {
        let data = generate_cube(2.0);
        assert_eq!(data.vertex_count(), 8);
        assert_eq!(data.triangle_count(), 12);
        assert!(data.vertices.iter().flatten().all(|c| c.abs() == 1.0));
        assert!(indices_in_bounds(&data));
    }

    #[test]
    fn test_plane_generation() {
        let data = generate_plane(4.0, 8.0, 2, |_, _| 0.0);
        assert_eq!(data.vertex_count(), 25);
        assert_eq!(data.triangle_count(), 32);
        assert_eq!(data.vertices[0], [-4.0, 0.0, -2.0]);
        assert_eq!(data.vertices[24], [4.0, 0.0, 2.0]);
        assert!(indices_in_bounds(&data));
    }

    #[test]
    fn test_plane_height_function() {
        let data = generate_plane(2.0, 2.0, 1, |x, z| x + z);
        for [x, y, z] in &data.vertices {
            assert_eq!(*y, x / 2.0 + z / 2.0);
        }
    }

    #[test]
    fn test_flat_plane_normals_are_vertical() {
        let mesh = plane(10.0, 10.0, 2, Color::RED, true, |_, _| 0.0);
        for n in mesh.normals() {
            assert!(Vector3::from_array(*n).cross(Vector3::new(0.0, 1.0, 0.0)).magnitude() < 1e-5);
        }
    }

    #[test]
    fn test_icosphere_generation() {
        let base = generate_icosphere(0);
        assert_eq!(base.vertex_count(), 12);
        assert_eq!(base.triangle_count(), 20);

        let refined = generate_icosphere(2);
        assert_eq!(refined.vertex_count(), 162);
        assert_eq!(refined.triangle_count(), 320);
        assert!(indices_in_bounds(&refined));
        for v in &refined.vertices {
            assert!((Vector3::from_array(*v).magnitude() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_mesh_constructors() {
        let mesh = pyramid(1.0, 1.0, Color::GREEN);
        assert!(!mesh.is_smooth());
        assert_eq!(mesh.normals().len(), 18);
        assert!(cube(1.0, Color::BLUE, true).is_smooth());
        assert_eq!(icosphere(1, Color::WHITE, true).faces().len(), 80);
    }
}
