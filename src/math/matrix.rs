//! # 4x4 Matrix
//!
//! Column-major 4x4 matrix used for every transform in the scene graph.
//! Element `(row, col)` lives at index `col * 4 + row`, which is the layout
//! GPU uniform buffers expect and the same layout `cgmath` uses.

use std::ops::Mul;

/// A 4x4 column-major matrix value.
///
/// Operations return new matrices; nothing mutates a receiver in place.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Matrix4 {
    values: [f32; 16],
}

#[rustfmt::skip]
const IDENTITY: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    0.0, 0.0, 0.0, 1.0,
];

impl Default for Matrix4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Matrix4 {
    /// The identity matrix
    pub const fn identity() -> Self {
        Self { values: IDENTITY }
    }

    /// Builds a matrix from 16 column-major values
    pub const fn from_values(values: [f32; 16]) -> Self {
        Self { values }
    }

    /// Raw column-major values
    pub fn values(&self) -> &[f32; 16] {
        &self.values
    }

    /// Element at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[col * 4 + row]
    }

    /// Column `col` as `[x, y, z, w]`
    pub fn column(&self, col: usize) -> [f32; 4] {
        let start = col * 4;
        [
            self.values[start],
            self.values[start + 1],
            self.values[start + 2],
            self.values[start + 3],
        ]
    }

    /// Standard 4x4 product `self · other`.
    ///
    /// `result[col*4 + row] = Σ_k self[k*4 + row] * other[col*4 + k]`
    pub fn multiply(&self, other: &Matrix4) -> Matrix4 {
        let mut result = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                result[col * 4 + row] = (0..4)
                    .map(|k| self.values[k * 4 + row] * other.values[col * 4 + k])
                    .sum();
            }
        }
        Matrix4 { values: result }
    }

    /// Rotation about the X axis.
    ///
    /// `cos_arg` feeds `cos` and `sin_arg` feeds `sin`. Callers normally pass
    /// the same angle twice; passing different values decouples the phases.
    #[rustfmt::skip]
    pub fn rotation_x(cos_arg: f32, sin_arg: f32) -> Self {
        let c = cos_arg.cos();
        let s = sin_arg.sin();
        Self::from_values([
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,   s, 0.0,
            0.0,  -s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Y axis, see [`Matrix4::rotation_x`] for the arguments
    #[rustfmt::skip]
    pub fn rotation_y(cos_arg: f32, sin_arg: f32) -> Self {
        let c = cos_arg.cos();
        let s = sin_arg.sin();
        Self::from_values([
              c, 0.0,  -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
              s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Rotation about the Z axis, see [`Matrix4::rotation_x`] for the arguments
    #[rustfmt::skip]
    pub fn rotation_z(cos_arg: f32, sin_arg: f32) -> Self {
        let c = cos_arg.cos();
        let s = sin_arg.sin();
        Self::from_values([
              c,   s, 0.0, 0.0,
             -s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Non-uniform scaling matrix
    #[rustfmt::skip]
    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Self::from_values([
              x, 0.0, 0.0, 0.0,
            0.0,   y, 0.0, 0.0,
            0.0, 0.0,   z, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Translation matrix
    #[rustfmt::skip]
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_values([
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
              x,   y,   z, 1.0,
        ])
    }

    /// Copy of this matrix with `(dx, dy, dz)` added to the translation column
    pub fn with_translation_delta(&self, dx: f32, dy: f32, dz: f32) -> Self {
        let mut values = self.values;
        values[12] += dx;
        values[13] += dy;
        values[14] += dz;
        Self { values }
    }

    /// Applies this matrix to the homogeneous point `(x, y, z, 1)`
    pub fn transform_point(&self, point: [f32; 3]) -> [f32; 4] {
        let v = [point[0], point[1], point[2], 1.0];
        let mut out = [0.0; 4];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = (0..4).map(|k| self.values[k * 4 + row] * v[k]).sum();
        }
        out
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Matrix4, epsilon: f32) -> bool {
        self.values
            .iter()
            .zip(other.values.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }

    /// Columns as nested arrays, ready for a uniform buffer
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        [self.column(0), self.column(1), self.column(2), self.column(3)]
    }
}

impl Mul for Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: Matrix4) -> Matrix4 {
        self.multiply(&rhs)
    }
}

impl Mul<&Matrix4> for &Matrix4 {
    type Output = Matrix4;

    fn mul(self, rhs: &Matrix4) -> Matrix4 {
        self.multiply(rhs)
    }
}

impl From<cgmath::Matrix4<f32>> for Matrix4 {
    fn from(matrix: cgmath::Matrix4<f32>) -> Self {
        // cgmath matrices are already column-major
        let values: &[f32; 16] = matrix.as_ref();
        Self::from_values(*values)
    }
}

impl From<Matrix4> for cgmath::Matrix4<f32> {
    fn from(matrix: Matrix4) -> Self {
        let v = matrix.values;
        cgmath::Matrix4::new(
            v[0], v[1], v[2], v[3], v[4], v[5], v[6], v[7], v[8], v[9], v[10], v[11], v[12],
            v[13], v[14], v[15],
        )
    }
}
