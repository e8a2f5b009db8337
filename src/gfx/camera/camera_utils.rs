use crate::math::{Matrix4, Vector3};

/// Remaps OpenGL clip depth `[-1, 1]` to the `[0, 1]` range wgpu expects
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4 = Matrix4::from_values([
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// World-to-view matrix.
    pub view: [[f32; 4]; 4],

    /// Projection already corrected for wgpu clip depth.
    pub projection: [[f32; 4]; 4],

    /// Light direction in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub lighting: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view: convert_matrix4_to_array(Matrix4::identity()),
            projection: convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX),
            lighting: [0.0, 1.0, 1.0, 0.0],
        }
    }
}

impl CameraUniform {
    pub fn new(view: Matrix4, projection: Matrix4, lighting: Vector3) -> Self {
        Self {
            view: convert_matrix4_to_array(view),
            projection: convert_matrix4_to_array(OPENGL_TO_WGPU_MATRIX * projection),
            lighting: [lighting.x, lighting.y, lighting.z, 0.0],
        }
    }
}

/// Per-draw model matrix
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

impl From<Matrix4> for ModelUniform {
    fn from(model: Matrix4) -> Self {
        Self {
            model: convert_matrix4_to_array(model),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for (i, column) in result.iter_mut().enumerate() {
        *column = matrix4.column(i);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_keeps_columns() {
        let m = Matrix4::translation(1.0, 2.0, 3.0);
        let array = convert_matrix4_to_array(m);
        assert_eq!(array[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(array[0], [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_depth_correction() {
        let near = OPENGL_TO_WGPU_MATRIX.transform_point([0.0, 0.0, -1.0]);
        let far = OPENGL_TO_WGPU_MATRIX.transform_point([0.0, 0.0, 1.0]);
        assert_eq!(near[2], 0.0);
        assert_eq!(far[2], 1.0);
    }

    #[test]
    fn test_uniform_layout() {
        assert_eq!(std::mem::size_of::<CameraUniform>(), 144);
        assert_eq!(std::mem::size_of::<ModelUniform>(), 64);

        let uniform = CameraUniform::new(
            Matrix4::identity(),
            Matrix4::identity(),
            Vector3::new(0.0, 1.0, 1.0),
        );
        assert_eq!(uniform.lighting, [0.0, 1.0, 1.0, 0.0]);
        assert_eq!(uniform.projection[2], [0.0, 0.0, 0.5, 0.0]);
    }
}
