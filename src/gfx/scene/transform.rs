//! # Spatial Transforms
//!
//! Every node in the scene graph embeds a [`Transform`]: independent rotation,
//! scaling and translation slots plus the two orders used to compose them.

use crate::math::{Matrix4, Vector3};

/// Rotation axis label used by [`Transform::rotation_order`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// One step of the outer composition order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformStep {
    Rotation,
    Scaling,
    Translation,
}

/// Rotation, scaling and translation state of a scene node.
///
/// The combined matrix is rebuilt on every call to [`Transform::combined`].
/// Within each order list the first entry is applied first to a column
/// vector, so the defaults produce `T · S · Rz · Ry · Rx`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    position: Vector3,
    rotation_x: Matrix4,
    rotation_y: Matrix4,
    rotation_z: Matrix4,
    scaling: Matrix4,
    translation: Matrix4,
    rotation_order: [Axis; 3],
    transform_order: [TransformStep; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vector3::zero())
    }
}

impl Transform {
    /// Creates a transform positioned (and translated) at `position`
    pub fn new(position: Vector3) -> Self {
        let mut transform = Self {
            position,
            rotation_x: Matrix4::identity(),
            rotation_y: Matrix4::identity(),
            rotation_z: Matrix4::identity(),
            scaling: Matrix4::identity(),
            translation: Matrix4::identity(),
            rotation_order: [Axis::X, Axis::Y, Axis::Z],
            transform_order: [
                TransformStep::Rotation,
                TransformStep::Scaling,
                TransformStep::Translation,
            ],
        };
        transform.set_translation(position.x, position.y, position.z);
        transform
    }

    pub fn position(&self) -> Vector3 {
        self.position
    }

    /// Updates the recorded position without touching the translation slot
    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vector3::new(x, y, z);
    }

    /// Sets the X rotation; `cos_arg` goes through `cos`, `sin_arg` through `sin`
    pub fn set_rotation_x(&mut self, cos_arg: f32, sin_arg: f32) {
        self.rotation_x = Matrix4::rotation_x(cos_arg, sin_arg);
    }

    /// Sets the Y rotation; `cos_arg` goes through `cos`, `sin_arg` through `sin`
    pub fn set_rotation_y(&mut self, cos_arg: f32, sin_arg: f32) {
        self.rotation_y = Matrix4::rotation_y(cos_arg, sin_arg);
    }

    /// Sets the Z rotation; `cos_arg` goes through `cos`, `sin_arg` through `sin`
    pub fn set_rotation_z(&mut self, cos_arg: f32, sin_arg: f32) {
        self.rotation_z = Matrix4::rotation_z(cos_arg, sin_arg);
    }

    pub fn set_scaling(&mut self, x: f32, y: f32, z: f32) {
        self.scaling = Matrix4::scaling(x, y, z);
    }

    pub fn set_translation(&mut self, x: f32, y: f32, z: f32) {
        self.translation = Matrix4::translation(x, y, z);
    }

    /// Adds `(dx, dy, dz)` to the current translation
    pub fn translate_by(&mut self, dx: f32, dy: f32, dz: f32) {
        self.translation = self.translation.with_translation_delta(dx, dy, dz);
    }

    pub fn set_rotation_order(&mut self, order: [Axis; 3]) {
        self.rotation_order = order;
    }

    pub fn set_transform_order(&mut self, order: [TransformStep; 3]) {
        self.transform_order = order;
    }

    pub fn rotation_order(&self) -> [Axis; 3] {
        self.rotation_order
    }

    pub fn transform_order(&self) -> [TransformStep; 3] {
        self.transform_order
    }

    /// Rotation matrix stored for `axis`
    pub fn rotation(&self, axis: Axis) -> &Matrix4 {
        match axis {
            Axis::X => &self.rotation_x,
            Axis::Y => &self.rotation_y,
            Axis::Z => &self.rotation_z,
        }
    }

    pub fn scaling(&self) -> &Matrix4 {
        &self.scaling
    }

    pub fn translation(&self) -> &Matrix4 {
        &self.translation
    }

    /// The three axis rotations composed according to the rotation order
    pub fn rotation_composite(&self) -> Matrix4 {
        self.rotation_order
            .iter()
            .fold(Matrix4::identity(), |acc, &axis| {
                self.rotation(axis).multiply(&acc)
            })
    }

    /// Rotation, scaling and translation composed according to the transform order
    pub fn combined(&self) -> Matrix4 {
        self.transform_order
            .iter()
            .fold(Matrix4::identity(), |acc, step| {
                let matrix = match step {
                    TransformStep::Rotation => self.rotation_composite(),
                    TransformStep::Scaling => self.scaling,
                    TransformStep::Translation => self.translation,
                };
                matrix.multiply(&acc)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_default_combined_is_identity() {
        let transform = Transform::default();
        assert_eq!(transform.combined(), Matrix4::identity());
    }

    #[test]
    fn test_new_translates_to_position() {
        let transform = Transform::new(Vector3::new(1.0, -20.0, 3.0));
        assert_eq!(transform.position(), Vector3::new(1.0, -20.0, 3.0));
        assert_eq!(transform.translation().column(3), [1.0, -20.0, 3.0, 1.0]);
    }

    #[test]
    fn test_rotation_slots() {
        let mut transform = Transform::default();
        transform.set_rotation_y(0.0, 0.0);
        assert_eq!(transform.rotation(Axis::Y), &Matrix4::identity());

        transform.set_rotation_x(FRAC_PI_4, FRAC_PI_4);
        let (c, s) = (FRAC_PI_4.cos(), FRAC_PI_4.sin());
        assert_eq!(
            transform.rotation(Axis::X).values(),
            &[1.0, 0.0, 0.0, 0.0, 0.0, c, s, 0.0, 0.0, -s, c, 0.0, 0.0, 0.0, 0.0, 1.0]
        );

        transform.set_rotation_z(FRAC_PI_2, FRAC_PI_2);
        let (c, s) = (FRAC_PI_2.cos(), FRAC_PI_2.sin());
        assert_eq!(
            transform.rotation(Axis::Z).values(),
            &[c, s, 0.0, 0.0, -s, c, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );
    }

    #[test]
    fn test_decoupled_rotation_arguments() {
        let mut transform = Transform::default();
        transform.set_rotation_x(0.0, FRAC_PI_2);
        let m = transform.rotation(Axis::X);
        assert_eq!(m.get(1, 1), 1.0);
        assert_eq!(m.get(2, 1), FRAC_PI_2.sin());
    }

    #[test]
    fn test_scaling_and_translation_slots() {
        let mut transform = Transform::default();
        transform.set_scaling(2.0, 3.0, 4.0);
        assert_eq!(
            transform.scaling().values(),
            &[2.0, 0.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0, 0.0, 0.0, 0.0, 1.0]
        );

        transform.set_translation(5.0, 6.0, 7.0);
        assert_eq!(transform.translation().column(3), [5.0, 6.0, 7.0, 1.0]);
    }

    #[test]
    fn test_translate_by_accumulates() {
        let mut transform = Transform::default();
        transform.translate_by(1.0, 2.0, 3.0);
        assert_eq!(transform.translation().column(3), [1.0, 2.0, 3.0, 1.0]);
        transform.translate_by(1.0, 2.0, 3.0);
        assert_eq!(transform.translation().column(3), [2.0, 4.0, 6.0, 1.0]);
    }

    #[test]
    fn test_set_position_is_bookkeeping_only() {
        let mut transform = Transform::default();
        transform.set_position(1.0, 2.0, 3.0);
        assert_eq!(transform.position(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(transform.translation(), &Matrix4::identity());
    }

    #[test]
    fn test_default_order_is_t_s_rz_ry_rx() {
        let mut transform = Transform::default();
        transform.set_rotation_x(0.3, 0.3);
        transform.set_rotation_y(0.7, 0.7);
        transform.set_rotation_z(1.1, 1.1);
        transform.set_scaling(2.0, 3.0, 4.0);
        transform.set_translation(5.0, 6.0, 7.0);

        let expected = Matrix4::translation(5.0, 6.0, 7.0)
            * Matrix4::scaling(2.0, 3.0, 4.0)
            * Matrix4::rotation_z(1.1, 1.1)
            * Matrix4::rotation_y(0.7, 0.7)
            * Matrix4::rotation_x(0.3, 0.3);
        assert!(transform.combined().approx_eq(&expected, 1e-5));
    }

    #[test]
    fn test_custom_orders() {
        let mut transform = Transform::default();
        transform.set_rotation_x(0.3, 0.3);
        transform.set_rotation_z(1.1, 1.1);
        transform.set_translation(5.0, 0.0, 0.0);
        transform.set_rotation_order([Axis::Z, Axis::Y, Axis::X]);
        transform.set_transform_order([
            TransformStep::Translation,
            TransformStep::Scaling,
            TransformStep::Rotation,
        ]);

        let rotation = Matrix4::rotation_x(0.3, 0.3) * Matrix4::rotation_z(1.1, 1.1);
        assert!(transform.rotation_composite().approx_eq(&rotation, 1e-6));

        let expected = rotation * Matrix4::translation(5.0, 0.0, 0.0);
        assert!(transform.combined().approx_eq(&expected, 1e-5));
    }

    #[test]
    fn test_order_changes_result() {
        let mut a = Transform::default();
        a.set_rotation_z(FRAC_PI_2, FRAC_PI_2);
        a.set_translation(1.0, 0.0, 0.0);
        let mut b = a.clone();
        b.set_transform_order([
            TransformStep::Translation,
            TransformStep::Scaling,
            TransformStep::Rotation,
        ]);
        assert!(!a.combined().approx_eq(&b.combined(), 1e-4));
    }
}
