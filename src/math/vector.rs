//! # 3D Vector
//!
//! Small vector type used for normal computation and camera basis
//! construction.

use std::ops::{Add, Mul, Neg, Sub};

/// A 3-component vector value
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn from_array(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    pub fn subtract(self, other: Vector3) -> Vector3 {
        Vector3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f32) -> Vector3 {
        Vector3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Vector3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Vector3) -> Vector3 {
        Vector3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Unit-length copy of this vector.
    ///
    /// The zero vector has no direction: the result has NaN components and
    /// callers are expected to avoid that input.
    pub fn unit(self) -> Vector3 {
        self.scale(1.0 / self.magnitude())
    }

    /// Length of this vector's shadow along `onto`
    pub fn scalar_projection(self, onto: Vector3) -> f32 {
        self.dot(onto) / onto.magnitude()
    }

    /// Component of this vector parallel to `onto`
    pub fn project_onto(self, onto: Vector3) -> Vector3 {
        onto.scale(self.dot(onto) / onto.dot(onto))
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    pub fn approx_eq(self, other: Vector3, epsilon: f32) -> bool {
        (self.x - other.x).abs() <= epsilon
            && (self.y - other.y).abs() <= epsilon
            && (self.z - other.z).abs() <= epsilon
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Vector3) -> Vector3 {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Vector3) -> Vector3 {
        self.subtract(rhs)
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Vector3 {
        self.scale(-1.0)
    }
}

impl Mul<f32> for Vector3 {
    type Output = Vector3;

    fn mul(self, rhs: f32) -> Vector3 {
        self.scale(rhs)
    }
}

impl From<[f32; 3]> for Vector3 {
    fn from(v: [f32; 3]) -> Self {
        Self::from_array(v)
    }
}

impl From<cgmath::Vector3<f32>> for Vector3 {
    fn from(v: cgmath::Vector3<f32>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Vector3> for cgmath::Vector3<f32> {
    fn from(v: Vector3) -> Self {
        cgmath::Vector3::new(v.x, v.y, v.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let x = Vector3::new(1.0, 0.0, 0.0);
        let y = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(y.cross(x), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_unit_matches_cgmath() {
        let v = Vector3::new(3.0, -4.0, 12.0);
        let ours = v.unit();
        let theirs: Vector3 = cgmath::Vector3::from(v).normalize().into();
        assert!(ours.approx_eq(theirs, 1e-6));
        assert!((ours.magnitude() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_unit_of_zero_is_nan() {
        let n = Vector3::zero().unit();
        assert!(!n.is_finite());
        assert!(n.x.is_nan());
    }

    #[test]
    fn test_projections() {
        let v = Vector3::new(1.0, 1.0, 0.0);
        let onto = Vector3::new(0.0, 0.0, 2.0);
        assert_eq!(v.project_onto(onto), Vector3::zero());

        let along = Vector3::new(2.0, 0.0, 0.0);
        assert_eq!(v.project_onto(along), Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(v.scalar_projection(along), 1.0);
    }

    #[test]
    fn test_operators() {
        let a = Vector3::new(1.0, 2.0, 3.0);
        let b = Vector3::new(4.0, 5.0, 6.0);
        assert_eq!(b - a, Vector3::new(3.0, 3.0, 3.0));
        assert_eq!(a + b, Vector3::new(5.0, 7.0, 9.0));
        assert_eq!(-a, Vector3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
    }
}
