//! # Math Primitives
//!
//! Value types for the transform algebra: a column-major [`Matrix4`] and a
//! [`Vector3`]. Both convert to and from their `cgmath` counterparts.

pub mod matrix;
pub mod vector;

pub use matrix::Matrix4;
pub use vector::Vector3;
