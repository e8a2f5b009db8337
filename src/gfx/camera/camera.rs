//! # Look-at Camera
//!
//! Builds a view matrix from an eye position `P`, a target `Q` and an `up`
//! hint, and keeps an orthographic and a perspective projection ready so
//! either can be selected by name.

use std::fmt::{self, Display};
use std::str::FromStr;

use crate::error::ParseProjectionError;
use crate::gfx::scene::transform::Transform;
use crate::math::{Matrix4, Vector3};

/// Clipping volume shared by both projections
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Frustum {
    fn default() -> Self {
        Self {
            left: -1920.0 * 1.5,
            right: 1920.0 * 1.5,
            bottom: -1920.0,
            top: 1920.0,
            near: 1000.0,
            far: 10000.0,
        }
    }
}

impl Frustum {
    pub fn new(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Symmetric frustum with the given half extents
    pub fn symmetric(half_width: f32, half_height: f32, near: f32, far: f32) -> Self {
        Self::new(-half_width, half_width, -half_height, half_height, near, far)
    }

    pub fn with_near_far(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }
}

/// Projection selectable on a [`Camera`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionKind {
    Orthographic,
    #[default]
    Perspective,
}

impl FromStr for ProjectionKind {
    type Err = ParseProjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "orthographic" => Ok(ProjectionKind::Orthographic),
            "perspective" => Ok(ProjectionKind::Perspective),
            other => Err(ParseProjectionError(other.to_string())),
        }
    }
}

impl Display for ProjectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKind::Orthographic => write!(f, "orthographic"),
            ProjectionKind::Perspective => write!(f, "perspective"),
        }
    }
}

/// OpenGL-style orthographic projection (clip z in [-1, 1])
#[rustfmt::skip]
pub fn orthographic(f: &Frustum) -> Matrix4 {
    let Frustum { left: l, right: r, bottom: b, top: t, near: n, far: fa } = *f;
    Matrix4::from_values([
        2.0 / (r - l), 0.0, 0.0, 0.0,
        0.0, 2.0 / (t - b), 0.0, 0.0,
        0.0, 0.0, -2.0 / (fa - n), 0.0,
        -(r + l) / (r - l), -(t + b) / (t - b), -(fa + n) / (fa - n), 1.0,
    ])
}

/// OpenGL-style perspective projection (clip z in [-1, 1])
#[rustfmt::skip]
pub fn perspective(f: &Frustum) -> Matrix4 {
    let Frustum { left: l, right: r, bottom: b, top: t, near: n, far: fa } = *f;
    Matrix4::from_values([
        2.0 * n / (r - l), 0.0, 0.0, 0.0,
        0.0, 2.0 * n / (t - b), 0.0, 0.0,
        (r + l) / (r - l), (t + b) / (t - b), -(fa + n) / (fa - n), -1.0,
        0.0, 0.0, -2.0 * n * fa / (fa - n), 0.0,
    ])
}

/// Camera with a look-at view matrix and two precomputed projections.
///
/// The basis is `ze = unit(P - Q)`, `ye = unit(up - proj_ze(up))`,
/// `xe = ye × ze`. An `up` parallel to the view direction has no valid basis
/// and yields NaN entries.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: Transform,
    up: Vector3,
    target: Vector3,
    eye: Vector3,
    camera_matrix: Matrix4,
    frustum: Frustum,
    orthographic: Matrix4,
    perspective: Matrix4,
    kind: ProjectionKind,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vector3::zero(), ProjectionKind::default())
    }
}

impl Camera {
    pub const DEFAULT_UP: Vector3 = Vector3::new(1.0, 1.0, 0.0);
    pub const DEFAULT_TARGET: Vector3 = Vector3::new(0.0, 0.0, -1.0);
    pub const DEFAULT_EYE: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub fn new(position: Vector3, kind: ProjectionKind) -> Self {
        let frustum = Frustum::default();
        let mut camera = Self {
            transform: Transform::new(position),
            up: Self::DEFAULT_UP,
            target: Self::DEFAULT_TARGET,
            eye: Self::DEFAULT_EYE,
            camera_matrix: Matrix4::identity(),
            frustum,
            orthographic: orthographic(&frustum),
            perspective: perspective(&frustum),
            kind,
        };
        camera.set_camera(Self::DEFAULT_UP, Self::DEFAULT_TARGET, Self::DEFAULT_EYE);
        camera
    }

    /// Replaces the frustum and rebuilds both projections
    pub fn with_frustum(mut self, frustum: Frustum) -> Self {
        self.set_frustum(frustum);
        self
    }

    pub fn set_frustum(&mut self, frustum: Frustum) {
        self.frustum = frustum;
        self.orthographic = orthographic(&frustum);
        self.perspective = perspective(&frustum);
    }

    /// Sets `up`, target `q` and eye `p` together and rebuilds the view matrix
    #[rustfmt::skip]
    pub fn set_camera(&mut self, up: Vector3, q: Vector3, p: Vector3) {
        self.up = up;
        self.target = q;
        self.eye = p;

        let (xe, ye, ze) = self.basis();
        self.camera_matrix = Matrix4::from_values([
            xe.x, ye.x, ze.x, 0.0,
            xe.y, ye.y, ze.y, 0.0,
            xe.z, ye.z, ze.z, 0.0,
            -p.dot(xe), -p.dot(ye), -p.dot(ze), 1.0,
        ]);
    }

    /// Moves the eye to `p`, keeping target and up
    pub fn look_at(&mut self, p: Vector3) {
        self.set_camera(self.up, self.target, p);
    }

    pub fn set_up(&mut self, up: Vector3) {
        self.set_camera(up, self.target, self.eye);
    }

    /// Moves the target to `q`, keeping eye and up
    pub fn set_q(&mut self, q: Vector3) {
        self.set_camera(self.up, q, self.eye);
    }

    pub fn set_projection(&mut self, kind: ProjectionKind) {
        self.kind = kind;
    }

    /// Right, up and backward unit vectors of the view
    pub fn basis(&self) -> (Vector3, Vector3, Vector3) {
        let ze = (self.eye - self.target).unit();
        let ye = (self.up - self.up.project_onto(ze)).unit();
        let xe = ye.cross(ze);
        (xe, ye, ze)
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn target(&self) -> Vector3 {
        self.target
    }

    pub fn eye(&self) -> Vector3 {
        self.eye
    }

    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        self.kind
    }

    /// World-to-view matrix
    pub fn camera_matrix(&self) -> Matrix4 {
        self.camera_matrix
    }

    /// Projection currently selected
    pub fn projection_matrix(&self) -> Matrix4 {
        self.projection(self.kind)
    }

    pub fn projection(&self, kind: ProjectionKind) -> Matrix4 {
        match kind {
            ProjectionKind::Orthographic => self.orthographic,
            ProjectionKind::Perspective => self.perspective,
        }
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
