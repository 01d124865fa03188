//! Oriented planes

use serde::{Deserialize, Serialize};

use crate::error::MathError;
use crate::math::{Vec3, Vec4};

/// A plane defined by a unit normal and distance from origin
///
/// The signed distance of a point `p` is `dot(normal, p) + distance`. The
/// side the normal points to is positive; for frustum planes that is the
/// inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Plane {
    /// Create a plane from a unit-length normal and its distance term
    ///
    /// The normal is stored as given.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        debug_assert!(
            (normal.length_squared() - 1.0).abs() < 1e-3,
            "plane normal must be unit length, got {normal:?}"
        );
        Self { normal, distance }
    }

    /// Plane through `point`; `normal` is normalized first
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Result<Self, MathError> {
        let normal = normal.try_normalized()?;
        let distance = -normal.dot(&point);
        Ok(Self { normal, distance })
    }

    /// Plane from raw `(a, b, c, d)` coefficients of `ax + by + cz + d = 0`
    ///
    /// All four are divided by the length of `(a, b, c)`. Non-finite
    /// coefficients are rejected.
    pub fn from_coefficients(coefficients: Vec4) -> Result<Self, MathError> {
        if !coefficients.iter().all(|c| c.is_finite()) {
            return Err(MathError::Degenerate("plane coefficients must be finite"));
        }
        let length = coefficients.truncate().length();
        if !(length > 0.0 && length.is_finite()) {
            return Err(if length > 0.0 {
                MathError::Degenerate("plane normal is too large to normalize")
            } else {
                MathError::ZeroLength
            });
        }
        let scaled = coefficients / length;
        Ok(Self {
            normal: scaled.truncate(),
            distance: scaled.w(),
        })
    }

    /// Unit normal, pointing to the positive side
    pub const fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance term of the plane equation
    pub const fn distance(&self) -> f32 {
        self.distance
    }

    /// Get signed distance from point to plane (positive = in front)
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(&point) + self.distance
    }

    /// Test if a point is on the positive side of the plane or on it
    pub fn is_point_inside(&self, point: Vec3) -> bool {
        self.signed_distance(point) >= 0.0
    }

    /// Same plane with the positive side reversed
    #[must_use]
    pub fn flipped(&self) -> Self {
        Self {
            normal: -self.normal,
            distance: -self.distance,
        }
    }
}
