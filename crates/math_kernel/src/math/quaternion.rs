//! Rotation quaternions
//!
//! Components are stored as `(w, x, y, z)` with `w` the scalar part. The
//! Hamilton product `a * b` applies `b` first, so in the row-vector
//! convention `(a * b).to_rotation_matrix() == b.to_rotation_matrix() *
//! a.to_rotation_matrix()`.
//!
//! `rotate`, `axis`, `radians`, `degrees` and `pow` expect a unit quaternion.
//! Debug builds check this.

use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};

use super::matrix::{Mat3, Mat4};
use super::vector::{Vec3, Vec4};
use crate::error::MathError;
use crate::foundation::numeric::{self, constants};

/// Tolerance used by the unit-length debug checks
const UNIT_TOLERANCE: f32 = 1e-3;

/// Quaternion `w + xi + yj + zk`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar part
    pub w: f32,
    /// i component
    pub x: f32,
    /// j component
    pub y: f32,
    /// k component
    pub z: f32,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 0.0);

    /// Create a quaternion from raw components
    pub const fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// Rotation of `radians` around a unit-length `axis`
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(c, axis.x() * s, axis.y() * s, axis.z() * s)
    }

    /// Components taken in `(w, x, y, z)` order
    pub const fn from_vec4(v: Vec4) -> Self {
        Self::new(v.x(), v.y(), v.z(), v.w())
    }

    /// Components taken from a slice of exactly four values in `(w, x, y, z)` order
    pub fn from_slice(values: &[f32]) -> Result<Self, MathError> {
        match *values {
            [w, x, y, z] => Ok(Self::new(w, x, y, z)),
            _ => Err(MathError::DimensionMismatch {
                expected: 4,
                actual: values.len(),
            }),
        }
    }

    /// Rotation around the X axis
    pub fn rotation_x(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(c, s, 0.0, 0.0)
    }

    /// Rotation around the Y axis
    pub fn rotation_y(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(c, 0.0, s, 0.0)
    }

    /// Rotation around the Z axis
    pub fn rotation_z(radians: f32) -> Self {
        let (s, c) = (radians * 0.5).sin_cos();
        Self::new(c, 0.0, 0.0, s)
    }

    /// Overwrite with a rotation around the X axis
    pub fn set_rotate_about_x(&mut self, radians: f32) {
        *self = Self::rotation_x(radians);
    }

    /// Overwrite with a rotation around the Y axis
    pub fn set_rotate_about_y(&mut self, radians: f32) {
        *self = Self::rotation_y(radians);
    }

    /// Overwrite with a rotation around the Z axis
    pub fn set_rotate_about_z(&mut self, radians: f32) {
        *self = Self::rotation_z(radians);
    }

    /// Overwrite with a rotation around a unit-length axis
    pub fn set_rotate_about_axis(&mut self, axis: Vec3, radians: f32) {
        *self = Self::from_axis_angle(axis, radians);
    }

    /// Components as a `(w, x, y, z)` vector
    pub const fn to_vec4(self) -> Vec4 {
        Vec4::new(self.w, self.x, self.y, self.z)
    }

    /// Vector part `(x, y, z)`
    pub const fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Squared norm
    pub fn norm_squared(&self) -> f32 {
        dot(self, self)
    }

    /// Euclidean norm of the four components
    pub fn norm(&self) -> f32 {
        self.norm_squared().sqrt()
    }

    /// Negated vector part
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse, `conjugate / norm²`
    ///
    /// A zero quaternion yields non-finite components.
    #[must_use]
    pub fn inverse(&self) -> Self {
        self.conjugate() / self.norm_squared()
    }

    /// Inverse of a unit quaternion, which is just its conjugate
    #[must_use]
    pub fn unit_inverse(&self) -> Self {
        self.debug_assert_unit("unit_inverse");
        self.conjugate()
    }

    /// Scale to unit length
    ///
    /// The norm must be nonzero; see [`Quaternion::try_normalized`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        let norm = self.norm();
        debug_assert!(norm > 0.0, "normalized() called on a zero quaternion");
        *self / norm
    }

    /// Scale to unit length, or `ZeroLength` for the zero quaternion
    pub fn try_normalized(&self) -> Result<Self, MathError> {
        let norm = self.norm();
        if norm > 0.0 {
            Ok(*self / norm)
        } else {
            Err(MathError::ZeroLength)
        }
    }

    /// Whether the norm is 1 within `epsilon`
    pub fn is_unit(&self, epsilon: f32) -> bool {
        numeric::approx_eq_eps(self.norm_squared(), 1.0, epsilon)
    }

    /// Rotation matrix for row vectors: `q.rotate(v) == v * q.to_rotation_matrix()`
    pub fn to_rotation_matrix(&self) -> Mat4 {
        let Self { w, x, y, z } = *self;
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);

        Mat4::from_array([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy + wz), 2.0 * (xz - wy), 0.0],
            [2.0 * (xy - wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz + wx), 0.0],
            [2.0 * (xz + wy), 2.0 * (yz - wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Recover the unit quaternion of a row-vector rotation matrix
    ///
    /// Solves for whichever component has the largest magnitude first to keep
    /// the division well conditioned. `m` must be orthonormal.
    pub fn from_rotation_matrix(m: &Mat3) -> Self {
        let (m00, m01, m02) = (m[(0, 0)], m[(0, 1)], m[(0, 2)]);
        let (m10, m11, m12) = (m[(1, 0)], m[(1, 1)], m[(1, 2)]);
        let (m20, m21, m22) = (m[(2, 0)], m[(2, 1)], m[(2, 2)]);

        // Each term is 4c² - 1 for its component c
        let w_term = m00 + m11 + m22;
        let x_term = m00 - m11 - m22;
        let y_term = m11 - m00 - m22;
        let z_term = m22 - m00 - m11;

        let mut biggest = 0;
        let mut biggest_term = w_term;
        for (index, candidate) in [x_term, y_term, z_term].into_iter().enumerate() {
            if candidate > biggest_term {
                biggest = index + 1;
                biggest_term = candidate;
            }
        }

        let biggest_value = (biggest_term + 1.0).sqrt() * 0.5;
        let mult = 0.25 / biggest_value;

        match biggest {
            0 => Self::new(biggest_value, (m12 - m21) * mult, (m20 - m02) * mult, (m01 - m10) * mult),
            1 => Self::new((m12 - m21) * mult, biggest_value, (m01 + m10) * mult, (m20 + m02) * mult),
            2 => Self::new((m20 - m02) * mult, (m01 + m10) * mult, biggest_value, (m12 + m21) * mult),
            _ => Self::new((m01 - m10) * mult, (m20 + m02) * mult, (m12 + m21) * mult, biggest_value),
        }
    }

    /// Rotate a vector: the vector part of `q * (0, v) * q⁻¹`
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        self.debug_assert_unit("rotate");
        let p = Self::new(0.0, v.x(), v.y(), v.z());
        (*self * p * self.conjugate()).vector_part()
    }

    /// Raise to a power, scaling the rotation angle by `exponent`
    ///
    /// Rotations within about 1.6 degrees of identity are returned unchanged
    /// since their axis cannot be recovered reliably.
    #[must_use]
    pub fn pow(&self, exponent: f32) -> Self {
        self.debug_assert_unit("pow");
        if self.w.abs() > 0.9999 {
            return *self;
        }

        let alpha = self.w.acos();
        let new_alpha = alpha * exponent;
        let mult = new_alpha.sin() / alpha.sin();
        Self::new(new_alpha.cos(), self.x * mult, self.y * mult, self.z * mult)
    }

    /// Unit rotation axis, `(1, 0, 0)` for the identity
    pub fn axis(&self) -> Vec3 {
        self.debug_assert_unit("axis");
        let sin_sq = 1.0 - self.w * self.w;
        if sin_sq <= 0.0 {
            return Vec3::new(1.0, 0.0, 0.0);
        }
        self.vector_part() / sin_sq.sqrt()
    }

    /// Rotation angle in radians, in `[0, 2π]`
    pub fn radians(&self) -> f32 {
        self.debug_assert_unit("radians");
        numeric::clamp(self.w, -1.0, 1.0).acos() * 2.0
    }

    /// Rotation angle in degrees
    pub fn degrees(&self) -> f32 {
        self.radians() * constants::RAD_TO_DEG
    }

    fn debug_assert_unit(&self, operation: &str) {
        debug_assert!(
            self.is_unit(UNIT_TOLERANCE),
            "{operation}() requires a unit quaternion, norm² was {}",
            self.norm_squared()
        );
    }
}

/// Four-component dot product
pub fn dot(a: &Quaternion, b: &Quaternion) -> f32 {
    a.w * b.w + a.x * b.x + a.y * b.y + a.z * b.z
}

/// Concatenate rotations left to right: `a` is applied first
///
/// Equal to `b * a`.
pub fn cross(a: &Quaternion, b: &Quaternion) -> Quaternion {
    *b * *a
}

/// Component-wise linear interpolation; the result is not renormalized
pub fn lerp(a: &Quaternion, b: &Quaternion, t: f32) -> Quaternion {
    *a + (*b - *a) * t
}

/// Spherical linear interpolation along the shorter arc
///
/// Falls back to a normalized linear blend when the inputs are nearly
/// parallel.
pub fn slerp(a: &Quaternion, b: &Quaternion, t: f32) -> Quaternion {
    let mut end = *b;
    let mut cos_omega = dot(a, b);
    if cos_omega < 0.0 {
        end = -end;
        cos_omega = -cos_omega;
    }

    let (k0, k1) = if cos_omega > 0.9999 {
        (1.0 - t, t)
    } else {
        let sin_omega = (1.0 - cos_omega * cos_omega).sqrt();
        let omega = sin_omega.atan2(cos_omega);
        let inv_sin = 1.0 / sin_omega;
        (((1.0 - t) * omega).sin() * inv_sin, (t * omega).sin() * inv_sin)
    };

    let blended = *a * k0 + end * k1;
    blended.try_normalized().unwrap_or(blended)
}

impl Mul for Quaternion {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl MulAssign for Quaternion {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Add for Quaternion {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.w + rhs.w, self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Quaternion {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.w - rhs.w, self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Quaternion {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.w, -self.x, -self.y, -self.z)
    }
}

impl Add<f32> for Quaternion {
    type Output = Self;

    fn add(self, k: f32) -> Self {
        Self::new(self.w + k, self.x + k, self.y + k, self.z + k)
    }
}

impl Sub<f32> for Quaternion {
    type Output = Self;

    fn sub(self, k: f32) -> Self {
        self + -k
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;

    fn mul(self, k: f32) -> Self {
        Self::new(self.w * k, self.x * k, self.y * k, self.z * k)
    }
}

impl Mul<Quaternion> for f32 {
    type Output = Quaternion;

    fn mul(self, q: Quaternion) -> Quaternion {
        q * self
    }
}

impl Div<f32> for Quaternion {
    type Output = Self;

    fn div(self, k: f32) -> Self {
        Self::new(self.w / k, self.x / k, self.y / k, self.z / k)
    }
}

impl AddAssign for Quaternion {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Quaternion {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl AddAssign<f32> for Quaternion {
    fn add_assign(&mut self, k: f32) {
        *self = *self + k;
    }
}

impl SubAssign<f32> for Quaternion {
    fn sub_assign(&mut self, k: f32) {
        *self = *self - k;
    }
}

impl MulAssign<f32> for Quaternion {
    fn mul_assign(&mut self, k: f32) {
        *self = *self * k;
    }
}

impl DivAssign<f32> for Quaternion {
    fn div_assign(&mut self, k: f32) {
        *self = *self / k;
    }
}

impl Index<usize> for Quaternion {
    type Output = f32;

    /// Components in `(w, x, y, z)` order
    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.w,
            1 => &self.x,
            2 => &self.y,
            3 => &self.z,
            _ => panic!("quaternion index {index} out of range"),
        }
    }
}

impl From<Quaternion> for Vec4 {
    fn from(q: Quaternion) -> Self {
        q.to_vec4()
    }
}

impl AbsDiffEq for Quaternion {
    type Epsilon = f32;

    fn default_epsilon() -> f32 {
        f32::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f32) -> bool {
        self.to_vec4().abs_diff_eq(&other.to_vec4(), epsilon)
    }
}

impl RelativeEq for Quaternion {
    fn default_max_relative() -> f32 {
        f32::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f32, max_relative: f32) -> bool {
        self.to_vec4().relative_eq(&other.to_vec4(), epsilon, max_relative)
    }
}
