//! Fixed-size numeric vectors
//!
//! `Vector<T, N>` is a plain `[T; N]` with arithmetic. The component count is
//! part of the type, so mixing a 3-vector with a 4-vector is a compile error
//! rather than a runtime truncation.

use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use approx::{AbsDiffEq, RelativeEq};
use num_traits::{AsPrimitive, Float, Num, Zero};
use serde::{Deserialize, Serialize};

use crate::error::MathError;

/// N-component numeric vector, stored inline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct Vector<T, const N: usize> {
    #[serde(with = "crate::foundation::serde_array")]
    components: [T; N],
}

/// 2D vector type
pub type Vec2 = Vector<f32, 2>;

/// 3D vector type
pub type Vec3 = Vector<f32, 3>;

/// 4D vector type
pub type Vec4 = Vector<f32, 4>;

impl<T, const N: usize> Vector<T, N> {
    /// Create a vector from its components
    pub const fn from_array(components: [T; N]) -> Self {
        Self { components }
    }

    /// Number of components
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for the zero-component vector
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Borrow the components as an array
    pub const fn as_array(&self) -> &[T; N] {
        &self.components
    }

    /// Borrow the components as a slice
    pub fn as_slice(&self) -> &[T] {
        &self.components
    }

    /// Consume the vector and return its components
    pub fn into_array(self) -> [T; N] {
        self.components
    }

    /// Iterate over the components
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.components.iter()
    }
}

impl<T: Copy, const N: usize> Vector<T, N> {
    /// Vector with every component set to `value`
    pub fn splat(value: T) -> Self {
        Self { components: [value; N] }
    }

    /// Build from a slice holding exactly `N` elements
    pub fn from_slice(slice: &[T]) -> Result<Self, MathError> {
        let components: [T; N] = slice.try_into().map_err(|_| MathError::DimensionMismatch {
            expected: N,
            actual: slice.len(),
        })?;
        Ok(Self { components })
    }

    /// Apply `f` to every component
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Vector<U, N> {
        Vector { components: self.components.map(f) }
    }

    /// Combine two vectors component by component
    pub fn zip_map<U: Copy, V, F: FnMut(T, U) -> V>(self, other: Vector<U, N>, mut f: F) -> Vector<V, N> {
        Vector {
            components: std::array::from_fn(|i| f(self.components[i], other.components[i])),
        }
    }

    /// Element-wise conversion to another numeric type
    pub fn cast<U>(self) -> Vector<U, N>
    where
        T: AsPrimitive<U>,
        U: Copy + 'static,
    {
        self.map(AsPrimitive::as_)
    }
}

impl<T: Copy + Zero, const N: usize> Vector<T, N> {
    /// The zero vector
    pub fn zeros() -> Self {
        Self::splat(T::zero())
    }
}

impl<T: Copy + Zero, const N: usize> Default for Vector<T, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: Copy + Num, const N: usize> Vector<T, N> {
    /// Multiply every component by `k`
    #[must_use]
    pub fn scale(self, k: T) -> Self {
        self.map(|c| c * k)
    }

    /// Divide every component by `k`
    #[must_use]
    pub fn div_scalar(self, k: T) -> Self {
        self.map(|c| c / k)
    }

    /// Add `k` to every component
    #[must_use]
    pub fn offset(self, k: T) -> Self {
        self.map(|c| c + k)
    }

    /// Component-wise product
    #[must_use]
    pub fn component_mul(self, other: Self) -> Self {
        self.zip_map(other, |a, b| a * b)
    }

    /// Component-wise quotient
    #[must_use]
    pub fn component_div(self, other: Self) -> Self {
        self.zip_map(other, |a, b| a / b)
    }

    /// Sum of pairwise products
    pub fn dot(&self, other: &Self) -> T {
        self.components
            .iter()
            .zip(other.components.iter())
            .fold(T::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Squared Euclidean length
    pub fn length_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: Float, const N: usize> Vector<T, N> {
    /// Euclidean length, `sqrt(dot(v, v))`
    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Distance between two points
    pub fn distance(&self, other: &Self) -> T {
        (*other - *self).length()
    }

    /// Unit vector in the same direction
    ///
    /// The length must be nonzero. Debug builds assert this; release builds
    /// return the raw division, which yields NaN components for a zero
    /// vector. Use [`Vector::try_normalized`] when the input is untrusted.
    #[must_use]
    pub fn normalized(self) -> Self {
        let length = self.length();
        debug_assert!(length > T::zero(), "normalized() called on a zero-length vector");
        self.div_scalar(length)
    }

    /// Unit vector in the same direction, or `ZeroLength` for the zero vector
    pub fn try_normalized(self) -> Result<Self, MathError> {
        let length = self.length();
        if length > T::zero() {
            Ok(self.div_scalar(length))
        } else {
            Err(MathError::ZeroLength)
        }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1)
    #[must_use]
    pub fn lerp(self, other: Self, t: T) -> Self {
        self + (other - self).scale(t)
    }
}

impl<T: Copy> Vector<T, 2> {
    /// Create a 2D vector
    pub const fn new(x: T, y: T) -> Self {
        Self { components: [x, y] }
    }

    /// X component
    pub const fn x(&self) -> T {
        self.components[0]
    }

    /// Y component
    pub const fn y(&self) -> T {
        self.components[1]
    }

    /// Append a third component
    pub fn extend(self, z: T) -> Vector<T, 3> {
        Vector::<T, 3>::new(self.components[0], self.components[1], z)
    }
}

impl<T: Copy> Vector<T, 3> {
    /// Create a 3D vector
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { components: [x, y, z] }
    }

    /// X component
    pub const fn x(&self) -> T {
        self.components[0]
    }

    /// Y component
    pub const fn y(&self) -> T {
        self.components[1]
    }

    /// Z component
    pub const fn z(&self) -> T {
        self.components[2]
    }

    /// Drop the Z component
    pub fn truncate(self) -> Vector<T, 2> {
        Vector::<T, 2>::new(self.components[0], self.components[1])
    }

    /// Append a W component (1 for points, 0 for directions)
    pub fn extend(self, w: T) -> Vector<T, 4> {
        Vector::<T, 4>::new(self.components[0], self.components[1], self.components[2], w)
    }
}

impl<T: Copy + Num> Vector<T, 3> {
    /// Cross product
    ///
    /// Standard component formula. Handedness is a property of how callers
    /// interpret the axes, not of this function.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.components;
        let [bx, by, bz] = other.components;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }
}

impl<T: Copy> Vector<T, 4> {
    /// Create a 4D vector
    pub const fn new(x: T, y: T, z: T, w: T) -> Self {
        Self { components: [x, y, z, w] }
    }

    /// X component
    pub const fn x(&self) -> T {
        self.components[0]
    }

    /// Y component
    pub const fn y(&self) -> T {
        self.components[1]
    }

    /// Z component
    pub const fn z(&self) -> T {
        self.components[2]
    }

    /// W component
    pub const fn w(&self) -> T {
        self.components[3]
    }

    /// Drop the W component
    pub fn truncate(self) -> Vector<T, 3> {
        Vector::<T, 3>::new(self.components[0], self.components[1], self.components[2])
    }
}

impl<T, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(components: [T; N]) -> Self {
        Self { components }
    }
}

impl<T, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(vector: Vector<T, N>) -> Self {
        vector.components
    }
}

impl<T, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.components[index]
    }
}

impl<T, const N: usize> IndexMut<usize> for Vector<T, N> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.components[index]
    }
}

impl<'a, T, const N: usize> IntoIterator for &'a Vector<T, N> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl<T: Copy + Num, const N: usize> Add for Vector<T, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a + b)
    }
}

impl<T: Copy + Num, const N: usize> Sub for Vector<T, N> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.zip_map(rhs, |a, b| a - b)
    }
}

impl<T: Copy + Num, const N: usize> Mul<T> for Vector<T, N> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self {
        self.scale(rhs)
    }
}

impl<T: Copy + Num, const N: usize> Div<T> for Vector<T, N> {
    type Output = Self;

    fn div(self, rhs: T) -> Self {
        self.div_scalar(rhs)
    }
}

impl<T: Copy + Neg<Output = T>, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|c| -c)
    }
}

impl<T: Copy + Num, const N: usize> AddAssign for Vector<T, N> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Copy + Num, const N: usize> SubAssign for Vector<T, N> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Copy + Num, const N: usize> MulAssign<T> for Vector<T, N> {
    fn mul_assign(&mut self, rhs: T) {
        *self = self.scale(rhs);
    }
}

impl<T: Copy + Num, const N: usize> DivAssign<T> for Vector<T, N> {
    fn div_assign(&mut self, rhs: T) {
        *self = self.div_scalar(rhs);
    }
}

macro_rules! impl_scalar_lhs_mul {
    ($($scalar:ty),*) => {
        $(
            impl<const N: usize> Mul<Vector<$scalar, N>> for $scalar {
                type Output = Vector<$scalar, N>;

                fn mul(self, rhs: Vector<$scalar, N>) -> Vector<$scalar, N> {
                    rhs.scale(self)
                }
            }
        )*
    };
}

impl_scalar_lhs_mul!(f32, f64, i32);

impl<T, const N: usize> AbsDiffEq for Vector<T, N>
where
    T: AbsDiffEq,
    T::Epsilon: Copy,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> Self::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

impl<T, const N: usize> RelativeEq for Vector<T, N>
where
    T: RelativeEq,
    T::Epsilon: Copy,
{
    fn default_max_relative() -> Self::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.components
            .iter()
            .zip(other.components.iter())
            .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}
