//! Conversions to and from `nalgebra`
//!
//! Element `(row, col)` maps to element `(row, col)`; no transposition is
//! applied. Note that nalgebra multiplies column vectors, so a kernel
//! transform `M` acts on nalgebra vectors as `M.transpose() * v`.

use nalgebra::{SMatrix, SVector, Scalar};

use crate::math::{Matrix, Quaternion, Vector};

impl<T: Scalar, const N: usize> From<Vector<T, N>> for SVector<T, N> {
    fn from(v: Vector<T, N>) -> Self {
        Self::from(v.into_array())
    }
}

impl<T: Scalar, const N: usize> From<SVector<T, N>> for Vector<T, N> {
    fn from(v: SVector<T, N>) -> Self {
        Self::from_array(std::array::from_fn(|i| v[i].clone()))
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<Matrix<T, R, C>> for SMatrix<T, R, C> {
    fn from(m: Matrix<T, R, C>) -> Self {
        Self::from_fn(|r, c| m[(r, c)].clone())
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<SMatrix<T, R, C>> for Matrix<T, R, C> {
    fn from(m: SMatrix<T, R, C>) -> Self {
        Self::from_fn(|r, c| m[(r, c)].clone())
    }
}

impl From<Quaternion> for nalgebra::Quaternion<f32> {
    fn from(q: Quaternion) -> Self {
        Self::new(q.w, q.x, q.y, q.z)
    }
}

impl From<nalgebra::Quaternion<f32>> for Quaternion {
    fn from(q: nalgebra::Quaternion<f32>) -> Self {
        Self::new(q.w, q.i, q.j, q.k)
    }
}

impl From<Quaternion> for nalgebra::UnitQuaternion<f32> {
    /// Normalizes on the way in
    fn from(q: Quaternion) -> Self {
        Self::from_quaternion(q.into())
    }
}

impl From<nalgebra::UnitQuaternion<f32>> for Quaternion {
    fn from(q: nalgebra::UnitQuaternion<f32>) -> Self {
        q.into_inner().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Mat3, Vec3};
    use approx::assert_relative_eq;

    #[test]
    fn test_vector_round_trip() {
        let v = Vec3::new(1.0, -2.0, 3.5);
        let na: nalgebra::Vector3<f32> = v.into();
        assert_eq!((na.x, na.y, na.z), (1.0, -2.0, 3.5));
        assert_eq!(Vec3::from(na), v);
    }

    #[test]
    fn test_matrix_keeps_element_positions() {
        let m = Mat3::from_array([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let na: nalgebra::Matrix3<f32> = m.into();
        assert_eq!(na[(0, 2)], 3.0);
        assert_eq!(na[(2, 0)], 7.0);
        assert_eq!(Mat3::from(na), m);

        let wide = Matrix::<i32, 2, 3>::from_array([[1, 2, 3], [4, 5, 6]]);
        let na_wide: SMatrix<i32, 2, 3> = wide.into();
        assert_eq!(na_wide.ncols(), 3);
        assert_eq!(Matrix::from(na_wide), wide);
    }

    #[test]
    fn test_quaternion_component_order() {
        let q = Quaternion::new(0.5, 0.1, 0.2, 0.3);
        let na: nalgebra::Quaternion<f32> = q.into();
        assert_eq!((na.w, na.i, na.j, na.k), (0.5, 0.1, 0.2, 0.3));
        assert_eq!(Quaternion::from(na), q);
    }

    #[test]
    fn test_unit_quaternion_is_normalized() {
        let q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        let unit: nalgebra::UnitQuaternion<f32> = q.into();
        assert_relative_eq!(Quaternion::from(unit), Quaternion::IDENTITY);
    }
}
