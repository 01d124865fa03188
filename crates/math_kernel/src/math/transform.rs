//! 4x4 transform builders
//!
//! All matrices follow the row-vector, left-handed convention: translation
//! lives in the bottom row and `v * A * B` applies `A` first. Clip space
//! depth runs from 0 at the near plane to 1 at the far plane.

use super::matrix::{Mat3, Mat4};
use super::vector::{Vec3, Vec4};
use crate::error::MathError;

/// Extension trait for Mat4 with transform constructors and point helpers
pub trait Mat4Ext {
    /// Translation by `offset`
    fn translation(offset: Vec3) -> Mat4;

    /// Non-uniform scale along the axes
    fn scaling(factors: Vec3) -> Mat4;

    /// Create a rotation matrix around the X axis
    fn rotation_x(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Y axis
    fn rotation_y(angle: f32) -> Mat4;

    /// Create a rotation matrix around the Z axis
    fn rotation_z(angle: f32) -> Mat4;

    /// Rotation of `angle` radians around a unit-length `axis`
    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4;

    /// Left-handed look-at view matrix
    ///
    /// Fails when `eye == target` or `up` is parallel to the view direction.
    fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, MathError>;

    /// Left-handed perspective projection from a vertical field of view
    ///
    /// Fails unless `0 < fov_y < π`, `aspect` is positive and finite, and
    /// `0 < near < far` with `far` finite.
    fn perspective_fov_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Mat4, MathError>;

    /// Embed a 3x3 rotation/scale block with no translation
    fn from_mat3(m: &Mat3) -> Mat4;

    /// The upper-left 3x3 block
    fn upper_left3(&self) -> Mat3;

    /// Transform a point (w = 1), dividing by the resulting w when it is not 1
    fn transform_point(&self, point: Vec3) -> Vec3;

    /// Transform a direction (w = 0); translation is ignored
    fn transform_direction(&self, direction: Vec3) -> Vec3;
}

impl Mat4Ext for Mat4 {
    fn translation(offset: Vec3) -> Mat4 {
        let mut m = Mat4::identity();
        m.set_row(3, offset.extend(1.0));
        m
    }

    fn scaling(factors: Vec3) -> Mat4 {
        Mat4::from_array([
            [factors.x(), 0.0, 0.0, 0.0],
            [0.0, factors.y(), 0.0, 0.0],
            [0.0, 0.0, factors.z(), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_array([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_array([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_array([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn rotation_axis(axis: Vec3, angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        let (x, y, z) = (axis.x(), axis.y(), axis.z());
        Mat4::from_array([
            [c + t * x * x, t * x * y + s * z, t * x * z - s * y, 0.0],
            [t * x * y - s * z, c + t * y * y, t * y * z + s * x, 0.0],
            [t * x * z + s * y, t * y * z - s * x, c + t * z * z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    fn look_at_lh(eye: Vec3, target: Vec3, up: Vec3) -> Result<Mat4, MathError> {
        let forward = (target - eye).try_normalized()?;
        let right = up
            .cross(&forward)
            .try_normalized()
            .map_err(|_| MathError::Degenerate("up vector is parallel to the view direction"))?;
        let camera_up = forward.cross(&right);

        Ok(Mat4::from_array([
            [right.x(), camera_up.x(), forward.x(), 0.0],
            [right.y(), camera_up.y(), forward.y(), 0.0],
            [right.z(), camera_up.z(), forward.z(), 0.0],
            [-right.dot(&eye), -camera_up.dot(&eye), -forward.dot(&eye), 1.0],
        ]))
    }

    fn perspective_fov_lh(fov_y: f32, aspect: f32, near: f32, far: f32) -> Result<Mat4, MathError> {
        if !(fov_y > 0.0 && fov_y < std::f32::consts::PI) {
            return Err(MathError::Degenerate("field of view must lie in (0, pi)"));
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(MathError::Degenerate("aspect ratio must be positive and finite"));
        }
        if !(near > 0.0 && far > near && far.is_finite()) {
            return Err(MathError::Degenerate("clip planes must satisfy 0 < near < far < inf"));
        }

        let y_scale = 1.0 / (fov_y * 0.5).tan();
        let x_scale = y_scale / aspect;
        let depth = far / (far - near);

        Ok(Mat4::from_array([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, depth, 1.0],
            [0.0, 0.0, -near * depth, 0.0],
        ]))
    }

    fn from_mat3(m: &Mat3) -> Mat4 {
        Mat4::from_fn(|r, c| match (r, c) {
            (3, 3) => 1.0,
            (3, _) | (_, 3) => 0.0,
            _ => m[(r, c)],
        })
    }

    fn upper_left3(&self) -> Mat3 {
        Mat3::from_fn(|r, c| self[(r, c)])
    }

    fn transform_point(&self, point: Vec3) -> Vec3 {
        let h: Vec4 = point.extend(1.0) * *self;
        let w = h.w();
        if w == 0.0 || w == 1.0 {
            h.truncate()
        } else {
            h.truncate() / w
        }
    }

    fn transform_direction(&self, direction: Vec3) -> Vec3 {
        (direction.extend(0.0) * *self).truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::numeric::constants::{HALF_PI, PI};
    use approx::assert_relative_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn test_translation_moves_points_not_directions() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(m.transform_point(Vec3::zeros()), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(m.transform_direction(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_transforms_compose_left_to_right() {
        // Scale first, then translate
        let m = Mat4::scaling(Vec3::splat(2.0)) * Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(m.transform_point(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_axis_rotations() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        let z = Vec3::new(0.0, 0.0, 1.0);

        assert_relative_eq!(Mat4::rotation_z(HALF_PI).transform_direction(x), y, epsilon = EPSILON);
        assert_relative_eq!(Mat4::rotation_x(HALF_PI).transform_direction(y), z, epsilon = EPSILON);
        assert_relative_eq!(Mat4::rotation_y(HALF_PI).transform_direction(z), x, epsilon = EPSILON);
    }

    #[test]
    fn test_rotation_axis_matches_axis_rotations() {
        let angle = 0.73;
        assert_relative_eq!(
            Mat4::rotation_axis(Vec3::new(1.0, 0.0, 0.0), angle),
            Mat4::rotation_x(angle),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::rotation_axis(Vec3::new(0.0, 1.0, 0.0), angle),
            Mat4::rotation_y(angle),
            epsilon = EPSILON
        );
        assert_relative_eq!(
            Mat4::rotation_axis(Vec3::new(0.0, 0.0, 1.0), angle),
            Mat4::rotation_z(angle),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_rotation_is_orthonormal() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalized();
        let r = Mat4::rotation_axis(axis, 1.1);
        assert!((r * r.transposed()).is_identity(1e-5));
    }

    #[test]
    fn test_look_at_lh() {
        let eye = Vec3::new(0.0, 0.0, -5.0);
        let view = Mat4::look_at_lh(eye, Vec3::zeros(), Vec3::new(0.0, 1.0, 0.0)).unwrap();

        // The eye maps to the origin and the target lies on +Z
        assert_relative_eq!(view.transform_point(eye), Vec3::zeros(), epsilon = EPSILON);
        assert_relative_eq!(view.transform_point(Vec3::zeros()), Vec3::new(0.0, 0.0, 5.0), epsilon = EPSILON);
        // +X stays to the right in a left-handed frame
        assert_relative_eq!(
            view.transform_point(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(1.0, 0.0, 5.0),
            epsilon = EPSILON
        );
    }

    #[test]
    fn test_look_at_degenerate_input() {
        let up = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(Mat4::look_at_lh(Vec3::zeros(), Vec3::zeros(), up), Err(MathError::ZeroLength));
        assert!(matches!(
            Mat4::look_at_lh(Vec3::zeros(), Vec3::new(0.0, 3.0, 0.0), up),
            Err(MathError::Degenerate(_))
        ));
    }

    #[test]
    fn test_perspective_depth_range() {
        let (near, far) = (1.0, 100.0);
        let proj = Mat4::perspective_fov_lh(HALF_PI, 1.0, near, far).unwrap();

        assert_relative_eq!(proj.transform_point(Vec3::new(0.0, 0.0, near)).z(), 0.0, epsilon = EPSILON);
        assert_relative_eq!(proj.transform_point(Vec3::new(0.0, 0.0, far)).z(), 1.0, epsilon = 1e-5);
        // A 90 degree fov puts the frustum edge at x == z
        assert_relative_eq!(proj.transform_point(Vec3::new(10.0, 0.0, 10.0)).x(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_perspective_rejects_bad_parameters() {
        assert!(Mat4::perspective_fov_lh(0.0, 1.0, 1.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(PI, 1.0, 1.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 0.0, 1.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 1.0, 0.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 1.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_perspective_rejects_non_finite_parameters() {
        assert_eq!(
            Mat4::perspective_fov_lh(1.0, f32::NAN, 1.0, 10.0),
            Err(MathError::Degenerate("aspect ratio must be positive and finite"))
        );
        assert!(Mat4::perspective_fov_lh(1.0, f32::INFINITY, 1.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(f32::NAN, 1.0, 1.0, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 1.0, f32::NAN, 10.0).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 1.0, 1.0, f32::NAN).is_err());
        assert!(Mat4::perspective_fov_lh(1.0, 1.0, 1.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_mat3_embedding_round_trip() {
        let r = Mat4::rotation_y(0.4);
        assert_eq!(Mat4::from_mat3(&r.upper_left3()), r);
    }
}
