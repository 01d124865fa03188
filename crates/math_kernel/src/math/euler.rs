//! Heading/pitch/bank Euler angles
//!
//! Heading turns about +Y, pitch about +X and bank about +Z. Taking a vector
//! from object space to inertial space applies bank, then pitch, then
//! heading; with row vectors that matrix is `Rz(bank) * Rx(pitch) *
//! Ry(heading)`. The inertial-to-object matrix is its transpose.

use serde::{Deserialize, Serialize};

use super::matrix::{Mat3, Mat4};
use super::transform::Mat4Ext;
use crate::foundation::numeric::{self, constants};

/// |sin(pitch)| above which the orientation is treated as gimbal locked
const GIMBAL_LOCK_THRESHOLD: f32 = 0.9999;

/// Shared cutoff for extraction and [`EulerAngle::canonized`]
fn is_gimbal_locked(sin_pitch: f32) -> bool {
    sin_pitch.abs() > GIMBAL_LOCK_THRESHOLD
}

/// Which direction a rotation matrix maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EulerAngleMode {
    /// Matrix takes inertial-space vectors into object space
    InertialToObject,
    /// Matrix takes object-space vectors into inertial space
    ObjectToInertial,
}

/// Orientation as three successive axis rotations, in radians
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngle {
    /// Rotation about Y
    pub heading: f32,
    /// Rotation about X
    pub pitch: f32,
    /// Rotation about Z
    pub bank: f32,
}

impl EulerAngle {
    /// No rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0);

    /// Create from heading, pitch and bank
    pub const fn new(heading: f32, pitch: f32, bank: f32) -> Self {
        Self { heading, pitch, bank }
    }

    /// Alias for `heading`
    pub const fn yaw(&self) -> f32 {
        self.heading
    }

    /// Alias for `bank`
    pub const fn roll(&self) -> f32 {
        self.bank
    }

    /// Extract angles from an orthonormal rotation matrix
    ///
    /// Near gimbal lock (pitch at ±90°) heading and bank rotate about the
    /// same axis; bank is then reported as 0 and the whole rotation goes
    /// into heading, using the same cutoff as [`EulerAngle::canonized`].
    /// Heading and bank come back in `[-π, π]`.
    pub fn from_matrix3(m: &Mat3, mode: EulerAngleMode) -> Self {
        // Index the inertial-to-object layout regardless of which way `m` maps
        let at = |row: usize, col: usize| match mode {
            EulerAngleMode::InertialToObject => m[(row, col)],
            EulerAngleMode::ObjectToInertial => m[(col, row)],
        };

        let sin_pitch = numeric::clamp(-at(1, 2), -1.0, 1.0);
        if is_gimbal_locked(sin_pitch) {
            return Self::new((-at(2, 0)).atan2(at(0, 0)), sin_pitch.asin(), 0.0);
        }

        Self::new(
            at(0, 2).atan2(at(2, 2)),
            sin_pitch.asin(),
            at(1, 0).atan2(at(1, 1)),
        )
    }

    /// Extract angles from the rotation block of a 4x4 matrix
    pub fn from_matrix4(m: &Mat4, mode: EulerAngleMode) -> Self {
        Self::from_matrix3(&m.upper_left3(), mode)
    }

    /// Build the rotation matrix mapping in the direction given by `mode`
    pub fn to_matrix3(&self, mode: EulerAngleMode) -> Mat3 {
        let (sh, ch) = self.heading.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        let (sb, cb) = self.bank.sin_cos();

        let inertial_to_object = Mat3::from_array([
            [ch * cb + sh * sp * sb, -ch * sb + sh * sp * cb, sh * cp],
            [sb * cp, cb * cp, -sp],
            [-sh * cb + ch * sp * sb, sb * sh + ch * sp * cb, ch * cp],
        ]);

        match mode {
            EulerAngleMode::InertialToObject => inertial_to_object,
            EulerAngleMode::ObjectToInertial => inertial_to_object.transposed(),
        }
    }

    /// 4x4 version of [`EulerAngle::to_matrix3`] with no translation
    pub fn to_matrix4(&self, mode: EulerAngleMode) -> Mat4 {
        Mat4::from_mat3(&self.to_matrix3(mode))
    }

    /// Equivalent angles with heading and bank in `(-π, π]` and pitch in
    /// `[-π/2, π/2]`
    ///
    /// In gimbal lock bank is folded into heading and set to 0.
    #[must_use]
    pub fn canonized(&self) -> Self {
        let mut heading = self.heading;
        let mut pitch = numeric::wrap_pi(self.pitch);
        let mut bank = self.bank;

        if pitch > constants::HALF_PI {
            pitch = constants::PI - pitch;
            heading += constants::PI;
            bank += constants::PI;
        } else if pitch < -constants::HALF_PI {
            pitch = -constants::PI - pitch;
            heading += constants::PI;
            bank += constants::PI;
        }

        if is_gimbal_locked(pitch.sin()) {
            heading -= bank * pitch.signum();
            bank = 0.0;
        } else {
            bank = numeric::wrap_pi(bank);
        }

        Self::new(numeric::wrap_pi(heading), pitch, bank)
    }
}

impl From<EulerAngle> for [f32; 3] {
    /// `[heading, pitch, bank]`
    fn from(angles: EulerAngle) -> Self {
        [angles.heading, angles.pitch, angles.bank]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPSILON: f32 = 1e-4;
    const MODES: [EulerAngleMode; 2] = [EulerAngleMode::InertialToObject, EulerAngleMode::ObjectToInertial];

    fn assert_angles_eq(a: EulerAngle, b: EulerAngle) {
        assert_abs_diff_eq!(a.heading, b.heading, epsilon = EPSILON);
        assert_abs_diff_eq!(a.pitch, b.pitch, epsilon = EPSILON);
        assert_abs_diff_eq!(a.bank, b.bank, epsilon = EPSILON);
    }

    #[test]
    fn test_aliases() {
        let e = EulerAngle::new(0.1, 0.2, 0.3);
        assert_eq!(e.yaw(), 0.1);
        assert_eq!(e.roll(), 0.3);
        assert_eq!(<[f32; 3]>::from(e), [0.1, 0.2, 0.3]);
        assert_eq!(EulerAngle::default(), EulerAngle::IDENTITY);
    }

    #[test]
    fn test_identity_matrix() {
        for mode in MODES {
            assert!(EulerAngle::IDENTITY.to_matrix3(mode).is_identity(1e-6));
            assert_angles_eq(EulerAngle::from_matrix3(&Mat3::identity(), mode), EulerAngle::IDENTITY);
        }
    }

    #[test]
    fn test_object_to_inertial_matches_axis_rotations() {
        let e = EulerAngle::new(0.6, -0.4, 1.1);
        let expected = Mat4::rotation_z(e.bank) * Mat4::rotation_x(e.pitch) * Mat4::rotation_y(e.heading);
        assert_abs_diff_eq!(
            e.to_matrix4(EulerAngleMode::ObjectToInertial),
            expected,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_modes_are_transposes() {
        let e = EulerAngle::new(-2.0, 0.5, 0.25);
        assert_eq!(
            e.to_matrix3(EulerAngleMode::InertialToObject),
            e.to_matrix3(EulerAngleMode::ObjectToInertial).transposed()
        );
    }

    #[test]
    fn test_heading_alone() {
        // A positive heading turns the forward axis toward +X
        let e = EulerAngle::new(constants::HALF_PI, 0.0, 0.0);
        let m = e.to_matrix4(EulerAngleMode::ObjectToInertial);
        assert_abs_diff_eq!(
            m.transform_direction(Vec3::new(0.0, 0.0, 1.0)),
            Vec3::new(1.0, 0.0, 0.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_round_trip_both_modes() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            let e = EulerAngle::new(
                rng.gen_range(-3.1..3.1),
                rng.gen_range(-1.5..1.5),
                rng.gen_range(-3.1..3.1),
            );
            for mode in MODES {
                assert_angles_eq(EulerAngle::from_matrix3(&e.to_matrix3(mode), mode), e);
                assert_angles_eq(EulerAngle::from_matrix4(&e.to_matrix4(mode), mode), e);
            }
        }
    }

    #[test]
    fn test_gimbal_lock_folds_bank_into_heading() {
        for mode in MODES {
            let up = EulerAngle::new(0.7, constants::HALF_PI, 0.2);
            let extracted = EulerAngle::from_matrix3(&up.to_matrix3(mode), mode);
            assert_angles_eq(extracted, EulerAngle::new(0.5, constants::HALF_PI, 0.0));

            let down = EulerAngle::new(0.7, -constants::HALF_PI, 0.2);
            let extracted = EulerAngle::from_matrix3(&down.to_matrix3(mode), mode);
            assert_angles_eq(extracted, EulerAngle::new(0.9, -constants::HALF_PI, 0.0));

            // The folded angles describe the same orientation
            assert_abs_diff_eq!(extracted.to_matrix3(mode), down.to_matrix3(mode), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_canonized_ranges() {
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let e = EulerAngle::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
            );
            let c = e.canonized();

            assert!(c.heading > -constants::PI && c.heading <= constants::PI);
            assert!(c.bank > -constants::PI && c.bank <= constants::PI);
            assert!(c.pitch.abs() <= constants::HALF_PI + 1e-6);
            // Folding drops the bank, which still tilts the frame slightly
            // anywhere in the locked band short of the pole
            let epsilon = if is_gimbal_locked(c.pitch.sin()) { 2e-2 } else { 1e-3 };
            assert_abs_diff_eq!(
                c.to_matrix3(EulerAngleMode::ObjectToInertial),
                e.to_matrix3(EulerAngleMode::ObjectToInertial),
                epsilon = epsilon
            );
        }
    }

    #[test]
    fn test_extraction_and_canonized_agree_near_the_pole() {
        let margin = GIMBAL_LOCK_THRESHOLD.acos();
        for offset in [0.2, 0.5, 0.9] {
            // Inside the locked band: bank folds into heading, pitch is kept
            for sign in [1.0_f32, -1.0] {
                let pitch = sign * (constants::HALF_PI - margin * offset);
                let e = EulerAngle::new(0.7, pitch, 0.3);
                let canonical = e.canonized();
                assert_eq!(canonical.bank, 0.0);
                for mode in MODES {
                    let extracted = EulerAngle::from_matrix3(&e.to_matrix3(mode), mode);
                    assert_abs_diff_eq!(extracted.pitch, pitch, epsilon = 1e-4);
                    assert_abs_diff_eq!(extracted.heading, canonical.heading, epsilon = 1e-3);
                    assert_eq!(extracted.bank, 0.0);
                }
            }
        }

        // Just outside the band the full triple survives both paths
        let e = EulerAngle::new(0.7, constants::HALF_PI - margin * 1.5, 0.3);
        assert_angles_eq(e.canonized(), e);
        for mode in MODES {
            let extracted = EulerAngle::from_matrix3(&e.to_matrix3(mode), mode);
            assert_abs_diff_eq!(extracted.heading, e.heading, epsilon = 1e-3);
            assert_abs_diff_eq!(extracted.pitch, e.pitch, epsilon = 1e-3);
            assert_abs_diff_eq!(extracted.bank, e.bank, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_canonized_flips_large_pitch() {
        let e = EulerAngle::new(0.0, constants::PI * 0.75, 0.0).canonized();
        assert_angles_eq(e, EulerAngle::new(constants::PI, constants::PI * 0.25, constants::PI));
    }
}
