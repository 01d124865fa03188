//! Scalar helpers and constants
//!
//! Angle conversion, tolerance comparisons, clamping and random sampling used
//! across the vector, matrix and culling code.

use rand::distributions::uniform::SampleUniform;
use rand::Rng;

use crate::math::Vec3;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 4
    pub const QUARTER_PI: f32 = PI * 0.25;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;

    /// Default tolerance for float comparisons
    pub const EPSILON: f32 = 1e-6;
}

/// Convert degrees to radians
#[must_use]
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * constants::DEG_TO_RAD
}

/// Convert radians to degrees
#[must_use]
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * constants::RAD_TO_DEG
}

/// Compare two floats using [`constants::EPSILON`]
#[must_use]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, constants::EPSILON)
}

/// Compare two floats with an explicit absolute tolerance
#[must_use]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() <= epsilon
}

/// Whether a float is within [`constants::EPSILON`] of zero
#[must_use]
pub fn is_zero(value: f32) -> bool {
    value.abs() <= constants::EPSILON
}

/// Clamp a value between min and max
///
/// Works for any partially ordered type. `min` must not exceed `max`.
pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    debug_assert!(min <= max, "clamp called with min > max");
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Wrap an angle into `(-π, π]`
#[must_use]
pub fn wrap_pi(radians: f32) -> f32 {
    let wrapped = radians - constants::TAU * ((radians + constants::PI) / constants::TAU).floor();
    if wrapped <= -constants::PI {
        wrapped + constants::TAU
    } else {
        wrapped
    }
}

/// Linear interpolation
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample uniformly from `[min, max)`
///
/// Returns `min` when the range is empty instead of panicking like
/// `Rng::gen_range` would.
pub fn random_in_range<T, R>(rng: &mut R, min: T, max: T) -> T
where
    T: SampleUniform + PartialOrd + Copy,
    R: Rng + ?Sized,
{
    if min < max {
        rng.gen_range(min..max)
    } else {
        min
    }
}

/// Sample a direction uniformly on the unit sphere
pub fn random_unit_vector<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    // Rejection sampling inside the unit ball keeps the distribution uniform.
    loop {
        let candidate = Vec3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        );
        let length_squared = candidate.length_squared();
        if length_squared > 1e-4 && length_squared <= 1.0 {
            return candidate / length_squared.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_angle_conversion() {
        assert_relative_eq!(deg_to_rad(180.0), constants::PI);
        assert_relative_eq!(rad_to_deg(constants::HALF_PI), 90.0);
        assert_relative_eq!(rad_to_deg(deg_to_rad(37.5)), 37.5, epsilon = 1e-4);
    }

    #[test]
    fn test_approx_eq() {
        assert!(approx_eq(1.0, 1.0 + 1e-7));
        assert!(!approx_eq(1.0, 1.001));
        assert!(approx_eq_eps(1.0, 1.001, 0.01));
        assert!(is_zero(-1e-8));
        assert!(!is_zero(1e-3));
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5, 0, 3), 3);
        assert_eq!(clamp(-1, 0, 3), 0);
        assert_relative_eq!(clamp(0.5_f32, 0.0, 1.0), 0.5);
    }

    #[test]
    fn test_wrap_pi() {
        assert_relative_eq!(wrap_pi(0.5), 0.5);
        assert_relative_eq!(wrap_pi(constants::PI), constants::PI);
        assert_relative_eq!(wrap_pi(-constants::PI), constants::PI);
        assert_relative_eq!(wrap_pi(constants::TAU + 0.25), 0.25, epsilon = 1e-5);
        assert_relative_eq!(wrap_pi(-constants::TAU - 0.25), -0.25, epsilon = 1e-5);
    }

    #[test]
    fn test_lerp() {
        assert_relative_eq!(lerp(2.0, 4.0, 0.0), 2.0);
        assert_relative_eq!(lerp(2.0, 4.0, 0.5), 3.0);
        assert_relative_eq!(lerp(2.0, 4.0, 1.0), 4.0);
    }

    #[test]
    fn test_random_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let value = random_in_range(&mut rng, -2.5_f32, 4.0);
            assert!((-2.5..4.0).contains(&value));
        }

        // Empty range collapses to the lower bound
        assert_eq!(random_in_range(&mut rng, 3, 3), 3);
    }

    #[test]
    fn test_random_unit_vector() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let v = random_unit_vector(&mut rng);
            assert_relative_eq!(v.length(), 1.0, epsilon = 1e-5);
        }
    }
}
