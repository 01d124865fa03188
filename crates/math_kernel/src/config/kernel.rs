//! Kernel settings: tolerances, culling and projection

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::culling::{PlaneMask, ViewFrustum};
use crate::error::MathError;
use crate::foundation::numeric::{self, constants};
use crate::math::{Mat4, Mat4Ext};

/// Tolerances and seeds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumericConfig {
    /// Absolute tolerance for float comparisons
    pub epsilon: f32,
    /// Seed for reproducible random sampling
    pub seed: u64,
}

impl NumericConfig {
    /// Set the comparison tolerance
    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Compare two floats with the configured tolerance
    pub fn approx_eq(&self, a: f32, b: f32) -> bool {
        numeric::approx_eq_eps(a, b, self.epsilon)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "epsilon must be a finite non-negative number, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}

impl Default for NumericConfig {
    fn default() -> Self {
        Self {
            epsilon: constants::EPSILON,
            seed: 0,
        }
    }
}

/// Which frustum planes to test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Turn culling off to treat everything as visible
    pub enabled: bool,
    /// Planes checked by each visibility test
    pub mask: PlaneMask,
}

impl CullingConfig {
    /// Enable or disable culling
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set the plane mask
    pub fn with_mask(mut self, mask: PlaneMask) -> Self {
        self.mask = mask;
        self
    }

    /// Plane mask to use for a test; empty when culling is disabled
    pub fn effective_mask(&self) -> PlaneMask {
        if self.enabled {
            self.mask
        } else {
            PlaneMask::empty()
        }
    }
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            mask: PlaneMask::ALL,
        }
    }
}

/// Perspective projection parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Vertical field of view in degrees
    pub fov_y_degrees: f32,
    /// Width over height
    pub aspect_ratio: f32,
    /// Near clip distance
    pub near: f32,
    /// Far clip distance
    pub far: f32,
}

impl ProjectionConfig {
    /// Set the vertical field of view in degrees
    pub fn with_fov_degrees(mut self, fov_y_degrees: f32) -> Self {
        self.fov_y_degrees = fov_y_degrees;
        self
    }

    /// Set the aspect ratio
    pub fn with_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the near and far clip distances
    pub fn with_clip_planes(mut self, near: f32, far: f32) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Left-handed perspective matrix for these parameters
    pub fn projection_matrix(&self) -> Result<Mat4, MathError> {
        Mat4::perspective_fov_lh(
            numeric::deg_to_rad(self.fov_y_degrees),
            self.aspect_ratio,
            self.near,
            self.far,
        )
    }

    /// World-space frustum seen through `view`
    pub fn build_frustum(&self, view: &Mat4) -> Result<ViewFrustum, MathError> {
        let projection = self.projection_matrix()?;
        ViewFrustum::from_view_projection(&(*view * projection))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.projection_matrix()
            .map(|_| ())
            .map_err(|e| ConfigError::Invalid(format!("projection: {e}")))
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            aspect_ratio: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// All kernel settings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    /// Tolerances and seeds
    pub numeric: NumericConfig,
    /// Culling switches
    pub culling: CullingConfig,
    /// Camera projection
    pub projection: ProjectionConfig,
}

impl KernelConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the numeric settings
    pub fn with_numeric(mut self, numeric: NumericConfig) -> Self {
        self.numeric = numeric;
        self
    }

    /// Replace the culling settings
    pub fn with_culling(mut self, culling: CullingConfig) -> Self {
        self.culling = culling;
        self
    }

    /// Replace the projection settings
    pub fn with_projection(mut self, projection: ProjectionConfig) -> Self {
        self.projection = projection;
        self
    }
}

impl Config for KernelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.numeric.validate()?;
        self.projection.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults_are_valid() {
        let config = KernelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.culling.effective_mask(), PlaneMask::ALL);
        assert_relative_eq!(config.numeric.epsilon, constants::EPSILON);
    }

    #[test]
    fn test_builders() {
        let config = KernelConfig::new()
            .with_numeric(NumericConfig::default().with_epsilon(1e-3).with_seed(9))
            .with_culling(CullingConfig::default().with_mask(PlaneMask::SIDES))
            .with_projection(
                ProjectionConfig::default()
                    .with_fov_degrees(90.0)
                    .with_aspect_ratio(1.0)
                    .with_clip_planes(1.0, 10.0),
            );

        assert_eq!(config.numeric.seed, 9);
        assert!(config.numeric.approx_eq(1.0, 1.0005));
        assert_eq!(config.culling.mask, PlaneMask::SIDES);
        assert_relative_eq!(config.projection.far, 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_disabled_culling_uses_empty_mask() {
        let culling = CullingConfig::default().with_enabled(false);
        assert_eq!(culling.effective_mask(), PlaneMask::empty());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_clip = KernelConfig::new().with_projection(ProjectionConfig::default().with_clip_planes(5.0, 1.0));
        assert!(matches!(bad_clip.validate(), Err(ConfigError::Invalid(_))));

        let bad_fov = KernelConfig::new().with_projection(ProjectionConfig::default().with_fov_degrees(200.0));
        assert!(matches!(bad_fov.validate(), Err(ConfigError::Invalid(_))));

        let bad_epsilon = KernelConfig::new().with_numeric(NumericConfig::default().with_epsilon(-1.0));
        assert!(matches!(bad_epsilon.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_nan_aspect_ratio_is_rejected() {
        let config = KernelConfig::new().with_projection(ProjectionConfig::default().with_aspect_ratio(f32::NAN));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(config.projection.build_frustum(&Mat4::identity()).is_err());

        let from_file: KernelConfig = toml::from_str("[projection]\naspect_ratio = nan\n").unwrap();
        assert!(from_file.projection.aspect_ratio.is_nan());
        assert!(matches!(from_file.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_build_frustum() {
        let projection = ProjectionConfig::default()
            .with_fov_degrees(90.0)
            .with_aspect_ratio(1.0)
            .with_clip_planes(1.0, 100.0);
        let view = Mat4::translation(Vec3::new(0.0, 0.0, 5.0));
        let frustum = projection.build_frustum(&view).unwrap();

        // The view shifts the world 5 units further away from the eye
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 0.0), PlaneMask::ALL));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -4.5), PlaneMask::ALL));
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, 94.0), PlaneMask::ALL));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 96.0), PlaneMask::ALL));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: KernelConfig = toml::from_str(
            r#"
            [projection]
            fov_y_degrees = 75.0
            "#,
        )
        .unwrap();

        assert_relative_eq!(config.projection.fov_y_degrees, 75.0);
        assert_relative_eq!(config.projection.near, ProjectionConfig::default().near);
        assert_eq!(config.culling, CullingConfig::default());
    }
}
