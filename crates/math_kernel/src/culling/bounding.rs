//! Per-shape extents used by the plane test

use crate::geometry::{Circle, Ellipse, Ellipsoid, Sphere};
use crate::math::Vec3;

/// A shape that can be tested against a plane by center and projected extent
///
/// `effective_radius` is how far the shape reaches from its center along
/// `normal`, which must be unit length. Cylinders do not implement this
/// trait; see [`crate::culling::ViewFrustum::visible_primitive`].
pub trait BoundingVolume {
    /// Center point of the shape
    fn center(&self) -> Vec3;

    /// Half-extent of the shape projected onto `normal`
    fn effective_radius(&self, normal: Vec3) -> f32;
}

impl BoundingVolume for Sphere {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn effective_radius(&self, _normal: Vec3) -> f32 {
        self.radius
    }
}

impl BoundingVolume for Circle {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn effective_radius(&self, normal: Vec3) -> f32 {
        self.radius * normal.dot(&self.normal).abs()
    }
}

impl BoundingVolume for Ellipse {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn effective_radius(&self, normal: Vec3) -> f32 {
        let long = self.long_extent().dot(&normal);
        let short = self.short_extent().dot(&normal);
        long.hypot(short)
    }
}

impl BoundingVolume for Ellipsoid {
    fn center(&self) -> Vec3 {
        self.center
    }

    fn effective_radius(&self, normal: Vec3) -> f32 {
        self.extents()
            .iter()
            .map(|extent| {
                let projected = extent.dot(&normal);
                projected * projected
            })
            .sum::<f32>()
            .sqrt()
    }
}

impl<V: BoundingVolume + ?Sized> BoundingVolume for &V {
    fn center(&self) -> Vec3 {
        (**self).center()
    }

    fn effective_radius(&self, normal: Vec3) -> f32 {
        (**self).effective_radius(normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    #[test]
    fn test_sphere_radius_ignores_direction() {
        let sphere = Sphere::new(Vec3::zeros(), 2.5);
        assert_relative_eq!(sphere.effective_radius(X), 2.5);
        assert_relative_eq!(sphere.effective_radius(Y), 2.5);
    }

    #[test]
    fn test_circle_radius_follows_normal_alignment() {
        let circle = Circle::new(Vec3::zeros(), Z, 2.0);
        assert_relative_eq!(circle.effective_radius(Z), 2.0);
        assert_relative_eq!(circle.effective_radius(-Z), 2.0);
        assert_relative_eq!(circle.effective_radius(X), 0.0);
    }

    #[test]
    fn test_ellipse_radius() {
        let ellipse = Ellipse::new(Vec3::zeros(), X, 3.0, Y, 1.0);
        assert_relative_eq!(ellipse.effective_radius(X), 3.0);
        assert_relative_eq!(ellipse.effective_radius(Y), 1.0);
        assert_relative_eq!(ellipse.effective_radius(Z), 0.0);

        let diagonal = Vec3::new(1.0, 1.0, 0.0).normalized();
        assert_relative_eq!(ellipse.effective_radius(diagonal), 5.0_f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_ellipsoid_radius() {
        let ellipsoid = Ellipsoid::axis_aligned(Vec3::zeros(), [1.0, 2.0, 3.0]);
        assert_relative_eq!(ellipsoid.effective_radius(X), 1.0);
        assert_relative_eq!(ellipsoid.effective_radius(Y), 2.0);
        assert_relative_eq!(ellipsoid.effective_radius(-Z), 3.0);

        // A sphere-shaped ellipsoid matches the sphere in every direction
        let round = Ellipsoid::axis_aligned(Vec3::zeros(), [1.5, 1.5, 1.5]);
        let direction = Vec3::new(0.3, -0.5, 0.8).normalized();
        assert_relative_eq!(round.effective_radius(direction), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_reference_forwards() {
        let sphere = Sphere::new(Vec3::new(1.0, 2.0, 3.0), 4.0);
        let by_ref = &sphere;
        assert_eq!(BoundingVolume::center(&by_ref), sphere.center);
        assert_relative_eq!(by_ref.effective_radius(X), 4.0);
    }
}
