//! Six-plane view frustum

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::bounding::BoundingVolume;
use crate::error::MathError;
use crate::geometry::{Plane, Primitive};
use crate::math::{Mat4, Vec3};

bitflags! {
    /// Selects which frustum planes a visibility test checks
    ///
    /// Skipping planes is useful when the caller already knows a shape is
    /// within some of them, e.g. everything in front of the camera.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct PlaneMask: u32 {
        /// Left plane
        const LEFT = 1 << 0;
        /// Right plane
        const RIGHT = 1 << 1;
        /// Top plane
        const TOP = 1 << 2;
        /// Bottom plane
        const BOTTOM = 1 << 3;
        /// Near plane
        const FRONT = 1 << 4;
        /// Far plane
        const BACK = 1 << 5;
        /// The four side planes
        const SIDES = Self::LEFT.bits() | Self::RIGHT.bits() | Self::TOP.bits() | Self::BOTTOM.bits();
        /// All six planes
        const ALL = Self::SIDES.bits() | Self::FRONT.bits() | Self::BACK.bits();
    }
}

impl Default for PlaneMask {
    fn default() -> Self {
        Self::ALL
    }
}

/// View frustum for culling
///
/// Plane normals point into the frustum. The planes are fixed at
/// construction; rebuild the frustum when the camera moves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewFrustum {
    front: Plane,
    back: Plane,
    left: Plane,
    right: Plane,
    top: Plane,
    bottom: Plane,
}

impl ViewFrustum {
    /// Create a frustum from six inward-facing planes
    pub const fn new(front: Plane, back: Plane, left: Plane, right: Plane, top: Plane, bottom: Plane) -> Self {
        Self {
            front,
            back,
            left,
            right,
            top,
            bottom,
        }
    }

    /// Extract the planes of a combined view-projection matrix
    ///
    /// Expects the row-vector convention with clip-space depth in `[0, w]`,
    /// as produced by [`crate::math::Mat4Ext::perspective_fov_lh`]. Pass a
    /// bare projection matrix to get the frustum in view space.
    pub fn from_view_projection(view_projection: &Mat4) -> Result<Self, MathError> {
        let x = view_projection.col(0);
        let y = view_projection.col(1);
        let z = view_projection.col(2);
        let w = view_projection.col(3);

        let frustum = Self {
            front: Plane::from_coefficients(z)?,
            back: Plane::from_coefficients(w - z)?,
            left: Plane::from_coefficients(w + x)?,
            right: Plane::from_coefficients(w - x)?,
            top: Plane::from_coefficients(w - y)?,
            bottom: Plane::from_coefficients(w + y)?,
        };
        log::debug!("Built view frustum from view-projection matrix: {frustum:?}");
        Ok(frustum)
    }

    /// Near plane
    pub const fn front(&self) -> &Plane {
        &self.front
    }

    /// Far plane
    pub const fn back(&self) -> &Plane {
        &self.back
    }

    /// Left plane
    pub const fn left(&self) -> &Plane {
        &self.left
    }

    /// Right plane
    pub const fn right(&self) -> &Plane {
        &self.right
    }

    /// Top plane
    pub const fn top(&self) -> &Plane {
        &self.top
    }

    /// Bottom plane
    pub const fn bottom(&self) -> &Plane {
        &self.bottom
    }

    /// The plane named by a single-flag mask, `None` for any other mask
    pub fn plane(&self, which: PlaneMask) -> Option<&Plane> {
        self.planes().find(|(flag, _)| *flag == which).map(|(_, plane)| plane)
    }

    /// All planes with their flags: left, right, top, bottom, front, back
    pub fn planes(&self) -> impl Iterator<Item = (PlaneMask, &Plane)> + '_ {
        [
            (PlaneMask::LEFT, &self.left),
            (PlaneMask::RIGHT, &self.right),
            (PlaneMask::TOP, &self.top),
            (PlaneMask::BOTTOM, &self.bottom),
            (PlaneMask::FRONT, &self.front),
            (PlaneMask::BACK, &self.back),
        ]
        .into_iter()
    }

    /// Test a shape against the planes selected by `mask`
    ///
    /// The shape is rejected when its center is further than its effective
    /// radius behind any selected plane. Exactly touching a plane is visible.
    pub fn visible<V: BoundingVolume + ?Sized>(&self, volume: &V, mask: PlaneMask) -> bool {
        let center = volume.center();
        for (flag, plane) in self.planes() {
            if !mask.contains(flag) {
                continue;
            }
            let distance = plane.signed_distance(center);
            let radius = volume.effective_radius(plane.normal());
            if distance < -radius {
                log::trace!("Culled by {flag:?}: distance {distance} < -{radius}");
                return false;
            }
        }
        true
    }

    /// Test any primitive
    ///
    /// Cylinders have no plane test yet and return
    /// [`MathError::NotImplemented`].
    pub fn visible_primitive(&self, primitive: &Primitive, mask: PlaneMask) -> Result<bool, MathError> {
        match primitive {
            Primitive::Sphere(sphere) => Ok(self.visible(sphere, mask)),
            Primitive::Circle(circle) => Ok(self.visible(circle, mask)),
            Primitive::Ellipse(ellipse) => Ok(self.visible(ellipse, mask)),
            Primitive::Ellipsoid(ellipsoid) => Ok(self.visible(ellipsoid, mask)),
            Primitive::Cylinder(cylinder) => {
                log::error!("Visibility test requested for cylinder at {:?}", cylinder.center);
                Err(MathError::NotImplemented("cylinder visibility"))
            }
        }
    }

    /// Whether a point is on the inner side of (or on) every selected plane
    pub fn contains_point(&self, point: Vec3, mask: PlaneMask) -> bool {
        self.planes()
            .filter(|(flag, _)| mask.contains(*flag))
            .all(|(_, plane)| plane.is_point_inside(point))
    }

    /// Keep only the visible shapes
    pub fn cull<'a, V, I>(&self, volumes: I, mask: PlaneMask) -> impl Iterator<Item = &'a V> + 'a
    where
        V: BoundingVolume + 'a,
        I: IntoIterator<Item = &'a V>,
        I::IntoIter: 'a,
    {
        let frustum = *self;
        volumes.into_iter().filter(move |volume| frustum.visible(*volume, mask))
    }
}
