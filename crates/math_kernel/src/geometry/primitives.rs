//! Bounding primitives for visibility tests
//!
//! Axis vectors are expected to be unit length; their extents are carried
//! separately so a primitive can be rescaled without renormalizing.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl Sphere {
    /// Creates a new bounding sphere with the given center and radius
    pub const fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// A flat disc
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    /// Center of the disc
    pub center: Vec3,
    /// Unit normal of the disc's plane
    pub normal: Vec3,
    /// Radius of the disc
    pub radius: f32,
}

impl Circle {
    /// Create a disc
    pub const fn new(center: Vec3, normal: Vec3, radius: f32) -> Self {
        Self { center, normal, radius }
    }
}

/// A flat ellipse spanned by two perpendicular unit axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center of the ellipse
    pub center: Vec3,
    /// Unit direction of the major axis
    pub long_axis: Vec3,
    /// Semi-major axis length
    pub long_axis_length: f32,
    /// Unit direction of the minor axis
    pub short_axis: Vec3,
    /// Semi-minor axis length
    pub short_axis_length: f32,
}

impl Ellipse {
    /// Create an ellipse
    pub const fn new(
        center: Vec3,
        long_axis: Vec3,
        long_axis_length: f32,
        short_axis: Vec3,
        short_axis_length: f32,
    ) -> Self {
        Self {
            center,
            long_axis,
            long_axis_length,
            short_axis,
            short_axis_length,
        }
    }

    /// Major semi-axis scaled to its length
    pub fn long_extent(&self) -> Vec3 {
        self.long_axis * self.long_axis_length
    }

    /// Minor semi-axis scaled to its length
    pub fn short_extent(&self) -> Vec3 {
        self.short_axis * self.short_axis_length
    }
}

/// A solid ellipsoid with three perpendicular unit axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Center of the ellipsoid
    pub center: Vec3,
    /// Unit axis directions
    pub axes: [Vec3; 3],
    /// Semi-axis lengths, one per axis
    pub lengths: [f32; 3],
}

impl Ellipsoid {
    /// Create an ellipsoid
    pub const fn new(center: Vec3, axes: [Vec3; 3], lengths: [f32; 3]) -> Self {
        Self { center, axes, lengths }
    }

    /// Axis-aligned ellipsoid with the given semi-axis lengths
    pub const fn axis_aligned(center: Vec3, lengths: [f32; 3]) -> Self {
        Self::new(
            center,
            [
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
                Vec3::new(0.0, 0.0, 1.0),
            ],
            lengths,
        )
    }

    /// Semi-axes scaled to their lengths
    pub fn extents(&self) -> [Vec3; 3] {
        std::array::from_fn(|i| self.axes[i] * self.lengths[i])
    }
}

/// A capped cylinder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Center of the cylinder, halfway along the axis
    pub center: Vec3,
    /// Unit axis direction
    pub axis: Vec3,
    /// Radius of the caps
    pub radius: f32,
    /// Full length along the axis
    pub height: f32,
}

impl Cylinder {
    /// Create a cylinder
    pub const fn new(center: Vec3, axis: Vec3, radius: f32, height: f32) -> Self {
        Self {
            center,
            axis,
            radius,
            height,
        }
    }
}

/// Any bounding primitive, for collections of mixed shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    /// A sphere
    Sphere(Sphere),
    /// A disc
    Circle(Circle),
    /// A flat ellipse
    Ellipse(Ellipse),
    /// A solid ellipsoid
    Ellipsoid(Ellipsoid),
    /// A cylinder
    Cylinder(Cylinder),
}

impl Primitive {
    /// Center point of the wrapped shape
    pub const fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(s) => s.center,
            Self::Circle(c) => c.center,
            Self::Ellipse(e) => e.center,
            Self::Ellipsoid(e) => e.center,
            Self::Cylinder(c) => c.center,
        }
    }

    /// Short shape name for log output
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Sphere(_) => "sphere",
            Self::Circle(_) => "circle",
            Self::Ellipse(_) => "ellipse",
            Self::Ellipsoid(_) => "ellipsoid",
            Self::Cylinder(_) => "cylinder",
        }
    }
}

macro_rules! impl_from_shape {
    ($($shape:ident),*) => {
        $(
            impl From<$shape> for Primitive {
                fn from(shape: $shape) -> Self {
                    Self::$shape(shape)
                }
            }
        )*
    };
}

impl_from_shape!(Sphere, Circle, Ellipse, Ellipsoid, Cylinder);
