//! Planes and bounding primitives
//!
//! Plain data consumed by the culling layer.

pub mod plane;
pub mod primitives;

pub use plane::Plane;
pub use primitives::{Circle, Cylinder, Ellipse, Ellipsoid, Primitive, Sphere};
