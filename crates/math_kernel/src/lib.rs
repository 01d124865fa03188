//! # Math Kernel
//!
//! Fixed-size 3D math and view-frustum culling for the engine's render layer.
//!
//! ## Features
//!
//! - **Vectors and Matrices**: const-generic, stack-resident, row-major
//! - **Quaternions**: composition, interpolation, matrix and axis-angle conversion
//! - **Euler Angles**: heading/pitch/bank extraction in both space conventions
//! - **Culling**: six-plane frustum test against spheres, circles, ellipses and ellipsoids
//! - **Configuration**: TOML/RON projection and culling settings
//!
//! ## Conventions
//!
//! Left-handed coordinates and row vectors: a point is transformed as
//! `v * M`, so `v * A * B` applies `A` first.
//!
//! ## Quick Start
//!
//! ```rust
//! use math_kernel::prelude::*;
//!
//! let half = 0.5;
//! let frustum = ViewFrustum::new(
//!     Plane::new(Vec3::new(0.0, 0.0, 1.0), half),
//!     Plane::new(Vec3::new(0.0, 0.0, -1.0), half),
//!     Plane::new(Vec3::new(1.0, 0.0, 0.0), half),
//!     Plane::new(Vec3::new(-1.0, 0.0, 0.0), half),
//!     Plane::new(Vec3::new(0.0, -1.0, 0.0), half),
//!     Plane::new(Vec3::new(0.0, 1.0, 0.0), half),
//! );
//!
//! let sphere = Sphere::new(Vec3::new(0.5, 0.0, 0.0), 0.2);
//! assert!(frustum.visible(&sphere, PlaneMask::ALL));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod culling;
pub mod error;
pub mod foundation;
pub mod geometry;
pub mod interop;
pub mod math;

#[cfg(test)]
mod tests;

pub use error::MathError;

/// Common imports for kernel users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, CullingConfig, KernelConfig, NumericConfig, ProjectionConfig},
        culling::{BoundingVolume, PlaneMask, ViewFrustum},
        error::MathError,
        foundation::numeric::{self, constants},
        geometry::{Circle, Cylinder, Ellipse, Ellipsoid, Plane, Primitive, Sphere},
        math::{
            EulerAngle, EulerAngleMode, Mat3, Mat4, Mat4Ext, Matrix, Quaternion, Vec2, Vec3, Vec4, Vector,
        },
    };
}
