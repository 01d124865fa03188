//! View-frustum culling
//!
//! A [`ViewFrustum`] keeps six inward-facing planes. A shape is culled as
//! soon as it lies entirely on the negative side of one plane selected by the
//! [`PlaneMask`]; touching a plane still counts as visible.

pub mod bounding;
pub mod frustum;

pub use bounding::BoundingVolume;
pub use frustum::{PlaneMask, ViewFrustum};
