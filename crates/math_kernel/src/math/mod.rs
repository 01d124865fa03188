//! Vector, matrix and rotation types

pub mod euler;
pub mod matrix;
pub mod quaternion;
pub mod transform;
pub mod vector;

pub use euler::{EulerAngle, EulerAngleMode};
pub use matrix::{Mat3, Mat4, Matrix};
pub use quaternion::Quaternion;
pub use transform::Mat4Ext;
pub use vector::{Vec2, Vec3, Vec4, Vector};
