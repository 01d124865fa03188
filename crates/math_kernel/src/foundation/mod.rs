//! Foundation module - Core utilities shared by the math types
//!
//! This module provides the low-level pieces everything else builds on:
//! - Scalar helpers and constants
//! - Logging utilities
//! - Serde support for const-generic arrays

pub mod logging;
pub mod numeric;
pub mod serde_array;
