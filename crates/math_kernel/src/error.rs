//! Kernel error type

/// Errors surfaced by fallible kernel operations
///
/// Shape mismatches between statically sized types are compile errors; this
/// enum only covers what can go wrong with runtime-sized input or degenerate
/// values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    /// A slice did not hold the number of elements the target type needs
    #[error("Dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Element count required by the target type
        expected: usize,
        /// Element count that was supplied
        actual: usize,
    },

    /// Normalization of a zero-length vector or quaternion
    #[error("Cannot normalize a zero-length value")]
    ZeroLength,

    /// Input that does not describe a usable value (e.g. a singular projection)
    #[error("Degenerate input: {0}")]
    Degenerate(&'static str),

    /// The requested operation has no implementation
    #[error("Not implemented: {0}")]
    NotImplemented(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::DimensionMismatch { expected: 16, actual: 9 };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 16 elements, got 9");

        let err = MathError::NotImplemented("cylinder visibility");
        assert_eq!(err.to_string(), "Not implemented: cylinder visibility");
    }
}
