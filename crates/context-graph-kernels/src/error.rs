//! Error types for the numeric kernels.
//!
//! Only two conditions are surfaced from the kernels themselves:
//! mismatched buffer lengths and a zero-width min-max input range.
//! Zero magnitude and zero variance are numeric policies, not errors.

use thiserror::Error;

/// Errors from kernel invocation or kernel configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum KernelError {
    /// Two buffers that must have the same length do not.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length of the first operand
        expected: usize,
        /// Length of the second operand
        actual: usize,
    },

    /// Min-max input range has zero width.
    #[error("Degenerate range: input range [{min}, {max}] has zero width")]
    DegenerateRange {
        /// Lower bound of the input range
        min: f32,
        /// Upper bound of the input range
        max: f32,
    },

    /// Configuration could not be read, parsed or validated.
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Result alias for kernel operations.
pub type KernelResult<T> = Result<T, KernelError>;

/// Fail with `DimensionMismatch` unless both lengths agree.
#[inline]
pub(crate) fn ensure_same_len(expected: usize, actual: usize) -> KernelResult<()> {
    if expected != actual {
        return Err(KernelError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = KernelError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "Dimension mismatch: expected 3, got 2");
        println!("[PASS] DimensionMismatch display = {}", err);
    }

    #[test]
    fn test_degenerate_range_display() {
        let err = KernelError::DegenerateRange { min: 1.0, max: 1.0 };
        assert!(err.to_string().contains("zero width"));
        println!("[PASS] DegenerateRange display = {}", err);
    }

    #[test]
    fn test_ensure_same_len() {
        assert!(ensure_same_len(4, 4).is_ok());
        assert_eq!(
            ensure_same_len(4, 5),
            Err(KernelError::DimensionMismatch {
                expected: 4,
                actual: 5
            })
        );
    }
}
