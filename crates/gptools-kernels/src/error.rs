//! Error types for gptools-kernels.

use gptools_backend::BackendError;
use thiserror::Error;

/// Errors that can occur in kernel operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Mismatched dimensions between inputs
    #[error("Dimension mismatch in {context}: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        expected: Vec<usize>,
        got: Vec<usize>,
        context: String,
    },

    /// Invalid kernel parameter
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Incompatible kernels for composition
    #[error("Incompatible kernels '{kernel_a}' and '{kernel_b}': {reason}")]
    IncompatibleKernels {
        kernel_a: String,
        kernel_b: String,
        reason: String,
    },

    /// Operation not supported for this kernel configuration
    #[error("Unsupported operation '{operation}' for {kernel} kernel: {reason}")]
    Unsupported {
        operation: String,
        kernel: String,
        reason: String,
    },

    /// Failure in an array primitive
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
}

impl KernelError {
    pub(crate) fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(
        operation: impl Into<String>,
        kernel: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unsupported {
            operation: operation.into(),
            kernel: kernel.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = KernelError::DimensionMismatch {
            expected: vec![1, 3],
            got: vec![2],
            context: "period".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("1, 3"));
        assert!(msg.contains("[2]"));
        assert!(msg.contains("period"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = KernelError::invalid_parameter("dof", 0.5, "must be one of 1.5 or 2.5");
        let msg = err.to_string();
        assert!(msg.contains("dof"));
        assert!(msg.contains("0.5"));
        assert!(msg.contains("2.5"));
    }

    #[test]
    fn test_unsupported_display() {
        let err = KernelError::unsupported("evaluate_rfft", "Diagonal", "no spectral form");
        assert_eq!(
            err.to_string(),
            "Unsupported operation 'evaluate_rfft' for Diagonal kernel: no spectral form"
        );
    }

    #[test]
    fn test_backend_error_conversion() {
        let err: KernelError = BackendError::InvalidOperation("bad grid".to_string()).into();
        assert!(matches!(err, KernelError::Backend(_)));
    }
}
