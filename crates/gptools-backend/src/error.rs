//! Error types for gptools-backend.
//!
//! Array primitives fail with shape errors (incompatible broadcasting,
//! mismatched spectrum lengths) or with invalid operation parameters.

use std::fmt;
use thiserror::Error;

/// Main error type for backend array operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    /// Shape mismatch between arrays or operations
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(ShapeMismatchError),

    /// Invalid operation or operation parameters
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

/// Detailed shape mismatch error with context
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeMismatchError {
    /// Description of the operation that failed
    pub operation: String,
    /// Expected shape(s)
    pub expected: Vec<Vec<usize>>,
    /// Actual shape(s) that were provided
    pub actual: Vec<Vec<usize>>,
    /// Additional context
    pub context: Option<String>,
}

impl fmt::Display for ShapeMismatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Shape mismatch in {}: expected {:?}, got {:?}",
            self.operation, self.expected, self.actual
        )?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

impl ShapeMismatchError {
    /// Create a new shape mismatch error
    pub fn new(
        operation: impl Into<String>,
        expected: Vec<Vec<usize>>,
        actual: Vec<Vec<usize>>,
    ) -> Self {
        Self {
            operation: operation.into(),
            expected,
            actual,
            context: None,
        }
    }

    /// Add context to the error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl From<ShapeMismatchError> for BackendError {
    fn from(err: ShapeMismatchError) -> Self {
        BackendError::ShapeMismatch(err)
    }
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;
