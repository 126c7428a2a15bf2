//! Core types for kernel operations.

use gptools_backend::Scalar;
use scirs2_core::ndarray::ArrayD;

use crate::error::{KernelError, Result};
use crate::period::Period;

/// Trait for covariance functions of Gaussian processes.
///
/// Kernels map coordinates of shape `(..., n, p)` to covariance matrices of
/// shape `(..., n, n)`. Periodic kernels additionally have a closed-form
/// real FFT on regular grids.
pub trait Covariance: Send + Sync {
    /// Evaluate the covariance kernel.
    ///
    /// # Arguments
    /// * `x` - First set of points with shape `(..., n, p)`
    /// * `y` - Second set of points; if omitted, pairwise covariances of the
    ///   Cartesian product of `x` with itself are evaluated
    ///
    /// # Returns
    /// Covariance between the two sets of points
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>>;

    /// Evaluate the real fast Fourier transform of the kernel.
    ///
    /// # Arguments
    /// * `shape` - Number of sample points in each dimension
    ///
    /// # Returns
    /// Fourier coefficients with shape `(*shape[:-1], shape[-1] / 2 + 1)`
    fn evaluate_rfft<T: Scalar>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        let _ = shape;
        Err(KernelError::unsupported(
            "evaluate_rfft",
            self.name(),
            "kernel has no spectral representation",
        ))
    }

    /// Period of circular boundary conditions, if any.
    fn period(&self) -> Option<&Period>;

    /// Whether the kernel has circular boundary conditions.
    fn is_periodic(&self) -> bool {
        self.period().is_some()
    }

    /// Get kernel name for identification.
    fn name(&self) -> &str;
}

/// Check a strictly positive, finite hyperparameter.
pub(crate) fn require_positive(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(KernelError::invalid_parameter(
            parameter,
            value,
            format!("{} must be positive", parameter),
        ))
    }
}

/// Check a non-negative, finite hyperparameter.
pub(crate) fn require_non_negative(parameter: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(KernelError::invalid_parameter(
            parameter,
            value,
            format!("{} must be non-negative", parameter),
        ))
    }
}

/// Check that a spectral grid has at least one dimension and no empty axis.
pub(crate) fn require_grid_shape(shape: &[usize]) -> Result<()> {
    if shape.is_empty() {
        return Err(KernelError::DimensionMismatch {
            expected: vec![1],
            got: vec![0],
            context: "rfft grid shape must have at least one dimension".to_string(),
        });
    }
    if shape.contains(&0) {
        return Err(KernelError::invalid_parameter(
            "shape",
            format!("{:?}", shape),
            "every grid dimension must have at least one sample",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_positive() {
        assert!(require_positive("length_scale", 0.5).is_ok());
        assert!(require_positive("length_scale", 0.0).is_err());
        assert!(require_positive("length_scale", f64::NAN).is_err());
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative("sigma", 0.0).is_ok());
        assert!(require_non_negative("sigma", -1.0).is_err());
        assert!(require_non_negative("sigma", f64::INFINITY).is_err());
    }

    #[test]
    fn test_require_grid_shape() {
        assert!(require_grid_shape(&[4, 5]).is_ok());
        assert!(require_grid_shape(&[]).is_err());
        assert!(require_grid_shape(&[4, 0]).is_err());
    }
}
