//! Periods of circular boundary conditions.

use gptools_backend::{ops, Scalar};
use scirs2_core::ndarray::{ArrayD, IxDyn};

use crate::error::{KernelError, Result};

/// Positive period of each embedding dimension.
///
/// A period holds either a single length shared by every dimension or one
/// length per dimension. Constructors return `Ok(None)` when every value is
/// exactly zero: a zero period is the "no periodicity" sentinel, so kernels
/// built from it take the Euclidean code path.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    values: Vec<f64>,
}

impl Period {
    /// Create a period from per-dimension lengths.
    ///
    /// # Examples
    /// ```
    /// use gptools_kernels::Period;
    ///
    /// let period = Period::new(vec![2.0, 3.0]).unwrap().unwrap();
    /// assert_eq!(period.values(), &[2.0, 3.0]);
    /// assert!(Period::new(vec![0.0]).unwrap().is_none());
    /// assert!(Period::new(vec![-1.0]).is_err());
    /// ```
    pub fn new(values: Vec<f64>) -> Result<Option<Self>> {
        if values.is_empty() {
            return Err(KernelError::invalid_parameter(
                "period",
                "[]",
                "period must have at least one value",
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(KernelError::invalid_parameter(
                "period",
                bad,
                "period must be finite and non-negative",
            ));
        }
        if values.iter().all(|&v| v == 0.0) {
            return Ok(None);
        }
        if values.iter().any(|&v| v == 0.0) {
            return Err(KernelError::invalid_parameter(
                "period",
                format!("{:?}", values),
                "either all or none of the dimensions may have zero period",
            ));
        }
        Ok(Some(Self { values }))
    }

    /// Create a period shared by every dimension.
    pub fn uniform(value: f64) -> Result<Option<Self>> {
        Self::new(vec![value])
    }

    /// Raw period values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of stored values (one, or one per dimension).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; a period holds at least one value.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Period of each of `ndim` dimensions.
    pub fn broadcast_to(&self, ndim: usize) -> Result<Vec<f64>> {
        match self.values.len() {
            1 => Ok(vec![self.values[0]; ndim]),
            n if n == ndim => Ok(self.values.clone()),
            n => Err(KernelError::DimensionMismatch {
                expected: vec![1, ndim],
                got: vec![n],
                context: "period".to_string(),
            }),
        }
    }

    /// Period as a one-dimensional array, broadcastable against the trailing
    /// axis of coordinate arrays.
    pub fn to_array<T: Scalar>(&self) -> ArrayD<T> {
        ArrayD::from_shape_fn(IxDyn(&[self.values.len()]), |idx| {
            T::from_f64(self.values[idx[0]])
        })
    }

    /// Whether two periods agree within the default `allclose` tolerance.
    pub fn is_close(&self, other: &Period) -> bool {
        ops::allclose(
            &self.to_array::<f64>().view(),
            &other.to_array::<f64>().view(),
            ops::DEFAULT_RTOL,
            ops::DEFAULT_ATOL,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_period_is_not_periodic() {
        assert!(Period::uniform(0.0).unwrap().is_none());
        assert!(Period::new(vec![0.0, 0.0]).unwrap().is_none());
    }

    #[test]
    fn test_invalid_periods() {
        assert!(Period::new(vec![]).is_err());
        assert!(Period::new(vec![1.0, -2.0]).is_err());
        assert!(Period::new(vec![f64::NAN]).is_err());
        assert!(Period::new(vec![1.0, 0.0]).is_err());
    }

    #[test]
    fn test_broadcast_to() {
        let uniform = Period::uniform(2.0).unwrap().unwrap();
        assert_eq!(uniform.broadcast_to(3).unwrap(), vec![2.0, 2.0, 2.0]);

        let per_dim = Period::new(vec![1.0, 2.0]).unwrap().unwrap();
        assert_eq!(per_dim.broadcast_to(2).unwrap(), vec![1.0, 2.0]);
        assert!(per_dim.broadcast_to(3).is_err());
    }

    #[test]
    fn test_is_close() {
        let a = Period::uniform(10.0).unwrap().unwrap();
        let b = Period::uniform(10.0 + 1e-9).unwrap().unwrap();
        let c = Period::new(vec![10.0, 10.0]).unwrap().unwrap();
        let d = Period::uniform(11.0).unwrap().unwrap();
        assert!(a.is_close(&b));
        assert!(a.is_close(&c));
        assert!(!a.is_close(&d));
    }

    #[test]
    fn test_to_array() {
        let period = Period::new(vec![1.5, 2.5]).unwrap().unwrap();
        let array = period.to_array::<f32>();
        assert_eq!(array.shape(), &[2]);
        assert_eq!(array[[1]], 2.5);
    }
}
