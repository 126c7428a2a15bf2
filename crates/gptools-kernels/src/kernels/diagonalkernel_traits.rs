//! # DiagonalKernel - Trait Implementations
//!
//! - `Covariance`

use gptools_backend::Scalar;
use scirs2_core::ndarray::{ArrayD, IxDyn};

use crate::error::{KernelError, Result};
use crate::period::Period;
use crate::types::Covariance;

use super::types::DiagonalKernel;

impl Covariance for DiagonalKernel {
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        if y.is_some() {
            return Err(KernelError::unsupported(
                "evaluate",
                self.name(),
                "covariance is only defined pairwise for a single set of points",
            ));
        }
        let ndim = x.ndim();
        if ndim < 2 {
            return Err(KernelError::DimensionMismatch {
                expected: vec![2],
                got: vec![ndim],
                context: "Diagonal kernel requires coordinates of shape (..., n, p)".to_string(),
            });
        }

        // (..., n, p) -> (..., n, n)
        let n = x.shape()[ndim - 2];
        let mut shape = x.shape()[..ndim - 1].to_vec();
        shape.push(n);
        let epsilon = T::from_f64(self.epsilon);
        Ok(ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
            if idx[ndim - 2] == idx[ndim - 1] {
                epsilon
            } else {
                T::zero()
            }
        }))
    }

    fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    fn name(&self) -> &str {
        "Diagonal"
    }
}
