//! # MaternKernel - Trait Implementations
//!
//! This module contains trait implementations for `MaternKernel`.
//!
//! ## Implemented Traits
//!
//! - `Covariance`

use std::f64::consts::PI;

use gptools_backend::{coordgrid, BackendError, Scalar};
use scirs2_core::ndarray::{Array1, ArrayD, Axis, IxDyn};

use crate::distance::evaluate_residuals;
use crate::error::{KernelError, Result};
use crate::period::Period;
use crate::special::half_integer_gamma;
use crate::types::{require_grid_shape, Covariance};

use super::types::{MaternDof, MaternKernel};

impl Covariance for MaternKernel {
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        if self.period.is_some() {
            return Err(KernelError::unsupported(
                "evaluate",
                self.name(),
                "periodic Matérn covariance has no closed form; use evaluate_rfft",
            ));
        }
        let residuals = evaluate_residuals(x, y, None)?;
        let last = Axis(residuals.ndim() - 1);
        let inv_length = T::from_f64(1.0 / self.length_scale);
        let two_dof = T::from_f64(2.0 * self.dof.value());
        let squared = residuals.fold_axis(last, T::zero(), |&acc, &r| {
            let scaled = r * inv_length;
            acc + two_dof * scaled * scaled
        });

        let variance = T::from_f64(self.sigma * self.sigma);
        let third = T::from_f64(1.0 / 3.0);
        let dof = self.dof;
        Ok(squared.mapv(|s| {
            let d = s.sqrt();
            let value = match dof {
                MaternDof::ThreeHalves => T::one() + d,
                MaternDof::FiveHalves => T::one() + d + d * d * third,
            };
            variance * value * (-d).exp()
        }))
    }

    fn evaluate_rfft<T: Scalar>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        let period = self.period.as_ref().ok_or_else(|| {
            KernelError::unsupported("evaluate_rfft", self.name(), "kernel must be periodic")
        })?;
        require_grid_shape(shape)?;
        let ndim = shape.len();
        let length_scale: Vec<f64> = period
            .broadcast_to(ndim)?
            .iter()
            .map(|p| self.length_scale / p)
            .collect();

        let tail = shape[ndim - 1];
        let axes: Vec<Array1<usize>> = shape
            .iter()
            .enumerate()
            .map(|(axis, &n)| {
                let len = if axis + 1 < ndim { n } else { tail / 2 + 1 };
                Array1::from_shape_fn(len, |k| k)
            })
            .collect();
        let frequencies = coordgrid(&axes)?;

        let dof = self.dof.value();
        let half_ndim = ndim as f64 / 2.0;
        let size: usize = shape.iter().product();
        let prefactor = size as f64
            * 2f64.powi(ndim as i32)
            * (PI / (2.0 * dof)).powf(half_ndim)
            * half_integer_gamma(dof + half_ndim)?
            / half_integer_gamma(dof)?
            * length_scale.iter().product::<f64>()
            * self.sigma
            * self.sigma;

        let values: Vec<T> = frequencies
            .rows()
            .into_iter()
            .map(|ks| {
                let norm: f64 = ks
                    .iter()
                    .zip(shape)
                    .zip(&length_scale)
                    .map(|((&k, &n), &ell)| {
                        // Alias negative frequencies onto their magnitude.
                        let k = k.min(n - k) as f64;
                        (PI * ell * k).powi(2)
                    })
                    .sum();
                let arg = 1.0 + 2.0 / dof * norm;
                T::from_f64(prefactor * arg.powf(-(dof + half_ndim)))
            })
            .collect();

        let mut out_shape = shape.to_vec();
        out_shape[ndim - 1] = tail / 2 + 1;
        log::trace!("Matérn rfft on grid {:?}", shape);
        ArrayD::from_shape_vec(IxDyn(&out_shape), values).map_err(|err| {
            KernelError::Backend(BackendError::InvalidOperation(format!(
                "Matérn rfft: {}",
                err
            )))
        })
    }

    fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    fn name(&self) -> &str {
        "Matérn"
    }
}
