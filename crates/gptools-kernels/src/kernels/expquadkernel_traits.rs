//! # ExpQuadKernel - Trait Implementations
//!
//! - `Covariance`

use std::f64::consts::PI;

use gptools_backend::{expand_rfft, ops, Scalar};
use scirs2_core::ndarray::{Array1, ArrayD, Axis, IxDyn};

use crate::distance::evaluate_residuals;
use crate::error::{KernelError, Result};
use crate::period::Period;
use crate::theta::{jtheta, jtheta_rfft};
use crate::types::{require_grid_shape, Covariance};

use super::types::{ExpQuadKernel, HeatSeries};

impl ExpQuadKernel {
    fn evaluate_euclidean<T: Scalar>(
        &self,
        x: &ArrayD<T>,
        y: Option<&ArrayD<T>>,
    ) -> Result<ArrayD<T>> {
        let residuals = evaluate_residuals(x, y, None)?;
        let last = Axis(residuals.ndim() - 1);
        let inv_length = T::from_f64(1.0 / self.length_scale);
        let half = T::from_f64(0.5);
        let variance = T::from_f64(self.sigma * self.sigma);
        let exponent = residuals.fold_axis(last, T::zero(), |&acc, &r| {
            let scaled = r * inv_length;
            acc + scaled * scaled
        });
        Ok(exponent.mapv(|e| variance * (-(half * e)).exp()))
    }

    fn evaluate_heat<T: Scalar>(
        &self,
        x: &ArrayD<T>,
        y: Option<&ArrayD<T>>,
        period: &Period,
        heat: &HeatSeries,
    ) -> Result<ArrayD<T>> {
        let residuals = evaluate_residuals(x, y, Some(period))?;
        let z = ops::broadcast_zip(&residuals.view(), &period.to_array::<T>().view(), |r, p| {
            r / p
        })?;
        let nome = time_array::<T>(heat, |t| (-t).exp());
        let scale = time_array::<T>(heat, |t| (t / PI).sqrt());

        let theta = jtheta(&z, &nome, Some(heat.num_terms), self.theta.max_batch_size)?;
        let value = ops::broadcast_zip(&theta.view(), &scale.view(), |v, s| v * s)?;
        let last = Axis(value.ndim() - 1);
        let variance = T::from_f64(self.sigma * self.sigma);
        Ok(value
            .fold_axis(last, T::one(), |&acc, &v| acc * v)
            .mapv(|v| variance * v))
    }
}

/// Per-dimension function of the relaxation time as a one-dimensional array.
fn time_array<T: Scalar>(heat: &HeatSeries, f: impl Fn(f64) -> f64) -> ArrayD<T> {
    ArrayD::from_shape_fn(IxDyn(&[heat.time.len()]), |idx| {
        T::from_f64(f(heat.time[idx[0]]))
    })
}

impl Covariance for ExpQuadKernel {
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        match (&self.period, &self.heat) {
            (Some(period), Some(heat)) => self.evaluate_heat(x, y, period, heat),
            _ => self.evaluate_euclidean(x, y),
        }
    }

    fn evaluate_rfft<T: Scalar>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        let (period, heat) = match (&self.period, &self.heat) {
            (Some(period), Some(heat)) => (period, heat),
            _ => {
                return Err(KernelError::unsupported(
                    "evaluate_rfft",
                    self.name(),
                    "kernel must be periodic",
                ))
            }
        };
        require_grid_shape(shape)?;
        let ndim = shape.len();
        period.broadcast_to(ndim)?;

        // Spectra of the separable factors, full length for leading axes and
        // half length for the trailing axis.
        let mut parts: Vec<Array1<T>> = Vec::with_capacity(ndim);
        for (axis, &size) in shape.iter().enumerate() {
            let time = if heat.time.len() == 1 {
                heat.time[0]
            } else {
                heat.time[axis]
            };
            let coeffs = jtheta_rfft(size, T::from_f64((-time).exp()), Some(heat.num_terms));
            let scale = T::from_f64((time / PI).sqrt());
            let part = coeffs.mapv(|c| c * scale);
            if axis + 1 < ndim {
                parts.push(expand_rfft(&part.view(), size)?);
            } else {
                parts.push(part);
            }
        }
        log::trace!("ExpQuad rfft on grid {:?}", shape);

        let variance = T::from_f64(self.sigma * self.sigma);
        let mut out_shape = shape.to_vec();
        out_shape[ndim - 1] = parts[ndim - 1].len();
        Ok(ArrayD::from_shape_fn(IxDyn(&out_shape), |idx| {
            parts
                .iter()
                .enumerate()
                .fold(variance, |acc, (axis, part)| acc * part[idx[axis]])
        }))
    }

    fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    fn name(&self) -> &str {
        "ExpQuad"
    }
}
