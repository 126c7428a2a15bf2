//! Residuals and squared distances between points.
//!
//! Coordinates have shape `(..., p)`, where `...` is the batch shape and `p`
//! is the number of dimensions of the embedding space. Without a second set
//! of points, residuals are evaluated for the Cartesian product of the first
//! set with itself, giving shape `(..., n, n, p)`.
//!
//! ## Periodic boundaries
//!
//! With a period `P`, residuals are wrapped into `[-P/2, P/2)` so they keep
//! their local orientation: points to the left of a reference point have a
//! negative residual and points to the right a positive one. The only
//! discontinuity sits a distance `P/2` from the reference point, where the
//! residual jumps from just below `P/2` to exactly `-P/2`. The jump is
//! immaterial for even kernel functions.

use gptools_backend::{ops, Scalar};
use scirs2_core::ndarray::{ArrayD, ArrayViewD, Axis};

use crate::error::{KernelError, Result};
use crate::period::Period;

/// Evaluate the residuals between points respecting periodic boundaries.
///
/// # Arguments
/// * `x` - Coordinates with shape `(..., p)`.
/// * `y` - Coordinates broadcastable to `x`. If omitted, residuals
///   `x[..., i, :] - x[..., j, :]` of the Cartesian product of `x` with
///   itself are evaluated.
/// * `period` - Period of circular boundary conditions.
///
/// # Examples
/// ```
/// use gptools_kernels::{evaluate_residuals, Period};
/// use scirs2_core::ndarray::array;
///
/// let x = array![[0.5f64], [2.5]].into_dyn();
/// let period = Period::uniform(3.0).unwrap();
/// let residuals = evaluate_residuals(&x, None, period.as_ref()).unwrap();
/// assert_eq!(residuals.shape(), &[2, 2, 1]);
/// // 0.5 - 2.5 = -2 wraps around to 1.
/// assert!((residuals[[0, 1, 0]] - 1.0).abs() < 1e-12);
/// ```
pub fn evaluate_residuals<T: Scalar>(
    x: &ArrayD<T>,
    y: Option<&ArrayD<T>>,
    period: Option<&Period>,
) -> Result<ArrayD<T>> {
    let residuals = match y {
        Some(y) => {
            if x.ndim() == 0 || y.ndim() == 0 {
                return Err(KernelError::DimensionMismatch {
                    expected: vec![1],
                    got: vec![x.ndim().min(y.ndim())],
                    context: "coordinates must have a trailing embedding axis".to_string(),
                });
            }
            ops::broadcast_zip(&x.view(), &y.view(), |a, b| a - b)?
        }
        None => {
            let ndim = x.ndim();
            if ndim < 2 {
                return Err(KernelError::DimensionMismatch {
                    expected: vec![2],
                    got: vec![ndim],
                    context: "pairwise residuals require coordinates of shape (..., n, p)"
                        .to_string(),
                });
            }
            // (..., n, 1, p) against (..., 1, n, p).
            let rows = x.view().insert_axis(Axis(ndim - 1));
            let cols = x.view().insert_axis(Axis(ndim - 2));
            ops::broadcast_zip(&rows, &cols, |a, b| a - b)?
        }
    };

    match period {
        Some(period) => wrap_residuals(&residuals.view(), period),
        None => Ok(residuals),
    }
}

/// Wrap residuals into `[-period/2, period/2)` along the trailing axis.
pub fn wrap_residuals<T: Scalar>(
    residuals: &ArrayViewD<'_, T>,
    period: &Period,
) -> Result<ArrayD<T>> {
    let p = embedding_dim(residuals.shape())?;
    period.broadcast_to(p)?;
    let half = T::from_f64(0.5);
    let wrapped = ops::broadcast_zip(residuals, &period.to_array::<T>().view(), |r, length| {
        r - length * (r / length + half).floor()
    })?;
    Ok(wrapped)
}

/// Evaluate the squared distance between points respecting periodic
/// boundaries.
///
/// Same arguments and broadcasting semantics as [`evaluate_residuals`]; the
/// trailing embedding axis is reduced, so the Cartesian-product form has
/// shape `(..., n, n)`.
pub fn evaluate_squared_distance<T: Scalar>(
    x: &ArrayD<T>,
    y: Option<&ArrayD<T>>,
    period: Option<&Period>,
) -> Result<ArrayD<T>> {
    let residuals = evaluate_residuals(x, y, period)?;
    let last = Axis(residuals.ndim() - 1);
    Ok(residuals.fold_axis(last, T::zero(), |&acc, &r| acc + r * r))
}

/// Size of the trailing embedding axis.
pub(crate) fn embedding_dim(shape: &[usize]) -> Result<usize> {
    shape.last().copied().ok_or_else(|| KernelError::DimensionMismatch {
        expected: vec![1],
        got: vec![0],
        context: "coordinates must have a trailing embedding axis".to_string(),
    })
}
