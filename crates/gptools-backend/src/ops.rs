//! Dense array primitives used by the kernels.
//!
//! All functions are generic over [`Scalar`] so the same kernel code runs on
//! `f32` and `f64` arrays. Broadcasting follows the usual n-dimensional rules:
//! shapes are aligned at their trailing axes, and an axis of length one
//! stretches to match the other operand.

use scirs2_core::ndarray::{Array1, Array2, ArrayD, ArrayViewD, IxDyn, Zip};

use crate::error::{BackendError, BackendResult, ShapeMismatchError};
use crate::precision::Scalar;

/// Default relative tolerance of [`allclose`].
pub const DEFAULT_RTOL: f64 = 1e-5;

/// Default absolute tolerance of [`allclose`].
pub const DEFAULT_ATOL: f64 = 1e-8;

/// Identity matrix of size `n`.
pub fn eye<T: Scalar>(n: usize) -> Array2<T> {
    Array2::from_shape_fn((n, n), |(i, j)| if i == j { T::one() } else { T::zero() })
}

/// Integers `0, 1, ..., n - 1` as scalars.
pub fn arange<T: Scalar>(n: usize) -> Array1<T> {
    Array1::from_shape_fn(n, T::from_usize)
}

/// Largest element, or `None` for an empty array.
///
/// NaN elements are ignored.
pub fn max<T: Scalar>(a: &ArrayViewD<'_, T>) -> Option<T> {
    a.iter().copied().fold(None, |acc, value| match acc {
        None => Some(value),
        Some(current) => Some(current.max(value)),
    })
}

/// Shape obtained by broadcasting `a` against `b`.
pub fn broadcast_shape(a: &[usize], b: &[usize]) -> BackendResult<Vec<usize>> {
    let ndim = a.len().max(b.len());
    let mut shape = vec![0; ndim];
    for (axis, out) in shape.iter_mut().enumerate() {
        // Align at the trailing axis; missing leading axes behave like length one.
        let da = (axis + a.len()).checked_sub(ndim).map_or(1, |i| a[i]);
        let db = (axis + b.len()).checked_sub(ndim).map_or(1, |i| b[i]);
        *out = match (da, db) {
            (x, y) if x == y => x,
            (1, y) => y,
            (x, 1) => x,
            _ => {
                return Err(ShapeMismatchError::new(
                    "broadcast",
                    vec![a.to_vec()],
                    vec![b.to_vec()],
                )
                .with_context("operands could not be broadcast together")
                .into())
            }
        };
    }
    Ok(shape)
}

/// Apply a binary function elementwise after broadcasting both operands.
pub fn broadcast_zip<T, F>(
    a: &ArrayViewD<'_, T>,
    b: &ArrayViewD<'_, T>,
    mut f: F,
) -> BackendResult<ArrayD<T>>
where
    T: Scalar,
    F: FnMut(T, T) -> T,
{
    let shape = broadcast_shape(a.shape(), b.shape())?;
    let dim = IxDyn(&shape);
    let av = a.broadcast(dim.clone()).ok_or_else(|| {
        BackendError::InvalidOperation(format!("cannot broadcast {:?} to {:?}", a.shape(), shape))
    })?;
    let bv = b.broadcast(dim).ok_or_else(|| {
        BackendError::InvalidOperation(format!("cannot broadcast {:?} to {:?}", b.shape(), shape))
    })?;
    Ok(Zip::from(&av).and(&bv).map_collect(|&x, &y| f(x, y)))
}

/// Whether `a` and `b` are elementwise equal within tolerance.
///
/// Uses the asymmetric criterion `|a - b| <= atol + rtol * |b|`. Operands that
/// cannot be broadcast together are never close.
pub fn allclose<T: Scalar>(
    a: &ArrayViewD<'_, T>,
    b: &ArrayViewD<'_, T>,
    rtol: f64,
    atol: f64,
) -> bool {
    let rtol = T::from_f64(rtol);
    let atol = T::from_f64(atol);
    let one = T::one();
    match broadcast_zip(a, b, |x, y| {
        if (x - y).abs() <= atol + rtol * y.abs() {
            one
        } else {
            T::zero()
        }
    }) {
        Ok(flags) => flags.iter().all(|&flag| flag == one),
        Err(_) => false,
    }
}
