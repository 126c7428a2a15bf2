//! Series evaluation of the Jacobi theta function.
//!
//! The third Jacobi theta function
//!
//! ```text
//! θ₃(q, z) = 1 + 2 Σ_{n≥1} q^{n²} cos(2πnz)
//! ```
//!
//! is the periodic heat kernel on the unit circle. It is approximated by
//! truncating the series once the tail drops below a relative tolerance. The
//! nome must satisfy `|q| < 1`; this is a precondition and is not checked.
//! Convergence is slow for `q` close to one (about 200 terms for `q = 0.9`).

use gptools_backend::{fft::rfft_len, ops, Scalar};
use scirs2_core::ndarray::{Array1, Array2, ArrayD, Axis, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};

/// Default relative tolerance of the truncated series.
pub const DEFAULT_RTOL: f64 = 1e-9;

/// Default bound on the number of element-term products held in memory at
/// once (about 8MB at 64-bit precision).
pub const DEFAULT_MAX_BATCH_SIZE: usize = 1_000_000;

/// Configuration of theta series evaluation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThetaConfig {
    /// Relative tolerance used to choose the number of series terms
    pub rtol: f64,
    /// Maximum number of element-term products per batch
    pub max_batch_size: usize,
}

impl ThetaConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            rtol: DEFAULT_RTOL,
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }

    /// Set relative tolerance
    pub fn with_rtol(mut self, rtol: f64) -> Self {
        self.rtol = rtol;
        self
    }

    /// Set maximum batch size
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size;
        self
    }

    /// Check that the tolerance lies in `(0, 1)` and the batch size is positive.
    pub fn validate(&self) -> Result<()> {
        if !(self.rtol > 0.0 && self.rtol < 1.0) {
            return Err(KernelError::invalid_parameter(
                "rtol",
                self.rtol,
                "relative tolerance must lie in (0, 1)",
            ));
        }
        if self.max_batch_size == 0 {
            return Err(KernelError::invalid_parameter(
                "max_batch_size",
                self.max_batch_size,
                "batch size must be positive",
            ));
        }
        Ok(())
    }
}

impl Default for ThetaConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of series terms such that the tail is below `rtol` relative to the
/// leading term, `ceil(ln(rtol) / ln(q))`, and at least one.
///
/// # Examples
/// ```
/// use gptools_kernels::theta::{jtheta_num_terms, DEFAULT_RTOL};
///
/// assert_eq!(jtheta_num_terms(0.9, DEFAULT_RTOL), 197);
/// ```
pub fn jtheta_num_terms(q: f64, rtol: f64) -> usize {
    let terms = (rtol.ln() / q.ln()).ceil();
    if terms.is_finite() && terms >= 1.0 {
        terms as usize
    } else {
        1
    }
}

/// Evaluate the Jacobi theta function using a series approximation.
///
/// # Arguments
/// * `z` - Argument of the theta function.
/// * `q` - Nome of the theta function with modulus less than one; must be
///   broadcastable with `z`.
/// * `nterms` - Number of terms in the series (`None` or zero defaults to a
///   relative tolerance of [`DEFAULT_RTOL`] for the largest nome).
/// * `max_batch_size` - Maximum number of element-term products evaluated per
///   pass. Large arrays combined with many terms are summed in several passes
///   so the intermediate array stays bounded.
pub fn jtheta<T: Scalar>(
    z: &ArrayD<T>,
    q: &ArrayD<T>,
    nterms: Option<usize>,
    max_batch_size: usize,
) -> Result<ArrayD<T>> {
    let shape = ops::broadcast_shape(z.shape(), q.shape())?;
    let dim = IxDyn(&shape);
    let zs: Vec<T> = z
        .broadcast(dim.clone())
        .ok_or_else(|| broadcast_error(z.shape(), &shape))?
        .iter()
        .copied()
        .collect();
    let qs: Vec<T> = q
        .broadcast(dim)
        .ok_or_else(|| broadcast_error(q.shape(), &shape))?
        .iter()
        .copied()
        .collect();

    let nterms = nterms.filter(|&n| n > 0).unwrap_or_else(|| {
        let q_max = ops::max(&q.view()).map_or(0.0, T::to_f64);
        jtheta_num_terms(q_max, DEFAULT_RTOL)
    });
    let size = zs.len();
    let per_pass = terms_per_pass(size, nterms, max_batch_size);
    log::debug!(
        "jtheta: {} elements ({}), {} terms in passes of {}",
        size,
        T::precision(),
        nterms,
        per_pass
    );

    let two_pi = T::from_f64(2.0 * std::f64::consts::PI);
    let mut series = Array1::from_elem(size, T::zero());
    for offset in (0..nterms).step_by(per_pass) {
        let count = per_pass.min(nterms - offset);
        let batch = Array2::from_shape_fn((size, count), |(i, j)| {
            let n = T::from_usize(offset + j + 1);
            qs[i].powf(n * n) * (two_pi * zs[i] * n).cos()
        });
        let partial = batch.fold_axis(Axis(1), T::zero(), |&acc, &term| acc + term);
        series.zip_mut_with(&partial, |s, &p| *s = *s + p);
        log::trace!("jtheta: accumulated terms {}..{}", offset + 1, offset + count);
    }

    let two = T::from_f64(2.0);
    let values: Vec<T> = series.iter().map(|&s| T::one() + two * s).collect();
    ArrayD::from_shape_vec(IxDyn(&shape), values).map_err(|err| {
        KernelError::Backend(gptools_backend::BackendError::InvalidOperation(format!(
            "jtheta: {}",
            err
        )))
    })
}

/// Series terms summed per pass so that at most `max(max_batch_size, size)`
/// products are held at once.
fn terms_per_pass(size: usize, nterms: usize, max_batch_size: usize) -> usize {
    (max_batch_size / size.max(1)).clamp(1, nterms.max(1))
}

/// Evaluate the real FFT of the Jacobi theta function sampled at `nz`
/// equally spaced points of the unit interval.
///
/// The coefficients are computed directly in the frequency domain: sampling
/// on `nz` points aliases every frequency `n` onto `n mod nz`, so coefficient
/// `k` collects the series terms `n = k + m·nz` and `n = -(nz - k + m·nz)`:
///
/// ```text
/// X[k] = nz Σ_{m=0}^{nterms-1} (q^{(k + m·nz)²} + q^{(nz - k + m·nz)²})
/// ```
///
/// Terms decrease monotonically in `m`, so the sum stops early once both
/// terms underflow to zero. `nterms` of `None` or zero uses the default
/// tolerance.
///
/// With `z = linspace(0, 1, nz, endpoint=False)`, `rfft(jtheta(z, q))` equals
/// `jtheta_rfft(nz, q)` up to floating-point tolerance.
pub fn jtheta_rfft<T: Scalar>(nz: usize, q: T, nterms: Option<usize>) -> Array1<T> {
    let nterms = nterms
        .filter(|&n| n > 0)
        .unwrap_or_else(|| jtheta_num_terms(q.to_f64(), DEFAULT_RTOL));
    let scale = T::from_usize(nz);
    Array1::from_shape_fn(rfft_len(nz), |k| {
        let k = T::from_usize(k);
        let mut acc = T::zero();
        for m in 0..nterms {
            let base = T::from_usize(m) * scale;
            let forward = k + base;
            let backward = scale - k + base;
            let terms = q.powf(forward * forward) + q.powf(backward * backward);
            if terms == T::zero() {
                break;
            }
            acc = acc + terms;
        }
        scale * acc
    })
}

fn broadcast_error(from: &[usize], to: &[usize]) -> KernelError {
    KernelError::DimensionMismatch {
        expected: to.to_vec(),
        got: from.to_vec(),
        context: "jtheta broadcast".to_string(),
    }
}
