//! Real-FFT helpers.
//!
//! Kernels on periodic grids are even functions, so their Fourier transforms
//! are real. The real FFT of a signal of length `n` stores the `n / 2 + 1`
//! non-negative frequencies; [`expand_rfft`] restores the full spectrum of a
//! real half-spectrum using Hermitian symmetry. [`rfft`] is a direct
//! discrete Fourier transform used to cross-check closed-form spectra.

use scirs2_core::ndarray::{Array1, ArrayView1};

use crate::error::{BackendResult, ShapeMismatchError};
use crate::precision::Scalar;

/// Number of real-FFT coefficients of a signal with `n` samples.
pub fn rfft_len(n: usize) -> usize {
    n / 2 + 1
}

/// Expand a real half-spectrum to the full spectrum of a signal of length `n`.
///
/// Coefficients beyond the Nyquist frequency mirror those below it:
/// `full[n - k] = half[k]` for `0 < k < n - n / 2`.
///
/// # Examples
/// ```
/// use gptools_backend::fft::expand_rfft;
/// use scirs2_core::ndarray::array;
///
/// let full = expand_rfft(&array![4.0, 3.0, 2.0].view(), 5).unwrap();
/// assert_eq!(full, array![4.0, 3.0, 2.0, 2.0, 3.0]);
/// ```
pub fn expand_rfft<T: Scalar>(half: &ArrayView1<'_, T>, n: usize) -> BackendResult<Array1<T>> {
    if half.len() != rfft_len(n) {
        return Err(ShapeMismatchError::new(
            "expand_rfft",
            vec![vec![rfft_len(n)]],
            vec![vec![half.len()]],
        )
        .with_context(format!("half-spectrum of a signal with {} samples", n))
        .into());
    }
    Ok(Array1::from_shape_fn(n, |k| {
        if k < half.len() {
            half[k]
        } else {
            half[n - k]
        }
    }))
}

/// Direct real discrete Fourier transform.
///
/// Returns the real and imaginary parts of
/// `X[k] = Σ_j x[j] exp(-2πi jk / n)` for `k = 0, ..., n / 2`. The cost is
/// quadratic in `n`; it is meant for verification rather than production use.
pub fn rfft<T: Scalar>(signal: &ArrayView1<'_, T>) -> (Array1<T>, Array1<T>) {
    let n = signal.len();
    let len = if n == 0 { 0 } else { rfft_len(n) };
    let mut re = Array1::from_elem(len, T::zero());
    let mut im = Array1::from_elem(len, T::zero());
    for k in 0..len {
        let (mut sum_re, mut sum_im) = (0.0f64, 0.0f64);
        for (j, value) in signal.iter().enumerate() {
            // Reduce jk modulo n before scaling to keep the angle accurate.
            let angle = 2.0 * std::f64::consts::PI * ((j * k) % n) as f64 / n as f64;
            let value = value.to_f64();
            sum_re += value * angle.cos();
            sum_im -= value * angle.sin();
        }
        re[k] = T::from_f64(sum_re);
        im[k] = T::from_f64(sum_im);
    }
    (re, im)
}
