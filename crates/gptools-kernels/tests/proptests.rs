//! Property-based tests for gptools-kernels.
//!
//! These tests use proptest to check wrap-around, symmetry, positive
//! definiteness, and purity of kernels on randomly generated coordinates.

use gptools_kernels::{
    evaluate_residuals, Covariance, DiagonalKernel, ExpQuadKernel, Kernel, MaternKernel, Period,
};
use proptest::prelude::*;
use scirs2_core::ndarray::{ArrayD, IxDyn};

/// Strategy for `(n, p, coordinates)` with `n` points in `p` dimensions.
fn point_set_strategy() -> impl Strategy<Value = (usize, usize, Vec<f64>)> {
    (1usize..8, 1usize..4).prop_flat_map(|(n, p)| {
        (
            Just(n),
            Just(p),
            prop::collection::vec(-5.0f64..5.0, n * p),
        )
    })
}

fn to_array(n: usize, p: usize, data: Vec<f64>) -> ArrayD<f64> {
    ArrayD::from_shape_vec(IxDyn(&[n, p]), data).unwrap()
}

fn cholesky_succeeds(matrix: &ArrayD<f64>) -> bool {
    let n = matrix.shape()[0];
    let mut lower = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..=i {
            let mut sum = matrix[[i, j]];
            for k in 0..j {
                sum -= lower[i * n + k] * lower[j * n + k];
            }
            if i == j {
                if sum <= 0.0 {
                    return false;
                }
                lower[i * n + i] = sum.sqrt();
            } else {
                lower[i * n + j] = sum / lower[j * n + j];
            }
        }
    }
    true
}

proptest! {
    /// Wrapped residuals lie in [-P/2, P/2] up to rounding.
    #[test]
    fn test_wrapped_residuals_in_range(
        (n, p, data) in point_set_strategy(),
        period in 0.5f64..4.0
    ) {
        let x = to_array(n, p, data);
        let wrap = Period::uniform(period).unwrap();
        let residuals = evaluate_residuals(&x, None, wrap.as_ref()).unwrap();
        let tolerance = 1e-9 * period;
        for &r in residuals.iter() {
            prop_assert!(r >= -period / 2.0 - tolerance && r <= period / 2.0 + tolerance);
        }
    }

    /// Wrapped residuals differ from raw residuals by a multiple of the period.
    #[test]
    fn test_wrap_shifts_by_whole_periods(
        (n, p, data) in point_set_strategy(),
        period in 0.5f64..4.0
    ) {
        let x = to_array(n, p, data);
        let wrap = Period::uniform(period).unwrap();
        let raw = evaluate_residuals(&x, None, None).unwrap();
        let wrapped = evaluate_residuals(&x, None, wrap.as_ref()).unwrap();
        for (r, w) in raw.iter().zip(wrapped.iter()) {
            let shift = (r - w) / period;
            prop_assert!((shift - shift.round()).abs() < 1e-9);
        }
    }

    /// Covariance matrices are symmetric.
    #[test]
    fn test_covariance_symmetric(
        (n, p, data) in point_set_strategy(),
        length_scale in 0.2f64..2.0
    ) {
        let x = to_array(n, p, data);
        let kernel = ExpQuadKernel::new(1.0, length_scale, Period::uniform(10.0).unwrap()).unwrap();
        let cov = kernel.evaluate(&x, None).unwrap();
        for i in 0..n {
            for j in 0..i {
                let (a, b) = (cov[[i, j]], cov[[j, i]]);
                prop_assert!((a - b).abs() <= 1e-10 * a.abs().max(b.abs()) + 1e-12);
            }
        }
    }

    /// Kernels plus a nugget admit a Cholesky decomposition.
    #[test]
    fn test_positive_definite_with_nugget(
        (n, p, data) in point_set_strategy(),
        sigma in 0.5f64..2.0,
        length_scale in 0.2f64..2.0
    ) {
        let x = to_array(n, p, data);
        let nugget = 1e-3 * sigma * sigma;
        let kernels: Vec<Kernel> = vec![
            ExpQuadKernel::new(sigma, length_scale, None).unwrap().into(),
            MaternKernel::new(1.5, sigma, length_scale, None).unwrap().into(),
            MaternKernel::new(2.5, sigma, length_scale, None).unwrap().into(),
        ];
        for kernel in kernels {
            let kernel = (kernel + DiagonalKernel::new(nugget, None).unwrap()).unwrap();
            let cov = kernel.evaluate(&x, None).unwrap();
            prop_assert!(cholesky_succeeds(&cov));
        }
    }

    /// Evaluation has no hidden state.
    #[test]
    fn test_evaluation_is_pure((n, p, data) in point_set_strategy()) {
        let x = to_array(n, p, data);
        let kernel = MaternKernel::new(2.5, 1.0, 1.0, None).unwrap();
        let first = kernel.evaluate(&x, None).unwrap();
        let second = kernel.evaluate(&x, None).unwrap();
        prop_assert_eq!(first, second);
    }
}
