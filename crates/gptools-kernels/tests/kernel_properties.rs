//! Integration tests for covariance kernel properties.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gptools_kernels::{
    evaluate_squared_distance, Covariance, DiagonalKernel, ExpQuadKernel, Kernel, KernelError,
    MaternKernel, Period,
};
use scirs2_core::ndarray::{s, Array, ArrayD, Axis, IxDyn};

/// Deterministic, irregular points in `[0, scale)`.
fn scattered_points(n: usize, p: usize, scale: f64) -> ArrayD<f64> {
    Array::from_shape_fn(IxDyn(&[n, p]), |idx| {
        let t = ((idx[0] * p + idx[1]) as f64 * 0.618_033_988_75).fract();
        t * scale
    })
}

/// Cholesky decomposition of a square matrix, succeeding only for positive
/// definite input.
fn is_positive_definite(matrix: &ArrayD<f64>) -> bool {
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

fn with_nugget(kernel: impl Into<Kernel>, epsilon: f64) -> Kernel {
    let kernel: Kernel = kernel.into();
    let nugget = DiagonalKernel::new(epsilon, kernel.period().cloned()).unwrap();
    (kernel + nugget).unwrap()
}

#[test]
fn test_squared_distance_matches_classical_formula() {
    let x = scattered_points(6, 3, 4.0);
    let dist2 = evaluate_squared_distance(&x, None, None).unwrap();
    for i in 0..6 {
        for j in 0..6 {
            let expected: f64 = (0..3).map(|d| (x[[i, d]] - x[[j, d]]).powi(2)).sum();
            assert_relative_eq!(dist2[[i, j]], expected, max_relative = 1e-12, epsilon = 1e-14);
        }
    }
}

#[test]
fn test_kernels_are_positive_definite() {
    let x = scattered_points(12, 2, 5.0);
    let period = Period::uniform(5.0).unwrap();
    let kernels = vec![
        with_nugget(ExpQuadKernel::new(1.3, 0.8, None).unwrap(), 1e-6),
        with_nugget(ExpQuadKernel::new(1.3, 0.8, period).unwrap(), 1e-6),
        with_nugget(MaternKernel::new(1.5, 0.7, 1.2, None).unwrap(), 1e-6),
        with_nugget(MaternKernel::new(2.5, 0.7, 1.2, None).unwrap(), 1e-6),
    ];
    for kernel in kernels {
        let cov = kernel.evaluate(&x, None).unwrap();
        assert_eq!(cov.shape(), &[12, 12]);
        assert!(is_positive_definite(&cov), "{:?} is not positive definite", kernel);
    }
}

#[test]
fn test_covariance_is_symmetric() {
    let x = scattered_points(7, 2, 3.0);
    let kernel = ExpQuadKernel::new(1.0, 0.5, Period::new(vec![3.0, 2.0]).unwrap()).unwrap();
    let cov = kernel.evaluate(&x, None).unwrap();
    for i in 0..7 {
        for j in 0..i {
            assert_relative_eq!(cov[[i, j]], cov[[j, i]], max_relative = 1e-10);
        }
    }
}

#[test]
fn test_batched_evaluation() {
    let x = Array::from_shape_fn(IxDyn(&[3, 4, 2]), |idx| {
        (idx[0] as f64) + 0.3 * idx[1] as f64 - 0.1 * idx[2] as f64
    });
    let kernel = MaternKernel::new(2.5, 1.0, 0.9, None).unwrap();
    let cov = kernel.evaluate(&x, None).unwrap();
    assert_eq!(cov.shape(), &[3, 4, 4]);

    for b in 0..3 {
        let single = x.slice(s![b, .., ..]).to_owned().into_dyn();
        let expected = kernel.evaluate(&single, None).unwrap();
        let actual = cov.index_axis(Axis(0), b);
        for (u, v) in actual.iter().zip(expected.iter()) {
            assert_eq!(u, v);
        }
    }
}

#[test]
fn test_cross_covariance_matches_pairwise() {
    let x = scattered_points(5, 2, 4.0);
    let kernel = ExpQuadKernel::new(0.9, 1.1, Period::uniform(4.0).unwrap()).unwrap();
    let pairwise = kernel.evaluate(&x, None).unwrap();

    // (n, 1, p) against (1, n, p).
    let rows = x.clone().insert_axis(Axis(1));
    let cols = x.clone().insert_axis(Axis(0));
    let cross = kernel.evaluate(&rows, Some(&cols)).unwrap();
    assert_eq!(cross.shape(), &[5, 5]);
    for (u, v) in cross.iter().zip(pairwise.iter()) {
        assert_relative_eq!(*u, *v, max_relative = 1e-12);
    }
}

#[test]
fn test_evaluation_is_pure() {
    let x = scattered_points(6, 1, 2.0);
    let kernel = ExpQuadKernel::new(1.0, 0.3, Period::uniform(2.0).unwrap()).unwrap();
    let first = kernel.evaluate(&x, None).unwrap();
    let second = kernel.evaluate(&x, None).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        kernel.evaluate_rfft::<f64>(&[16]).unwrap(),
        kernel.evaluate_rfft::<f64>(&[16]).unwrap()
    );
}

#[test]
fn test_zero_period_equals_euclidean_kernel() {
    let zero = ExpQuadKernel::new(1.2, 0.7, Period::uniform(0.0).unwrap()).unwrap();
    let euclidean = ExpQuadKernel::new(1.2, 0.7, None).unwrap();
    assert!(!zero.is_periodic());
    let x = scattered_points(5, 2, 3.0);
    assert_eq!(
        zero.evaluate(&x, None).unwrap(),
        euclidean.evaluate(&x, None).unwrap()
    );
}

#[test]
fn test_diagonal_kernel_is_identity() {
    let kernel = DiagonalKernel::new(1.0, None).unwrap();
    let x = scattered_points(4, 3, 1.0);
    let cov = kernel.evaluate(&x, None).unwrap();
    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(cov[[i, j]], if i == j { 1.0 } else { 0.0 });
        }
    }
    assert!(kernel.evaluate(&x, Some(&x)).is_err());
}

#[test]
fn test_matern_rfft_closed_form() {
    let kernel = MaternKernel::new(2.5, 1.0, 1.0, Period::uniform(10.0).unwrap()).unwrap();
    let rfft = kernel.evaluate_rfft::<f64>(&[16]).unwrap();
    assert_eq!(rfft.shape(), &[9]);

    let pi = std::f64::consts::PI;
    let gamma_ratio = 2.0 / (0.75 * pi.sqrt());
    let ell = 0.1;
    for k in 0..=8 {
        let arg = 1.0 + 2.0 / 2.5 * (pi * ell * k as f64).powi(2);
        let expected = 16.0 * 2.0 * (pi / 5.0).sqrt() * gamma_ratio * arg.powf(-3.0) * ell;
        assert_relative_eq!(rfft[[k]], expected, max_relative = 1e-12);
    }
}

#[test]
fn test_matern_spectrum_sums_to_variance() {
    let n = 64;
    let kernel = MaternKernel::new(1.5, 1.0, 1.0, Period::uniform(10.0).unwrap()).unwrap();
    let half = kernel
        .evaluate_rfft::<f64>(&[n])
        .unwrap()
        .into_dimensionality::<scirs2_core::ndarray::Ix1>()
        .unwrap();
    let full = gptools_backend::expand_rfft(&half.view(), n).unwrap();
    let variance: f64 = full.iter().sum::<f64>() / n as f64;
    assert_abs_diff_eq!(variance, 1.0, epsilon = 1e-3);
}

#[test]
fn test_unsupported_operations() {
    let x = scattered_points(3, 1, 1.0);
    let periodic_matern =
        MaternKernel::new(1.5, 1.0, 1.0, Period::uniform(2.0).unwrap()).unwrap();
    assert!(matches!(
        periodic_matern.evaluate(&x, None),
        Err(KernelError::Unsupported { .. })
    ));
    let euclidean = ExpQuadKernel::new(1.0, 1.0, None).unwrap();
    assert!(matches!(
        euclidean.evaluate_rfft::<f64>(&[8]),
        Err(KernelError::Unsupported { .. })
    ));
}
