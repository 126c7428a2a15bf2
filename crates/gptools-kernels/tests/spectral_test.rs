//! Closed-form spectra against direct transforms of kernels sampled on grids.

use std::f64::consts::PI;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use gptools_backend::{coordgrid, rfft};
use gptools_kernels::{jtheta, jtheta_rfft, Covariance, ExpQuadKernel, Period};
use scirs2_core::ndarray::{array, Array1, ArrayD, Ix1, IxDyn};

/// Kernel between every grid point and the origin, as a flat array in
/// row-major grid order.
fn sample_against_origin(kernel: &ExpQuadKernel, shape: &[usize], periods: &[f64]) -> ArrayD<f64> {
    let axes: Vec<Array1<f64>> = shape
        .iter()
        .zip(periods)
        .map(|(&n, &p)| Array1::from_shape_fn(n, |j| j as f64 * p / n as f64))
        .collect();
    let grid = coordgrid(&axes).unwrap().into_dyn();
    let origin = ArrayD::from_elem(IxDyn(&[1, shape.len()]), 0.0);
    kernel.evaluate(&grid, Some(&origin)).unwrap()
}

#[test]
fn test_jtheta_rfft_matches_sampled_series() {
    let nz = 12;
    let q = 0.4;
    let z = ArrayD::from_shape_fn(IxDyn(&[nz]), |idx| idx[0] as f64 / nz as f64);
    let values = jtheta(&z, &array![q].into_dyn(), None, 1_000_000)
        .unwrap()
        .into_dimensionality::<Ix1>()
        .unwrap();
    let (re, im) = rfft(&values.view());
    let expected = jtheta_rfft(nz, q, None);
    for k in 0..expected.len() {
        assert_relative_eq!(re[k], expected[k], max_relative = 1e-6, epsilon = 1e-9);
        assert_abs_diff_eq!(im[k], 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_expquad_rfft_matches_dft_1d() {
    let n = 20;
    let period = 4.0;
    let kernel = ExpQuadKernel::new(1.3, 0.45, Period::uniform(period).unwrap()).unwrap();
    let values = sample_against_origin(&kernel, &[n], &[period])
        .into_dimensionality::<Ix1>()
        .unwrap();
    let (re, im) = rfft(&values.view());

    let spectrum = kernel.evaluate_rfft::<f64>(&[n]).unwrap();
    assert_eq!(spectrum.shape(), &[n / 2 + 1]);
    for k in 0..=n / 2 {
        assert_relative_eq!(spectrum[[k]], re[k], max_relative = 1e-6, epsilon = 1e-9);
        assert_abs_diff_eq!(im[k], 0.0, epsilon = 1e-9);
    }
}

#[test]
fn test_expquad_rfft_matches_dft_2d() {
    let shape = [6usize, 9];
    let periods = [3.0, 5.0];
    let kernel =
        ExpQuadKernel::new(0.8, 0.6, Period::new(periods.to_vec()).unwrap()).unwrap();
    let values = sample_against_origin(&kernel, &shape, &periods);
    let spectrum = kernel.evaluate_rfft::<f64>(&shape).unwrap();
    assert_eq!(spectrum.shape(), &[6, 5]);

    for k0 in 0..shape[0] {
        for k1 in 0..=shape[1] / 2 {
            let (mut re, mut im) = (0.0, 0.0);
            for j0 in 0..shape[0] {
                for j1 in 0..shape[1] {
                    let angle = -2.0
                        * PI
                        * ((k0 * j0) as f64 / shape[0] as f64
                            + (k1 * j1) as f64 / shape[1] as f64);
                    let value = values[[j0 * shape[1] + j1]];
                    re += value * angle.cos();
                    im += value * angle.sin();
                }
            }
            assert_relative_eq!(spectrum[[k0, k1]], re, max_relative = 1e-6, epsilon = 1e-9);
            assert_abs_diff_eq!(im, 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_expquad_rfft_single_precision() {
    let kernel = ExpQuadKernel::new(1.0, 0.5, Period::uniform(3.0).unwrap()).unwrap();
    let single = kernel.evaluate_rfft::<f32>(&[4, 10]).unwrap();
    let double = kernel.evaluate_rfft::<f64>(&[4, 10]).unwrap();
    assert_eq!(single.shape(), double.shape());
    for (a, b) in single.iter().zip(double.iter()) {
        assert_relative_eq!(*a as f64, *b, max_relative = 1e-4);
    }
}
