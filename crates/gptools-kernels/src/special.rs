//! Special functions needed by closed-form spectral densities.

use crate::error::{KernelError, Result};

/// Gamma function at a positive integer or half-integer argument.
///
/// Matern spectral densities only need `Γ(ν)` and `Γ(ν + d/2)` with
/// `ν ∈ {3/2, 5/2}` and integer `d`, so the recurrence `Γ(x + 1) = x Γ(x)`
/// seeded with `Γ(1) = 1` or `Γ(1/2) = √π` is exact up to rounding.
///
/// # Examples
/// ```
/// use gptools_kernels::special::half_integer_gamma;
///
/// assert_eq!(half_integer_gamma(4.0).unwrap(), 6.0);
/// assert!((half_integer_gamma(1.5).unwrap() - std::f64::consts::PI.sqrt() / 2.0).abs() < 1e-15);
/// ```
pub fn half_integer_gamma(x: f64) -> Result<f64> {
    let twice = (2.0 * x).round();
    if !x.is_finite() || twice < 1.0 || (2.0 * x - twice).abs() > 1e-9 {
        return Err(KernelError::invalid_parameter(
            "x",
            x,
            "gamma is only available at positive integers and half-integers",
        ));
    }
    let steps = twice as u64;
    let (mut value, mut arg) = if steps % 2 == 1 {
        (std::f64::consts::PI.sqrt(), 0.5)
    } else {
        (1.0, 1.0)
    };
    while 2.0 * arg < twice {
        value *= arg;
        arg += 1.0;
    }
    Ok(value)
}
