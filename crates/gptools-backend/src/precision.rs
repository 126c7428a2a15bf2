//! Scalar capabilities and precision tags.
//!
//! Every array primitive in this crate and every kernel in `gptools-kernels`
//! is generic over an element type implementing [`Scalar`]. The trait is the
//! capability interface of the numeric backend: it is implemented once per
//! supported representation (`f32` and `f64`), and [`Scalar::precision`]
//! exposes the runtime tag of the representation in use.

use std::fmt;

/// Numerical precision of an array representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Precision {
    /// 32-bit floating point (faster, less memory)
    F32,

    /// 64-bit floating point (more accurate)
    #[default]
    F64,
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Precision::F32 => write!(f, "FP32"),
            Precision::F64 => write!(f, "FP64"),
        }
    }
}

/// Trait for scalar types that can be used in kernel computations.
///
/// This trait abstracts over f32 and f64 for generic array operations.
pub trait Scalar:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + std::fmt::Debug
    + std::fmt::Display
    + std::ops::Add<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Div<Output = Self>
    + std::ops::Neg<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Check if value is finite
    fn is_finite(self) -> bool;

    /// Absolute value
    fn abs(self) -> Self;

    /// Square root
    fn sqrt(self) -> Self;

    /// Exponential
    fn exp(self) -> Self;

    /// Natural logarithm
    fn ln(self) -> Self;

    /// Cosine
    fn cos(self) -> Self;

    /// Sine
    fn sin(self) -> Self;

    /// Largest integer less than or equal to the value
    fn floor(self) -> Self;

    /// Nearest integer, rounding half-way cases away from zero
    fn round(self) -> Self;

    /// Raise to a floating-point power
    fn powf(self, exponent: Self) -> Self;

    /// Maximum of two values
    fn max(self, other: Self) -> Self;

    /// Minimum of two values
    fn min(self, other: Self) -> Self;

    /// Convert from f64
    fn from_f64(value: f64) -> Self;

    /// Convert from an index or count
    fn from_usize(value: usize) -> Self;

    /// Convert to f64
    fn to_f64(self) -> f64;

    /// The precision type
    fn precision() -> Precision;

    /// Archimedes' constant
    fn pi() -> Self {
        Self::from_f64(std::f64::consts::PI)
    }

    /// Square of the value
    fn square(self) -> Self {
        self * self
    }
}

macro_rules! impl_scalar {
    ($ty:ident, $precision:expr) => {
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            fn one() -> Self {
                1.0
            }

            fn is_finite(self) -> bool {
                $ty::is_finite(self)
            }

            fn abs(self) -> Self {
                $ty::abs(self)
            }

            fn sqrt(self) -> Self {
                $ty::sqrt(self)
            }

            fn exp(self) -> Self {
                $ty::exp(self)
            }

            fn ln(self) -> Self {
                $ty::ln(self)
            }

            fn cos(self) -> Self {
                $ty::cos(self)
            }

            fn sin(self) -> Self {
                $ty::sin(self)
            }

            fn floor(self) -> Self {
                $ty::floor(self)
            }

            fn round(self) -> Self {
                $ty::round(self)
            }

            fn powf(self, exponent: Self) -> Self {
                $ty::powf(self, exponent)
            }

            fn max(self, other: Self) -> Self {
                $ty::max(self, other)
            }

            fn min(self, other: Self) -> Self {
                $ty::min(self, other)
            }

            fn from_f64(value: f64) -> Self {
                value as $ty
            }

            fn from_usize(value: usize) -> Self {
                value as $ty
            }

            fn to_f64(self) -> f64 {
                self as f64
            }

            fn precision() -> Precision {
                $precision
            }
        }
    };
}

impl_scalar!(f32, Precision::F32);
impl_scalar!(f64, Precision::F64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_default() {
        assert_eq!(Precision::default(), Precision::F64);
        assert_eq!(Precision::F32.to_string(), "FP32");
        assert_eq!(format!("{} elements", <f64 as Scalar>::precision()), "FP64 elements");
    }

    #[test]
    fn test_scalar_dispatch_tags() {
        assert_eq!(<f32 as Scalar>::precision(), Precision::F32);
        assert_eq!(<f64 as Scalar>::precision(), Precision::F64);
    }

    #[test]
    fn test_scalar_elementwise() {
        assert_eq!(<f64 as Scalar>::floor(-0.5), -1.0);
        assert_eq!(<f64 as Scalar>::round(2.5), 3.0);
        assert_eq!(<f64 as Scalar>::square(-3.0), 9.0);
        assert!((<f32 as Scalar>::pi() - std::f32::consts::PI).abs() < 1e-7);
        assert!((<f64 as Scalar>::powf(0.5, 4.0) - 0.0625).abs() < 1e-15);
    }
}
