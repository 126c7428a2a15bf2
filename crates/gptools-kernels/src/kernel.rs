//! The closed set of covariance kernels and their algebra.

use std::ops::{Add, Mul};

use gptools_backend::Scalar;
use scirs2_core::ndarray::ArrayD;

use crate::composite_kernel::{CompositeKernel, CompositeOp, Operand};
use crate::error::Result;
use crate::kernels::{DiagonalKernel, ExpQuadKernel, MaternKernel};
use crate::period::Period;
use crate::types::Covariance;

/// Any covariance kernel.
///
/// Kernels combine with `+` and `*`, with each other and with `f64`
/// constants. Composition validates periodicity, so the operators return a
/// `Result`.
///
/// ```rust
/// use gptools_kernels::{Covariance, DiagonalKernel, ExpQuadKernel, Kernel};
/// use scirs2_core::ndarray::array;
///
/// let signal = ExpQuadKernel::new(1.0, 0.5, None).unwrap();
/// let kernel: Kernel = (signal * 2.0).unwrap();
/// let kernel = (kernel + DiagonalKernel::new(0.1, None).unwrap()).unwrap();
///
/// let x = array![[0.0f64], [1.0]].into_dyn();
/// let cov = kernel.evaluate(&x, None).unwrap();
/// assert!((cov[[0, 0]] - 2.1).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Kernel {
    /// Nugget variance
    Diagonal(DiagonalKernel),
    /// Exponentiated quadratic or periodic heat kernel
    ExpQuad(ExpQuadKernel),
    /// Half-integer Matérn kernel
    Matern(MaternKernel),
    /// Sum or product of two operands
    Composite(CompositeKernel),
}

impl Kernel {
    /// Combine two operands with a binary operation.
    pub fn compose(
        operation: CompositeOp,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<Kernel> {
        CompositeKernel::new(operation, a, b).map(Kernel::Composite)
    }
}

impl Covariance for Kernel {
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        match self {
            Kernel::Diagonal(kernel) => kernel.evaluate(x, y),
            Kernel::ExpQuad(kernel) => kernel.evaluate(x, y),
            Kernel::Matern(kernel) => kernel.evaluate(x, y),
            Kernel::Composite(kernel) => kernel.evaluate(x, y),
        }
    }

    fn evaluate_rfft<T: Scalar>(&self, shape: &[usize]) -> Result<ArrayD<T>> {
        match self {
            Kernel::Diagonal(kernel) => kernel.evaluate_rfft(shape),
            Kernel::ExpQuad(kernel) => kernel.evaluate_rfft(shape),
            Kernel::Matern(kernel) => kernel.evaluate_rfft(shape),
            Kernel::Composite(kernel) => kernel.evaluate_rfft(shape),
        }
    }

    fn period(&self) -> Option<&Period> {
        match self {
            Kernel::Diagonal(kernel) => kernel.period(),
            Kernel::ExpQuad(kernel) => kernel.period(),
            Kernel::Matern(kernel) => kernel.period(),
            Kernel::Composite(kernel) => kernel.period(),
        }
    }

    fn name(&self) -> &str {
        match self {
            Kernel::Diagonal(kernel) => kernel.name(),
            Kernel::ExpQuad(kernel) => kernel.name(),
            Kernel::Matern(kernel) => kernel.name(),
            Kernel::Composite(kernel) => kernel.name(),
        }
    }
}

macro_rules! impl_kernel_variant {
    ($($variant:ident($ty:ty)),* $(,)?) => {$(
        impl From<$ty> for Kernel {
            fn from(kernel: $ty) -> Self {
                Kernel::$variant(kernel)
            }
        }

        impl From<$ty> for Operand {
            fn from(kernel: $ty) -> Self {
                Operand::Kernel(Box::new(Kernel::$variant(kernel)))
            }
        }
    )*};
}

impl_kernel_variant!(
    Diagonal(DiagonalKernel),
    ExpQuad(ExpQuadKernel),
    Matern(MaternKernel),
    Composite(CompositeKernel),
);

macro_rules! impl_kernel_algebra {
    ($($ty:ty),* $(,)?) => {$(
        impl<R: Into<Operand>> Add<R> for $ty {
            type Output = Result<Kernel>;

            fn add(self, rhs: R) -> Self::Output {
                Kernel::compose(CompositeOp::Add, self, rhs)
            }
        }

        impl<R: Into<Operand>> Mul<R> for $ty {
            type Output = Result<Kernel>;

            fn mul(self, rhs: R) -> Self::Output {
                Kernel::compose(CompositeOp::Mul, self, rhs)
            }
        }

        impl Add<$ty> for f64 {
            type Output = Result<Kernel>;

            fn add(self, rhs: $ty) -> Self::Output {
                Kernel::compose(CompositeOp::Add, self, rhs)
            }
        }

        impl Mul<$ty> for f64 {
            type Output = Result<Kernel>;

            fn mul(self, rhs: $ty) -> Self::Output {
                Kernel::compose(CompositeOp::Mul, self, rhs)
            }
        }
    )*};
}

impl_kernel_algebra!(
    Kernel,
    DiagonalKernel,
    ExpQuadKernel,
    MaternKernel,
    CompositeKernel,
);
