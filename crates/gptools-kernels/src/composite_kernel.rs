//! Composite kernels for combining kernels and constants.
//!
//! A composite applies a binary operation to two operands, each either a
//! kernel or a plain scalar:
//! - Sum: K(x,y) = K_a(x,y) + K_b(x,y)
//! - Product: K(x,y) = K_a(x,y) * K_b(x,y)
//!
//! Composites nest, so arbitrary sums of products can be built up from the
//! `+` and `*` operators on [`Kernel`].

use gptools_backend::{ops, Scalar};
use scirs2_core::ndarray::{ArrayD, IxDyn};
use serde::{Deserialize, Serialize};

use crate::error::{KernelError, Result};
use crate::kernel::Kernel;
use crate::period::Period;
use crate::types::Covariance;

/// Binary operation of a composite kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    /// Elementwise sum
    Add,
    /// Elementwise product
    Mul,
}

impl CompositeOp {
    /// Apply the operation to two scalars.
    pub fn apply<T: Scalar>(self, a: T, b: T) -> T {
        match self {
            Self::Add => a + b,
            Self::Mul => a * b,
        }
    }

    /// Operator symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Mul => "*",
        }
    }
}

/// Operand of a composite kernel.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Kernel evaluated on the coordinates
    Kernel(Box<Kernel>),
    /// Constant broadcast against the other operand
    Scalar(f64),
}

impl Operand {
    /// Kernel held by the operand, if any.
    pub fn as_kernel(&self) -> Option<&Kernel> {
        match self {
            Self::Kernel(kernel) => Some(kernel),
            Self::Scalar(_) => None,
        }
    }

    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        match self {
            Self::Kernel(kernel) => kernel.evaluate(x, y),
            Self::Scalar(value) => Ok(ArrayD::from_elem(IxDyn(&[]), T::from_f64(*value))),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Kernel(kernel) => kernel.name().to_string(),
            Self::Scalar(value) => value.to_string(),
        }
    }
}

impl From<Kernel> for Operand {
    fn from(kernel: Kernel) -> Self {
        Self::Kernel(Box::new(kernel))
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Self::Scalar(value)
    }
}

/// Composition of two kernel operands.
///
/// # Example
///
/// ```rust
/// use gptools_kernels::{
///     CompositeKernel, CompositeOp, Covariance, DiagonalKernel, ExpQuadKernel, Period,
/// };
/// use scirs2_core::ndarray::array;
///
/// let period = Period::uniform(5.0).unwrap();
/// let signal = ExpQuadKernel::new(1.0, 0.5, period.clone()).unwrap();
/// let noise = DiagonalKernel::new(0.1, period).unwrap();
/// let kernel = CompositeKernel::new(CompositeOp::Add, signal, noise).unwrap();
///
/// let x = array![[0.0], [1.0], [2.0]].into_dyn();
/// let cov = kernel.evaluate(&x, None).unwrap();
/// assert_eq!(cov.shape(), &[3, 3]);
/// assert!(kernel.is_periodic());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeKernel {
    /// Binary operation
    operation: CompositeOp,
    /// First operand
    a: Operand,
    /// Second operand
    b: Operand,
    /// Shared period when both operands are kernels
    period: Option<Period>,
}

impl CompositeKernel {
    /// Create a new composite kernel
    ///
    /// When both operands are kernels, either both or neither must be
    /// periodic, and periodic operands must share the same period, which
    /// becomes the period of the composite. A composite with a scalar
    /// operand is not periodic. At least one operand must be a kernel.
    pub fn new(
        operation: CompositeOp,
        a: impl Into<Operand>,
        b: impl Into<Operand>,
    ) -> Result<Self> {
        let (a, b) = (a.into(), b.into());
        let period = match (a.as_kernel(), b.as_kernel()) {
            (Some(ka), Some(kb)) => {
                match (ka.period(), kb.period()) {
                    (None, None) => None,
                    (Some(pa), Some(pb)) => {
                        if !pa.is_close(pb) {
                            return Err(KernelError::IncompatibleKernels {
                                kernel_a: ka.name().to_string(),
                                kernel_b: kb.name().to_string(),
                                reason: format!(
                                    "kernels do not have the same period: {:?} and {:?}",
                                    pa.values(),
                                    pb.values()
                                ),
                            });
                        }
                        Some(pa.clone())
                    }
                    _ => {
                        return Err(KernelError::IncompatibleKernels {
                            kernel_a: ka.name().to_string(),
                            kernel_b: kb.name().to_string(),
                            reason: "either both or neither kernel must be periodic".to_string(),
                        })
                    }
                }
            }
            (Some(_), None) | (None, Some(_)) => None,
            (None, None) => {
                return Err(KernelError::invalid_parameter(
                    "operands",
                    format!("{} {} {}", a.describe(), operation.symbol(), b.describe()),
                    "at least one operand must be a kernel",
                ))
            }
        };
        log::debug!(
            "Composite kernel: {} {} {}",
            a.describe(),
            operation.symbol(),
            b.describe()
        );

        Ok(Self {
            operation,
            a,
            b,
            period,
        })
    }

    /// Binary operation
    pub fn operation(&self) -> CompositeOp {
        self.operation
    }

    /// First operand
    pub fn a(&self) -> &Operand {
        &self.a
    }

    /// Second operand
    pub fn b(&self) -> &Operand {
        &self.b
    }
}

impl Covariance for CompositeKernel {
    fn evaluate<T: Scalar>(&self, x: &ArrayD<T>, y: Option<&ArrayD<T>>) -> Result<ArrayD<T>> {
        let a = self.a.evaluate(x, y)?;
        let b = self.b.evaluate(x, y)?;
        let operation = self.operation;
        Ok(ops::broadcast_zip(&a.view(), &b.view(), |u, v| {
            operation.apply(u, v)
        })?)
    }

    fn period(&self) -> Option<&Period> {
        self.period.as_ref()
    }

    fn name(&self) -> &str {
        "Composite"
    }
}
