//! # gptools-kernels
//!
//! Covariance kernels for Gaussian processes on Euclidean and periodic
//! domains, with closed-form Fourier representations for FFT-based inference.
//!
//! ## Features
//!
//! - **Distances** - Residuals and squared distances with periodic wrap-around
//! - **Theta series** - Batched evaluation of the Jacobi theta function and
//!   its real FFT
//! - **Kernels** - Diagonal (nugget), exponentiated quadratic / heat, and
//!   half-integer Matérn kernels
//! - **Composition** - Sums and products of kernels and constants with
//!   periodicity checks
//! - **Configuration** - Serde kernel specifications
//!
//! ## Architecture
//!
//! ### Covariance Trait
//!
//! All kernels implement the [`Covariance`] trait. Coordinates have shape
//! `(..., n, p)`; evaluation without a second point set gives covariance
//! matrices of shape `(..., n, n)`:
//!
//! ```rust
//! use gptools_kernels::{Covariance, ExpQuadKernel};
//! use scirs2_core::ndarray::array;
//!
//! let kernel = ExpQuadKernel::new(1.0, 0.5, None).unwrap();
//! let x = array![[0.0, 0.0], [0.5, 0.5], [1.0, 0.0]].into_dyn();
//! let cov = kernel.evaluate(&x, None).unwrap();
//! assert_eq!(cov.shape(), &[3, 3]);
//! assert_eq!(cov[[1, 1]], 1.0);
//! ```
//!
//! ### Periodic Kernels
//!
//! Kernels with a [`Period`] live on a torus. Their covariance on a regular
//! grid is circulant, so its eigenvalues are the real FFT of the kernel,
//! available in closed form through [`Covariance::evaluate_rfft`]:
//!
//! ```rust
//! use gptools_kernels::{Covariance, ExpQuadKernel, Period};
//!
//! let kernel = ExpQuadKernel::new(1.0, 0.5, Period::uniform(10.0).unwrap()).unwrap();
//! let spectrum = kernel.evaluate_rfft::<f64>(&[32, 20]).unwrap();
//! assert_eq!(spectrum.shape(), &[32, 11]);
//! ```
//!
//! A period of zero means "not periodic", so `Period::uniform(0.0)` yields
//! `None`.
//!
//! ### Kernel Composition
//!
//! ```rust
//! use gptools_kernels::{Covariance, DiagonalKernel, MaternKernel};
//!
//! let signal = MaternKernel::new(1.5, 1.0, 2.0, None).unwrap();
//! let noise = DiagonalKernel::new(0.01, None).unwrap();
//! let kernel = (signal + noise).unwrap();
//! assert_eq!(kernel.name(), "Composite");
//! ```
//!
//! ## Precision
//!
//! Evaluation is generic over [`gptools_backend::Scalar`], so both `f32` and
//! `f64` coordinates are accepted. Hyperparameters are stored as `f64`.

pub mod composite_kernel;
pub mod config;
pub mod distance;
pub mod error;
pub mod kernel;
pub mod kernels;
pub mod period;
pub mod special;
pub mod theta;
pub mod types;

pub use composite_kernel::{CompositeKernel, CompositeOp, Operand};
pub use config::{KernelSpec, OperandSpec, PeriodSpec};
pub use distance::{evaluate_residuals, evaluate_squared_distance, wrap_residuals};
pub use error::{KernelError, Result};
pub use kernel::Kernel;
pub use kernels::{DiagonalKernel, ExpQuadKernel, MaternDof, MaternKernel};
pub use period::Period;
pub use theta::{jtheta, jtheta_num_terms, jtheta_rfft, ThetaConfig};
pub use types::Covariance;
