//! gptools - Gaussian-process covariance kernels
//!
//! This is the top-level umbrella crate that re-exports all gptools components.
//!
//! # Architecture
//!
//! - **Backend Layer**: `backend` (scalar dispatch, array primitives, grids, spectra)
//! - **Kernel Layer**: `kernels` (distances, theta series, covariance kernels, composition)
//!
//! ```rust
//! use gptools::prelude::*;
//!
//! let kernel = MaternKernel::new(1.5, 1.0, 0.5, Period::uniform(8.0).unwrap()).unwrap();
//! let spectrum = kernel.evaluate_rfft::<f64>(&[64]).unwrap();
//! assert_eq!(spectrum.len(), 33);
//! ```

pub use gptools_backend as backend;
pub use gptools_kernels as kernels;

/// Commonly used kernel types and traits.
pub mod prelude {
    pub use gptools_backend::{Precision, Scalar};
    pub use gptools_kernels::{
        CompositeKernel, CompositeOp, Covariance, DiagonalKernel, ExpQuadKernel, Kernel,
        KernelError, KernelSpec, MaternKernel, Period,
    };
}
