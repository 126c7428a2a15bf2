//! Numeric backend adapter for gptools.
//!
//! This crate supplies the elementwise math and array primitives the kernels
//! are written against, on top of the SciRS2 `ndarray` re-export.
//!
//! ## Dispatch
//!
//! Kernels never name a concrete float type. They are generic over
//! [`Scalar`], which is implemented for `f32` and `f64`; passing an
//! `ArrayD<f32>` or an `ArrayD<f64>` selects the matching primitive set at
//! compile time, and [`Scalar::precision`] reports which one is in use.
//!
//! ## Module Organization
//!
//! - `precision`: the [`Scalar`] capability trait and the [`Precision`] tag
//! - `ops`: `eye`, `arange`, `max`, `allclose` and broadcasting helpers
//! - `grid`: Cartesian-product coordinate grids
//! - `fft`: Hermitian expansion of real half-spectra and a direct real DFT
//! - `error`: shape and operation errors
//!
//! ```rust
//! use gptools_backend::{ops, Precision, Scalar};
//!
//! let identity = ops::eye::<f32>(3);
//! assert_eq!(identity.sum(), 3.0);
//! assert_eq!(<f32 as Scalar>::precision(), Precision::F32);
//! ```

pub mod error;
pub mod fft;
pub mod grid;
pub mod ops;
pub mod precision;

pub use error::{BackendError, BackendResult, ShapeMismatchError};
pub use fft::{expand_rfft, rfft, rfft_len};
pub use grid::coordgrid;
pub use ops::{allclose, arange, broadcast_shape, broadcast_zip, eye, max};
pub use precision::{Precision, Scalar};
