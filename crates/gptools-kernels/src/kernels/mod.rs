//! Covariance kernel variants.

pub mod diagonalkernel_traits;
pub mod expquadkernel_traits;
pub mod functions;
pub mod maternkernel_traits;
pub mod types;

// Re-export all types
pub use types::*;
