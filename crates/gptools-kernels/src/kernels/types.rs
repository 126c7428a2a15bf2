//! Kernel variant definitions and constructors.

use std::f64::consts::PI;

use crate::error::{KernelError, Result};
use crate::period::Period;
use crate::theta::{jtheta_num_terms, ThetaConfig};
use crate::types::{require_non_negative, require_positive};

/// Diagonal kernel with "nugget" variance: K = ε I.
///
/// The kernel can only be evaluated pairwise for a single set of points, not
/// for the Cartesian product of two different sets of points.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagonalKernel {
    /// Nugget variance
    pub(super) epsilon: f64,
    /// Period of circular boundary conditions
    pub(super) period: Option<Period>,
}

impl DiagonalKernel {
    /// Create a new diagonal kernel
    ///
    /// # Arguments
    /// * `epsilon` - Nugget variance (must be non-negative)
    /// * `period` - Period for circular boundary conditions
    ///
    /// # Examples
    /// ```
    /// use gptools_kernels::{Covariance, DiagonalKernel};
    /// use scirs2_core::ndarray::array;
    ///
    /// let kernel = DiagonalKernel::new(0.1, None).unwrap();
    /// let x = array![[0.0], [1.0]].into_dyn();
    /// let cov = kernel.evaluate(&x, None).unwrap();
    /// assert_eq!(cov[[0, 0]], 0.1);
    /// assert_eq!(cov[[0, 1]], 0.0);
    /// ```
    pub fn new(epsilon: f64, period: Option<Period>) -> Result<Self> {
        require_non_negative("epsilon", epsilon)?;
        Ok(Self { epsilon, period })
    }

    /// Get the nugget variance
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for DiagonalKernel {
    fn default() -> Self {
        Self {
            epsilon: 1.0,
            period: None,
        }
    }
}

/// Exponentiated quadratic kernel, or the solution of the heat equation if
/// the kernel is periodic.
///
/// On a Euclidean domain, K(x, y) = σ² exp(-‖x - y‖² / 2ℓ²). On a periodic
/// domain, each dimension with period P contributes the heat kernel on the
/// circle after relaxation time t = 2(πℓ/P)²,
///
/// ```text
/// K_d(r) = sqrt(t/π) θ₃(exp(-t), r/P)
/// ```
///
/// and the dimension factors multiply.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpQuadKernel {
    /// Scale of the covariance
    pub(super) sigma: f64,
    /// Correlation length
    pub(super) length_scale: f64,
    /// Period of circular boundary conditions
    pub(super) period: Option<Period>,
    /// Relaxation time and series length of the periodic heat kernel
    pub(super) heat: Option<HeatSeries>,
    /// Theta series configuration
    pub(super) theta: ThetaConfig,
}

/// Derived parameters of a periodic heat kernel.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct HeatSeries {
    /// Relaxation time per period value
    pub(super) time: Vec<f64>,
    /// Number of theta series terms
    pub(super) num_terms: usize,
}

impl ExpQuadKernel {
    /// Create a new exponentiated quadratic kernel
    ///
    /// # Arguments
    /// * `sigma` - Scale of the covariance (must be non-negative)
    /// * `length_scale` - Correlation length (must be positive)
    /// * `period` - Period for circular boundary conditions
    ///
    /// # Examples
    /// ```
    /// use gptools_kernels::{Covariance, ExpQuadKernel, Period};
    /// use scirs2_core::ndarray::array;
    ///
    /// let kernel = ExpQuadKernel::new(1.0, 0.5, Period::uniform(4.0).unwrap()).unwrap();
    /// let x = array![[0.0], [1.0], [3.5]].into_dyn();
    /// let cov = kernel.evaluate(&x, None).unwrap();
    /// assert_eq!(cov.shape(), &[3, 3]);
    /// ```
    pub fn new(sigma: f64, length_scale: f64, period: Option<Period>) -> Result<Self> {
        Self::with_options(sigma, length_scale, period, None, ThetaConfig::default())
    }

    /// Create a kernel with an explicit number of series terms and theta
    /// configuration.
    ///
    /// `num_terms` defaults to the number of terms that reaches the relative
    /// tolerance of `theta` for the slowest-converging dimension.
    pub fn with_options(
        sigma: f64,
        length_scale: f64,
        period: Option<Period>,
        num_terms: Option<usize>,
        theta: ThetaConfig,
    ) -> Result<Self> {
        require_non_negative("sigma", sigma)?;
        require_positive("length_scale", length_scale)?;
        theta.validate()?;
        if num_terms == Some(0) {
            return Err(KernelError::invalid_parameter(
                "num_terms",
                0,
                "num_terms must be positive",
            ));
        }

        let heat = period.as_ref().map(|period| {
            let time: Vec<f64> = period
                .values()
                .iter()
                .map(|p| 2.0 * (PI * length_scale / p).powi(2))
                .collect();
            let q_max = time.iter().map(|t| (-t).exp()).fold(0.0, f64::max);
            let num_terms = num_terms.unwrap_or_else(|| jtheta_num_terms(q_max, theta.rtol));
            log::debug!(
                "ExpQuad heat kernel: time={:?}, nome={:.6}, num_terms={}",
                time,
                q_max,
                num_terms
            );
            HeatSeries { time, num_terms }
        });

        Ok(Self {
            sigma,
            length_scale,
            period,
            heat,
            theta,
        })
    }

    /// Get the scale parameter
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the length scale parameter
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }

    /// Relaxation time of the heat kernel per period value (periodic only)
    pub fn time(&self) -> Option<&[f64]> {
        self.heat.as_ref().map(|heat| heat.time.as_slice())
    }

    /// Number of theta series terms (periodic only)
    pub fn num_terms(&self) -> Option<usize> {
        self.heat.as_ref().map(|heat| heat.num_terms)
    }

    /// Theta series configuration
    pub fn theta_config(&self) -> &ThetaConfig {
        &self.theta
    }
}

/// Smoothness of a Matérn kernel.
///
/// Only the half-integer cases with closed-form covariance are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaternDof {
    /// ν = 3/2, once-differentiable sample paths
    ThreeHalves,
    /// ν = 5/2, twice-differentiable sample paths
    FiveHalves,
}

impl MaternDof {
    /// Parse the smoothness parameter.
    pub fn from_value(dof: f64) -> Result<Self> {
        if dof == 1.5 {
            Ok(Self::ThreeHalves)
        } else if dof == 2.5 {
            Ok(Self::FiveHalves)
        } else {
            Err(KernelError::invalid_parameter(
                "dof",
                dof,
                "dof must be one of 1.5 or 2.5",
            ))
        }
    }

    /// Numeric value of the smoothness parameter.
    pub fn value(self) -> f64 {
        match self {
            Self::ThreeHalves => 1.5,
            Self::FiveHalves => 2.5,
        }
    }
}

/// Matérn covariance function with half-integer smoothness.
///
/// With scaled distance d = sqrt(2ν) ‖x - y‖ / ℓ,
/// - ν = 3/2: K = σ² (1 + d) exp(-d)
/// - ν = 5/2: K = σ² (1 + d + d²/3) exp(-d)
///
/// Periodic Matérn kernels have no closed-form covariance here, only a
/// closed-form real FFT on regular grids.
#[derive(Debug, Clone, PartialEq)]
pub struct MaternKernel {
    /// Smoothness parameter
    pub(super) dof: MaternDof,
    /// Scale of the covariance
    pub(super) sigma: f64,
    /// Correlation length
    pub(super) length_scale: f64,
    /// Period of circular boundary conditions
    pub(super) period: Option<Period>,
}

impl MaternKernel {
    /// Create a new Matérn kernel
    ///
    /// # Arguments
    /// * `dof` - Smoothness parameter (1.5 or 2.5)
    /// * `sigma` - Scale of the covariance (must be non-negative)
    /// * `length_scale` - Correlation length (must be positive)
    /// * `period` - Period for circular boundary conditions
    ///
    /// # Examples
    /// ```
    /// use gptools_kernels::{Covariance, MaternKernel, Period};
    ///
    /// let kernel = MaternKernel::new(2.5, 1.0, 1.0, Period::uniform(10.0).unwrap()).unwrap();
    /// let rfft = kernel.evaluate_rfft::<f64>(&[16]).unwrap();
    /// assert_eq!(rfft.shape(), &[9]);
    ///
    /// assert!(MaternKernel::new(0.5, 1.0, 1.0, None).is_err());
    /// ```
    pub fn new(dof: f64, sigma: f64, length_scale: f64, period: Option<Period>) -> Result<Self> {
        let dof = MaternDof::from_value(dof)?;
        require_non_negative("sigma", sigma)?;
        require_positive("length_scale", length_scale)?;
        Ok(Self {
            dof,
            sigma,
            length_scale,
            period,
        })
    }

    /// Get the smoothness parameter
    pub fn dof(&self) -> f64 {
        self.dof.value()
    }

    /// Get the scale parameter
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Get the length scale parameter
    pub fn length_scale(&self) -> f64 {
        self.length_scale
    }
}
