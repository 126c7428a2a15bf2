//! Serializable kernel specifications.
//!
//! A [`KernelSpec`] describes a kernel as plain data, e.g. loaded from JSON,
//! and [`KernelSpec::build`] turns it into a validated [`Kernel`]:
//!
//! ```rust
//! use gptools_kernels::{Covariance, KernelSpec};
//!
//! let spec: KernelSpec = serde_json::from_str(
//!     r#"{
//!         "kind": "composite",
//!         "operation": "add",
//!         "a": {"kind": "exp_quad", "sigma": 1.0, "length_scale": 0.5, "period": 4.0},
//!         "b": {"kind": "diagonal", "epsilon": 0.01, "period": 4.0}
//!     }"#,
//! )
//! .unwrap();
//! let kernel = spec.build().unwrap();
//! assert!(kernel.is_periodic());
//! assert_eq!(kernel.spec(), spec.build().unwrap().spec());
//! ```

use serde::{Deserialize, Serialize};

use crate::composite_kernel::{CompositeKernel, CompositeOp, Operand};
use crate::error::Result;
use crate::kernel::Kernel;
use crate::kernels::{DiagonalKernel, ExpQuadKernel, MaternKernel};
use crate::period::Period;
use crate::theta::ThetaConfig;
use crate::types::Covariance;

/// Period as written in a specification: one shared value or one per
/// dimension. Zero means no periodicity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PeriodSpec {
    /// Period shared by every dimension
    Uniform(f64),
    /// Period of each dimension
    PerDimension(Vec<f64>),
}

impl PeriodSpec {
    /// Validate into an optional [`Period`].
    pub fn build(&self) -> Result<Option<Period>> {
        match self {
            Self::Uniform(value) => Period::uniform(*value),
            Self::PerDimension(values) => Period::new(values.clone()),
        }
    }

    fn from_period(period: Option<&Period>) -> Option<Self> {
        period.map(|period| match period.values() {
            [value] => Self::Uniform(*value),
            values => Self::PerDimension(values.to_vec()),
        })
    }
}

/// Specification of a kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KernelSpec {
    /// Diagonal kernel
    Diagonal {
        #[serde(default = "default_epsilon")]
        epsilon: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        period: Option<PeriodSpec>,
    },
    /// Exponentiated quadratic kernel
    ExpQuad {
        sigma: f64,
        length_scale: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        period: Option<PeriodSpec>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        num_terms: Option<usize>,
        #[serde(default)]
        theta: ThetaConfig,
    },
    /// Matérn kernel
    Matern {
        dof: f64,
        sigma: f64,
        length_scale: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        period: Option<PeriodSpec>,
    },
    /// Composite kernel
    Composite {
        operation: CompositeOp,
        a: OperandSpec,
        b: OperandSpec,
    },
}

/// Specification of a composite operand: a constant or a nested kernel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperandSpec {
    /// Constant
    Scalar(f64),
    /// Nested kernel
    Kernel(Box<KernelSpec>),
}

fn default_epsilon() -> f64 {
    1.0
}

fn build_period(period: &Option<PeriodSpec>) -> Result<Option<Period>> {
    match period {
        Some(spec) => spec.build(),
        None => Ok(None),
    }
}

impl KernelSpec {
    /// Build a validated kernel.
    pub fn build(&self) -> Result<Kernel> {
        let kernel: Kernel = match self {
            Self::Diagonal { epsilon, period } => {
                DiagonalKernel::new(*epsilon, build_period(period)?)?.into()
            }
            Self::ExpQuad {
                sigma,
                length_scale,
                period,
                num_terms,
                theta,
            } => ExpQuadKernel::with_options(
                *sigma,
                *length_scale,
                build_period(period)?,
                *num_terms,
                theta.clone(),
            )?
            .into(),
            Self::Matern {
                dof,
                sigma,
                length_scale,
                period,
            } => MaternKernel::new(*dof, *sigma, *length_scale, build_period(period)?)?.into(),
            Self::Composite { operation, a, b } => {
                CompositeKernel::new(*operation, a.build()?, b.build()?)?.into()
            }
        };
        Ok(kernel)
    }
}

impl OperandSpec {
    /// Build a validated composite operand.
    pub fn build(&self) -> Result<Operand> {
        match self {
            Self::Scalar(value) => Ok(Operand::Scalar(*value)),
            Self::Kernel(spec) => spec.build().map(Operand::from),
        }
    }
}

impl Kernel {
    /// Specification that rebuilds this kernel.
    pub fn spec(&self) -> KernelSpec {
        match self {
            Kernel::Diagonal(kernel) => KernelSpec::Diagonal {
                epsilon: kernel.epsilon(),
                period: PeriodSpec::from_period(kernel.period()),
            },
            Kernel::ExpQuad(kernel) => KernelSpec::ExpQuad {
                sigma: kernel.sigma(),
                length_scale: kernel.length_scale(),
                period: PeriodSpec::from_period(kernel.period()),
                num_terms: kernel.num_terms(),
                theta: kernel.theta_config().clone(),
            },
            Kernel::Matern(kernel) => KernelSpec::Matern {
                dof: kernel.dof(),
                sigma: kernel.sigma(),
                length_scale: kernel.length_scale(),
                period: PeriodSpec::from_period(kernel.period()),
            },
            Kernel::Composite(kernel) => KernelSpec::Composite {
                operation: kernel.operation(),
                a: operand_spec(kernel.a()),
                b: operand_spec(kernel.b()),
            },
        }
    }
}

fn operand_spec(operand: &Operand) -> OperandSpec {
    match operand {
        Operand::Scalar(value) => OperandSpec::Scalar(*value),
        Operand::Kernel(kernel) => OperandSpec::Kernel(Box::new(kernel.spec())),
    }
}
