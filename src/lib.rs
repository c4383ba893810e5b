//! Numerical core for diffusion-model estimation from diffusion-weighted
//! MRI volumes.
//!
//! Three coupled services back every model-estimation filter:
//!
//! - cached special-function evaluation ([`special`], [`explegendre`],
//!   accelerated by the lookup tables in [`lookup`]),
//! - a registry of precomputed unit-sphere gradient tables ([`gradients`]),
//! - a real spherical-harmonic basis engine with analytic tensor-model
//!   coefficients and coefficient rotation ([`sh`], [`rotation`]).
//!
//! [`estimation`] defines the contract concrete estimators implement on top;
//! image I/O, voxel-parallel scheduling, and parameter parsing belong to the
//! surrounding pipeline. All caches follow a warm-up-then-read discipline:
//! initialize on one thread, share read-only afterwards.

pub mod coords;
pub mod error;
pub mod estimation;
pub mod explegendre;
pub mod gradients;
pub mod linalg;
pub mod lookup;
pub mod rotation;
pub mod sampling;
pub mod sh;
pub mod special;

pub use error::DmriError;
pub use estimation::{DEFAULT_MD0, EstimationContext, ModelEstimator, fit_masked};
pub use explegendre::{exp_legendre_coef, exp_legendre_coef_derivative};
pub use gradients::{CoordinateMode, DirectionOptions, GradientTables, TESS_ROW_COUNTS};
pub use lookup::{FunctorTable, NegExpTable};
pub use rotation::{REFERENCE_TESS_ORDER, ShRotator};
pub use sampling::QSpaceSampling;
pub use sh::{
    DirectionConvention, dim_to_rank, rank_to_dim, real_sh, sh_basis_matrix, sh_index,
    symmetric_tensor_sh_coefficients, symmetric_tensor_sh_coefficients_derivative,
};
pub use special::{bessel_j, gamma, gamma_lower, laguerre, spherical_bessel_j};
