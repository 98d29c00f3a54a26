//! # copula-rs
//!
//! $$
//! f(y)=c\big(F_1(y_1),\dots,F_k(y_k)\big)\prod_{i=1}^{k}f_i(y_i)
//! $$
//!
//! Joint distributions assembled from a copula and arbitrary marginals.
//!
//! ## Modules
//!
//! | Module          | Description                                                              |
//! |-----------------|--------------------------------------------------------------------------|
//! | [`copulas`]     | Copula families, rank correlation and [`JointDistribution`].             |
//! | [`marginals`]   | `statrs` distributions exposed as marginals.                             |
//! | [`traits`]      | [`CopulaExt`] and [`MarginalExt`] contracts.                             |
//! | [`random`]      | [`RandomState`], the entropy source handed to every sampler.             |
//! | [`error`]       | [`CopulaError`] and the crate `Result`.                                  |
//!
//! ## Example Usage
//!
//! ```rust
//! use copula_rs::prelude::*;
//!
//! let joint = JointDistribution::new(
//!   Clayton::bivariate(2.0),
//!   vec![Box::new(Normal::standard()), Box::new(Gamma::new(2.0, 1.0))],
//!   vec![],
//! )?;
//! let y = joint.rvs(1000, None, None, RandomState::Seed(42))?;
//! let logpdf = joint.logpdf(&y, None, None)?;
//! ```
//!
pub mod copulas;
pub mod error;
pub mod marginals;
pub mod random;
pub mod traits;

pub use copulas::JointDistribution;
pub use error::CopulaError;
pub use random::RandomState;
pub use traits::CopulaExt;
pub use traits::MarginalExt;

pub mod prelude {
  pub use crate::copulas::Clayton;
  pub use crate::copulas::Frank;
  pub use crate::copulas::Gumbel;
  pub use crate::copulas::Independence;
  pub use crate::copulas::JointDistribution;
  pub use crate::error::CopulaError;
  pub use crate::marginals::Beta;
  pub use crate::marginals::Exponential;
  pub use crate::marginals::Frozen;
  pub use crate::marginals::Gamma;
  pub use crate::marginals::LogNormal;
  pub use crate::marginals::Normal;
  pub use crate::marginals::StudentT;
  pub use crate::marginals::Uniform;
  pub use crate::random::RandomState;
  pub use crate::traits::CopulaExt;
  pub use crate::traits::MarginalExt;
}
