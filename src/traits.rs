//! # Traits
//!
//! $$
//! c(u;\theta)=\frac{\partial^k C(u;\theta)}{\partial u_1\cdots\partial u_k},\qquad u\in[0,1]^k
//! $$
//!
use std::fmt::Debug;

use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use crate::copulas::correlation::kendall_tau;
use crate::copulas::correlation::mean_pairwise_tau;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;

/// Dependence structure on the unit hypercube.
///
/// Family parameters are passed per call through `args`. An empty slice means
/// the family's stored parameter.
pub trait CopulaExt {
  fn k_dim(&self) -> usize;

  /// Density at each row of `u`.
  fn pdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>>;

  /// Cumulative probability at each row of `u`.
  fn cdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>>;

  fn logpdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    Ok(self.pdf(u, args)?.mapv(f64::ln))
  }

  /// Draws `nobs` rows in `[0,1]^k_dim` with Uniform(0,1) columns.
  fn rvs(&self, _nobs: usize, _args: &[f64], _random_state: RandomState) -> Result<Array2<f64>> {
    Err(CopulaError::NotImplemented("rvs"))
  }

  /// Maps Kendall's tau to the family's dependence parameter.
  fn arg_from_tau(&self, _tau: f64) -> Result<f64> {
    Err(CopulaError::NotImplemented("arg_from_tau"))
  }

  /// Kendall's tau of the first two columns of a simulated sample.
  fn tau_simulated(&self, nobs: usize, random_state: RandomState) -> Result<f64> {
    let x = self.rvs(nobs, &[], random_state)?;
    if x.ncols() < 2 {
      return Err(CopulaError::DimensionMismatch {
        what: "tau_simulated sample",
        expected: 2,
        got: x.ncols(),
      });
    }

    let tau = kendall_tau(x.column(0), x.column(1))?;
    tracing::debug!(nobs, tau, "simulated kendall tau");
    Ok(tau)
  }

  /// Dependence parameter from the sample Kendall's tau of `data`.
  ///
  /// Two columns give a single pair. Otherwise the tau of every unordered pair
  /// among the first `k_dim` columns is averaged; extra columns are ignored.
  fn fit_corr_param(&self, data: &Array2<f64>) -> Result<f64> {
    let tau = if data.ncols() == 2 {
      kendall_tau(data.column(0), data.column(1))?
    } else {
      mean_pairwise_tau(data, self.k_dim())?
    };

    let param = self.arg_from_tau(tau)?;
    tracing::debug!(tau, param, "fitted dependence parameter from kendall tau");
    Ok(param)
  }
}

/// Univariate distribution used as a margin of a joint distribution.
///
/// `params` is either empty (stored parameters) or exactly `n_params()` long.
pub trait MarginalExt: Debug {
  fn n_params(&self) -> usize;

  fn cdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>>;

  /// Inverse cdf, `q` in `[0, 1]`.
  fn ppf(&self, q: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>>;

  fn pdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>>;

  fn logpdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    Ok(self.pdf(x, params)?.mapv(f64::ln))
  }
}
