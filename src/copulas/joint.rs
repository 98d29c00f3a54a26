//! # Joint
//!
//! $$
//! \ln f(y)=\sum_{i=1}^{k}\ln f_i(y_i;\eta_i)+\ln c\big(F_1(y_1;\eta_1),\dots,F_k(y_k;\eta_k);\theta\big)
//! $$
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;
use ndarray::Axis;

use crate::copulas::boundary::contract_column;
use crate::copulas::boundary::stack_columns;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;
use crate::traits::CopulaExt;
use crate::traits::MarginalExt;

/// Joint distribution of `k_vars` variables: one copula, one marginal per variable.
///
/// Every evaluation takes optional `cop_args` and `marg_args`. `None` means the
/// stored copula arguments and the marginals' own parameters.
#[derive(Debug)]
pub struct JointDistribution<C: CopulaExt> {
  copula: C,
  marginals: Vec<Box<dyn MarginalExt>>,
  cop_args: Vec<f64>,
}

impl<C: CopulaExt> JointDistribution<C> {
  pub fn new(copula: C, marginals: Vec<Box<dyn MarginalExt>>, cop_args: Vec<f64>) -> Result<Self> {
    if marginals.len() != copula.k_dim() {
      return Err(CopulaError::DimensionMismatch {
        what: "marginal count",
        expected: copula.k_dim(),
        got: marginals.len(),
      });
    }

    Ok(Self {
      copula,
      marginals,
      cop_args,
    })
  }

  pub fn k_vars(&self) -> usize {
    self.marginals.len()
  }

  pub fn copula(&self) -> &C {
    &self.copula
  }

  pub fn marginals(&self) -> &[Box<dyn MarginalExt>] {
    &self.marginals
  }

  pub fn cop_args(&self) -> &[f64] {
    &self.cop_args
  }

  /// Draws `nobs` observations on the original scale.
  ///
  /// Uniform draws are pulled towards 0.5 by [`PPF_CONTRACTION`] before the
  /// marginal ppf, so exact 0 or 1 from the copula never reach the tails.
  ///
  /// [`PPF_CONTRACTION`]: crate::copulas::boundary::PPF_CONTRACTION
  pub fn rvs(
    &self,
    nobs: usize,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
    random_state: RandomState,
  ) -> Result<Array2<f64>> {
    let marg_args = self.resolve_marg_args(marg_args)?;
    let u = self
      .copula
      .rvs(nobs, self.resolve_cop_args(cop_args), random_state)?;

    if u.nrows() != nobs {
      return Err(CopulaError::DimensionMismatch {
        what: "copula sample rows",
        expected: nobs,
        got: u.nrows(),
      });
    }
    if u.ncols() != self.k_vars() {
      return Err(CopulaError::DimensionMismatch {
        what: "copula sample columns",
        expected: self.k_vars(),
        got: u.ncols(),
      });
    }

    let mut columns = Vec::with_capacity(self.k_vars());
    for (i, (marginal, params)) in self.marginals.iter().zip(&marg_args).enumerate() {
      let q = contract_column(u.column(i));
      let column = marginal.ppf(q.view(), params)?;

      if column.iter().any(|x| !x.is_finite()) {
        tracing::warn!(variable = i, ?marginal, "marginal ppf returned non-finite values");
      }
      columns.push(column);
    }

    tracing::debug!(nobs, k_vars = self.k_vars(), "drew joint sample");
    stack_columns(&columns, nobs)
  }

  /// `C(F_1(y_1), ..., F_k(y_k))` for each row of `y`.
  pub fn cdf(
    &self,
    y: &Array2<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<Array1<f64>> {
    self.check_obs(y.ncols())?;
    let marg_args = self.resolve_marg_args(marg_args)?;

    let columns = self
      .marginals
      .iter()
      .zip(&marg_args)
      .enumerate()
      .map(|(i, (marginal, params))| marginal.cdf(y.column(i), params))
      .collect::<Result<Vec<_>>>()?;
    let u = stack_columns(&columns, y.nrows())?;

    let cdf = self.copula.cdf(&u, self.resolve_cop_args(cop_args))?;
    tracing::debug!(nobs = y.nrows(), "evaluated joint cdf");
    Ok(cdf)
  }

  pub fn pdf(
    &self,
    y: &Array2<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<Array1<f64>> {
    Ok(self.logpdf(y, cop_args, marg_args)?.mapv(f64::exp))
  }

  pub fn logpdf(
    &self,
    y: &Array2<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<Array1<f64>> {
    self.check_obs(y.ncols())?;
    let marg_args = self.resolve_marg_args(marg_args)?;
    let nobs = y.nrows();

    let mut log_columns = Vec::with_capacity(self.k_vars());
    let mut cdf_columns = Vec::with_capacity(self.k_vars());
    for (i, (marginal, params)) in self.marginals.iter().zip(&marg_args).enumerate() {
      log_columns.push(marginal.logpdf(y.column(i), params)?);
      cdf_columns.push(marginal.cdf(y.column(i), params)?);
    }

    let log_marginals = stack_columns(&log_columns, nobs)?.sum_axis(Axis(1));
    let u = stack_columns(&cdf_columns, nobs)?;
    let log_copula = self.copula.logpdf(&u, self.resolve_cop_args(cop_args))?;

    if log_copula.len() != nobs {
      return Err(CopulaError::DimensionMismatch {
        what: "copula logpdf length",
        expected: nobs,
        got: log_copula.len(),
      });
    }

    tracing::debug!(nobs, "evaluated joint logpdf");
    Ok(log_marginals + log_copula)
  }

  pub fn cdf_one(
    &self,
    y: ArrayView1<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<f64> {
    let batch = self.single(y)?;
    first(self.cdf(&batch, cop_args, marg_args)?)
  }

  pub fn pdf_one(
    &self,
    y: ArrayView1<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<f64> {
    Ok(self.logpdf_one(y, cop_args, marg_args)?.exp())
  }

  pub fn logpdf_one(
    &self,
    y: ArrayView1<f64>,
    cop_args: Option<&[f64]>,
    marg_args: Option<&[Vec<f64>]>,
  ) -> Result<f64> {
    let batch = self.single(y)?;
    first(self.logpdf(&batch, cop_args, marg_args)?)
  }

  fn resolve_cop_args<'s>(&'s self, cop_args: Option<&'s [f64]>) -> &'s [f64] {
    cop_args.unwrap_or(&self.cop_args)
  }

  fn resolve_marg_args<'s>(&self, marg_args: Option<&'s [Vec<f64>]>) -> Result<Vec<&'s [f64]>> {
    let Some(marg_args) = marg_args else {
      let empty: &[f64] = &[];
      return Ok(vec![empty; self.k_vars()]);
    };

    if marg_args.len() != self.k_vars() {
      return Err(CopulaError::ArgumentCount {
        what: "marginal argument lists",
        expected: self.k_vars(),
        got: marg_args.len(),
      });
    }

    for (marginal, params) in self.marginals.iter().zip(marg_args) {
      if !params.is_empty() && params.len() != marginal.n_params() {
        return Err(CopulaError::ArgumentCount {
          what: "marginal parameters",
          expected: marginal.n_params(),
          got: params.len(),
        });
      }
    }

    Ok(marg_args.iter().map(Vec::as_slice).collect())
  }

  fn check_obs(&self, width: usize) -> Result<()> {
    if width != self.k_vars() {
      return Err(CopulaError::DimensionMismatch {
        what: "observation width",
        expected: self.k_vars(),
        got: width,
      });
    }
    Ok(())
  }

  fn single(&self, y: ArrayView1<f64>) -> Result<Array2<f64>> {
    self.check_obs(y.len())?;
    Ok(y.to_owned().insert_axis(Axis(0)))
  }
}

fn first(values: Array1<f64>) -> Result<f64> {
  values
    .first()
    .copied()
    .ok_or(CopulaError::DimensionMismatch {
      what: "single observation result",
      expected: 1,
      got: 0,
    })
}
