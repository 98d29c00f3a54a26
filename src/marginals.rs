//! # Marginals
//!
//! $$
//! u_i=F_i(y_i;\eta_i),\qquad y_i=F_i^{-1}(u_i;\eta_i)
//! $$
//!
//! Adapters that expose `statrs` continuous distributions as [`MarginalExt`].
//! Each adapter stores default parameters; a call may override all of them
//! positionally.
//!
use std::fmt::Debug;

use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::ArrayView1;
use statrs::distribution as sd;
use statrs::distribution::Continuous;
use statrs::distribution::ContinuousCDF;

use crate::error::CopulaError;
use crate::error::Result;
use crate::traits::MarginalExt;

/// A marginal backed by a `statrs` distribution built from positional parameters.
pub trait StatrsMarginal: Debug {
  type Dist: Continuous<f64, f64> + ContinuousCDF<f64, f64>;

  const NAME: &'static str;

  fn defaults(&self) -> Vec<f64>;

  /// Fails with `ArgumentCount` unless `params` has exactly the adapter's arity.
  fn build(params: &[f64]) -> Result<Self::Dist>;

  fn resolve(&self, params: &[f64]) -> Result<Self::Dist> {
    let defaults = self.defaults();

    if params.is_empty() {
      return Self::build(&defaults);
    }
    if params.len() != defaults.len() {
      return Err(CopulaError::ArgumentCount {
        what: Self::NAME,
        expected: defaults.len(),
        got: params.len(),
      });
    }

    Self::build(params)
  }
}

impl<M: StatrsMarginal> MarginalExt for M {
  fn n_params(&self) -> usize {
    self.defaults().len()
  }

  fn cdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    let dist = self.resolve(params)?;
    Ok(x.mapv(|v| dist.cdf(v)))
  }

  fn ppf(&self, q: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    let dist = self.resolve(params)?;
    Ok(q.mapv(|p| dist.inverse_cdf(p)))
  }

  fn pdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    let dist = self.resolve(params)?;
    Ok(x.mapv(|v| dist.pdf(v)))
  }

  fn logpdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    let dist = self.resolve(params)?;
    Ok(x.mapv(|v| dist.ln_pdf(v)))
  }
}

fn arity(name: &'static str, expected: usize, params: &[f64]) -> CopulaError {
  CopulaError::ArgumentCount {
    what: name,
    expected,
    got: params.len(),
  }
}

fn invalid<E: std::fmt::Display>(name: &'static str) -> impl Fn(E) -> CopulaError {
  move |e| CopulaError::invalid(format!("{name}: {e}"))
}

/// Normal(mean, std_dev).
#[derive(ImplNew, Debug, Clone)]
pub struct Normal {
  pub mean: f64,
  pub std_dev: f64,
}

impl Normal {
  pub fn standard() -> Self {
    Self::new(0.0, 1.0)
  }
}

impl StatrsMarginal for Normal {
  type Dist = sd::Normal;
  const NAME: &'static str = "normal";

  fn defaults(&self) -> Vec<f64> {
    vec![self.mean, self.std_dev]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[mean, std_dev] = params else {
      return Err(arity(Self::NAME, 2, params));
    };
    sd::Normal::new(mean, std_dev).map_err(invalid(Self::NAME))
  }
}

/// LogNormal(location, scale) of the underlying normal.
#[derive(ImplNew, Debug, Clone)]
pub struct LogNormal {
  pub location: f64,
  pub scale: f64,
}

impl StatrsMarginal for LogNormal {
  type Dist = sd::LogNormal;
  const NAME: &'static str = "lognormal";

  fn defaults(&self) -> Vec<f64> {
    vec![self.location, self.scale]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[location, scale] = params else {
      return Err(arity(Self::NAME, 2, params));
    };
    sd::LogNormal::new(location, scale).map_err(invalid(Self::NAME))
  }
}

/// Gamma(shape, rate).
#[derive(ImplNew, Debug, Clone)]
pub struct Gamma {
  pub shape: f64,
  pub rate: f64,
}

impl StatrsMarginal for Gamma {
  type Dist = sd::Gamma;
  const NAME: &'static str = "gamma";

  fn defaults(&self) -> Vec<f64> {
    vec![self.shape, self.rate]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[shape, rate] = params else {
      return Err(arity(Self::NAME, 2, params));
    };
    sd::Gamma::new(shape, rate).map_err(invalid(Self::NAME))
  }
}

/// Exponential(rate).
#[derive(ImplNew, Debug, Clone)]
pub struct Exponential {
  pub rate: f64,
}

impl StatrsMarginal for Exponential {
  type Dist = sd::Exp;
  const NAME: &'static str = "exponential";

  fn defaults(&self) -> Vec<f64> {
    vec![self.rate]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[rate] = params else {
      return Err(arity(Self::NAME, 1, params));
    };
    sd::Exp::new(rate).map_err(invalid(Self::NAME))
  }
}

/// Student's t(location, scale, freedom).
#[derive(ImplNew, Debug, Clone)]
pub struct StudentT {
  pub location: f64,
  pub scale: f64,
  pub freedom: f64,
}

impl StatrsMarginal for StudentT {
  type Dist = sd::StudentsT;
  const NAME: &'static str = "student_t";

  fn defaults(&self) -> Vec<f64> {
    vec![self.location, self.scale, self.freedom]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[location, scale, freedom] = params else {
      return Err(arity(Self::NAME, 3, params));
    };
    sd::StudentsT::new(location, scale, freedom).map_err(invalid(Self::NAME))
  }
}

/// Uniform(min, max).
#[derive(ImplNew, Debug, Clone)]
pub struct Uniform {
  pub min: f64,
  pub max: f64,
}

impl StatrsMarginal for Uniform {
  type Dist = sd::Uniform;
  const NAME: &'static str = "uniform";

  fn defaults(&self) -> Vec<f64> {
    vec![self.min, self.max]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[min, max] = params else {
      return Err(arity(Self::NAME, 2, params));
    };
    sd::Uniform::new(min, max).map_err(invalid(Self::NAME))
  }
}

/// Beta(shape_a, shape_b).
#[derive(ImplNew, Debug, Clone)]
pub struct Beta {
  pub shape_a: f64,
  pub shape_b: f64,
}

impl StatrsMarginal for Beta {
  type Dist = sd::Beta;
  const NAME: &'static str = "beta";

  fn defaults(&self) -> Vec<f64> {
    vec![self.shape_a, self.shape_b]
  }

  fn build(params: &[f64]) -> Result<Self::Dist> {
    let &[shape_a, shape_b] = params else {
      return Err(arity(Self::NAME, 2, params));
    };
    sd::Beta::new(shape_a, shape_b).map_err(invalid(Self::NAME))
  }
}

/// Any pre-built `statrs` distribution, without parameters.
#[derive(Debug, Clone)]
pub struct Frozen<D>(pub D);

impl<D> MarginalExt for Frozen<D>
where
  D: Continuous<f64, f64> + ContinuousCDF<f64, f64> + Debug,
{
  fn n_params(&self) -> usize {
    0
  }

  fn cdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    check_frozen(params)?;
    Ok(x.mapv(|v| self.0.cdf(v)))
  }

  fn ppf(&self, q: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    check_frozen(params)?;
    Ok(q.mapv(|p| self.0.inverse_cdf(p)))
  }

  fn pdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    check_frozen(params)?;
    Ok(x.mapv(|v| self.0.pdf(v)))
  }

  fn logpdf(&self, x: ArrayView1<f64>, params: &[f64]) -> Result<Array1<f64>> {
    check_frozen(params)?;
    Ok(x.mapv(|v| self.0.ln_pdf(v)))
  }
}

fn check_frozen(params: &[f64]) -> Result<()> {
  if !params.is_empty() {
    return Err(CopulaError::ArgumentCount {
      what: "frozen marginal",
      expected: 0,
      got: params.len(),
    });
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn normal_matches_closed_form() {
    let n = Normal::standard();
    let x = array![0.0, 1.0];

    let cdf = n.cdf(x.view(), &[]).unwrap();
    assert_abs_diff_eq!(cdf[0], 0.5, epsilon = 1e-15);
    assert_abs_diff_eq!(cdf[1], 0.841_344_746_068_543, epsilon = 1e-10);

    let logpdf = n.logpdf(x.view(), &[]).unwrap();
    assert_relative_eq!(logpdf[1], -0.5 - 0.5 * (2.0 * std::f64::consts::PI).ln(), epsilon = 1e-12);
  }

  #[test]
  fn call_time_parameters_override_defaults() {
    let n = Normal::standard();
    let x = array![3.0];
    let shifted = n.cdf(x.view(), &[3.0, 2.0]).unwrap();
    assert_abs_diff_eq!(shifted[0], 0.5, epsilon = 1e-15);
  }

  #[test]
  fn arity_is_validated() {
    let g = Gamma::new(2.0, 1.0);
    assert_eq!(g.n_params(), 2);
    assert!(matches!(
      g.pdf(array![1.0].view(), &[2.0]),
      Err(CopulaError::ArgumentCount {
        expected: 2,
        got: 1,
        ..
      })
    ));
  }

  #[test]
  fn build_rejects_wrong_parameter_count() {
    assert!(matches!(
      Normal::build(&[]),
      Err(CopulaError::ArgumentCount {
        expected: 2,
        got: 0,
        ..
      })
    ));
    assert!(matches!(
      StudentT::build(&[0.0, 1.0]),
      Err(CopulaError::ArgumentCount {
        expected: 3,
        got: 2,
        ..
      })
    ));
    assert!(Exponential::build(&[1.0, 2.0]).is_err());
  }

  #[test]
  fn invalid_parameters_are_reported() {
    let n = Normal::new(0.0, -1.0);
    assert!(matches!(
      n.cdf(array![0.0].view(), &[]),
      Err(CopulaError::InvalidParameter(_))
    ));
  }

  #[test]
  fn ppf_inverts_cdf() {
    let marginals: Vec<Box<dyn MarginalExt>> = vec![
      Box::new(Normal::new(1.0, 2.0)),
      Box::new(Gamma::new(2.0, 1.5)),
      Box::new(Exponential::new(0.7)),
      Box::new(LogNormal::new(0.0, 0.5)),
      Box::new(Uniform::new(-1.0, 3.0)),
      Box::new(Beta::new(2.0, 5.0)),
    ];
    let q = array![0.05, 0.3, 0.5, 0.9];

    for m in &marginals {
      let x = m.ppf(q.view(), &[]).unwrap();
      let back = m.cdf(x.view(), &[]).unwrap();
      for (a, b) in q.iter().zip(back.iter()) {
        assert_abs_diff_eq!(a, b, epsilon = 1e-4);
      }
    }
  }

  #[test]
  fn frozen_takes_no_parameters() {
    let f = Frozen(sd::Normal::new(0.0, 1.0).unwrap());
    assert_eq!(f.n_params(), 0);
    assert_abs_diff_eq!(f.cdf(array![0.0].view(), &[]).unwrap()[0], 0.5, epsilon = 1e-15);
    assert!(f.cdf(array![0.0].view(), &[1.0]).is_err());
  }

  #[test]
  fn student_t_has_three_parameters() {
    let t = StudentT::new(0.0, 1.0, 4.0);
    assert_eq!(t.n_params(), 3);
    let pdf = t.pdf(array![0.0].view(), &[]).unwrap();
    // 3 / 8 for nu = 4
    assert_abs_diff_eq!(pdf[0], 0.375, epsilon = 1e-12);
  }
}
