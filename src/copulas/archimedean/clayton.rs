use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use rand::Rng;
use rand_distr::Distribution;
use rand_distr::Gamma;

use super::check_theta;
use super::marshall_olkin;
use super::resolve_theta;
use crate::copulas::boundary::check_k_dim;
use crate::copulas::boundary::check_width;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;
use crate::traits::CopulaExt;

/// Clayton copula, generator `psi(t) = (1 + t)^(-1/theta)`.
///
/// `theta > 0` works in any dimension, `theta` in `[-1, 0)` only for `k_dim = 2`,
/// `theta = 0` is independence.
#[derive(ImplNew, Debug, Clone)]
pub struct Clayton {
  pub theta: f64,
  pub k_dim: usize,
}

impl Clayton {
  pub const THETA_BOUNDS: (f64, f64) = (-1.0, f64::INFINITY);

  pub fn bivariate(theta: f64) -> Self {
    Self::new(theta, 2)
  }

  /// Closed-form Kendall's tau.
  pub fn tau(theta: f64) -> f64 {
    theta / (theta + 2.0)
  }

  fn theta(&self, args: &[f64]) -> Result<f64> {
    check_k_dim(self.k_dim)?;
    let theta = resolve_theta(self.theta, args)?;
    check_theta(theta, Self::THETA_BOUNDS, &[])?;

    if theta < 0.0 && self.k_dim != 2 {
      return Err(CopulaError::invalid(format!(
        "negative clayton theta {} needs k_dim = 2, got {}",
        theta, self.k_dim
      )));
    }

    Ok(theta)
  }
}

impl CopulaExt for Clayton {
  fn k_dim(&self) -> usize {
    self.k_dim
  }

  fn pdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    Ok(self.logpdf(u, args)?.mapv(f64::exp))
  }

  fn logpdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if theta == 0.0 {
      return Ok(Array1::zeros(u.nrows()));
    }

    let k = self.k_dim as f64;
    let norm: f64 = (1..self.k_dim).map(|j| (j as f64 * theta).ln_1p()).sum();

    Ok(u.map_axis(Axis(1), |row| {
      let base = row.iter().map(|x| x.powf(-theta)).sum::<f64>() - k + 1.0;
      if base <= 0.0 {
        return f64::NEG_INFINITY;
      }
      let log_u: f64 = row.iter().map(|x| x.ln()).sum();
      norm - (1.0 + theta) * log_u - (k + 1.0 / theta) * base.ln()
    }))
  }

  fn cdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if theta == 0.0 {
      return Ok(u.map_axis(Axis(1), |row| row.product()));
    }

    let k = self.k_dim as f64;
    Ok(u.map_axis(Axis(1), |row| {
      let base = row.iter().map(|x| x.powf(-theta)).sum::<f64>() - k + 1.0;
      base.max(0.0).powf(-1.0 / theta)
    }))
  }

  fn rvs(&self, nobs: usize, args: &[f64], random_state: RandomState) -> Result<Array2<f64>> {
    let theta = self.theta(args)?;
    let mut rng = random_state.rng();

    if theta == 0.0 {
      return Ok(Array2::from_shape_simple_fn((nobs, self.k_dim), || {
        rng.gen::<f64>()
      }));
    }

    if theta > 0.0 {
      let gamma = Gamma::new(1.0 / theta, 1.0)
        .map_err(|e| CopulaError::invalid(format!("clayton mixing: {e}")))?;

      return Ok(marshall_olkin(
        nobs,
        self.k_dim,
        &mut *rng,
        |r| gamma.sample(r),
        |t| (1.0 + t).powf(-1.0 / theta),
      ));
    }

    // negative dependence, conditional inversion of C(v | u)
    let mut sample = Array2::<f64>::zeros((nobs, 2));
    let exponent = -theta / (1.0 + theta);
    for mut row in sample.rows_mut() {
      let u: f64 = rng.gen();
      let w: f64 = rng.gen();
      let base = u.powf(-theta) * (w.powf(exponent) - 1.0) + 1.0;
      row[0] = u;
      row[1] = base.max(0.0).powf(-1.0 / theta);
    }

    Ok(sample)
  }

  fn arg_from_tau(&self, tau: f64) -> Result<f64> {
    if tau == 1.0 {
      return Ok(f64::INFINITY);
    }

    Ok(2.0 * tau / (1.0 - tau))
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use approx::assert_relative_eq;
  use ndarray::array;

  use super::*;
  use crate::copulas::correlation::kendall_tau;

  const N: usize = 5000;

  fn ks_uniform(column: Vec<f64>) -> f64 {
    let mut sorted = column;
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len() as f64;
    sorted
      .iter()
      .enumerate()
      .map(|(i, &x)| ((i as f64 + 1.0) / n - x).abs().max((x - i as f64 / n).abs()))
      .fold(0.0, f64::max)
  }

  #[test]
  fn cdf_closed_form() {
    let c = Clayton::bivariate(2.0);
    let u = array![[0.5, 0.8], [1.0, 0.3], [0.0, 0.4]];
    let cdf = c.cdf(&u, &[]).unwrap();

    assert_relative_eq!(cdf[0], (4.0f64 + 1.5625 - 1.0).powf(-0.5), epsilon = 1e-12);
    assert_relative_eq!(cdf[1], 0.3, epsilon = 1e-12);
    assert_eq!(cdf[2], 0.0);
  }

  #[test]
  fn pdf_integrates_to_one() {
    let c = Clayton::bivariate(2.0);
    let m = 200;
    let grid = Array2::from_shape_fn((m * m, 2), |(i, j)| {
      let idx = if j == 0 { i / m } else { i % m };
      (idx as f64 + 0.5) / m as f64
    });
    let mass = c.pdf(&grid, &[]).unwrap().sum() / (m * m) as f64;
    assert_abs_diff_eq!(mass, 1.0, epsilon = 0.01);
  }

  #[test]
  fn pdf_is_exp_of_logpdf() {
    let c = Clayton::new(1.5, 3);
    let u = array![[0.2, 0.4, 0.9], [0.7, 0.6, 0.5]];
    let pdf = c.pdf(&u, &[]).unwrap();
    let logpdf = c.logpdf(&u, &[]).unwrap();
    for i in 0..2 {
      assert_eq!(pdf[i], logpdf[i].exp());
    }
  }

  #[test]
  fn args_override_stored_theta() {
    let c = Clayton::bivariate(2.0);
    let u = array![[0.3, 0.6]];
    let stored = c.cdf(&u, &[]).unwrap();
    let other = c.cdf(&u, &[5.0]).unwrap();
    let explicit = Clayton::bivariate(5.0).cdf(&u, &[]).unwrap();

    assert_ne!(stored[0], other[0]);
    assert_eq!(other[0], explicit[0]);
  }

  #[test]
  fn zero_theta_is_independence() {
    let c = Clayton::bivariate(0.0);
    let u = array![[0.3, 0.6]];
    assert_relative_eq!(c.cdf(&u, &[]).unwrap()[0], 0.18, epsilon = 1e-15);
    assert_eq!(c.pdf(&u, &[]).unwrap()[0], 1.0);
  }

  #[test]
  fn rvs_margins_are_uniform() {
    let c = Clayton::new(2.0, 3);
    let sample = c.rvs(N, &[], RandomState::Seed(42)).unwrap();
    assert_eq!(sample.dim(), (N, 3));

    for column in sample.columns() {
      assert!(column.iter().all(|&x| (0.0..=1.0).contains(&x)));
      assert!(ks_uniform(column.to_vec()) < 2.0 / (N as f64).sqrt());
    }
  }

  #[test]
  fn rvs_matches_closed_form_tau() {
    for &theta in &[-0.5, 1.0, 4.0] {
      let c = Clayton::bivariate(theta);
      let sample = c.rvs(N, &[], RandomState::Seed(7)).unwrap();
      let tau = kendall_tau(sample.column(0), sample.column(1)).unwrap();
      assert_abs_diff_eq!(tau, Clayton::tau(theta), epsilon = 0.03);
    }
  }

  #[test]
  fn fit_recovers_theta() {
    let c = Clayton::bivariate(3.0);
    let sample = c.rvs(N, &[], RandomState::Seed(1)).unwrap();
    let theta = c.fit_corr_param(&sample).unwrap();
    assert_abs_diff_eq!(theta, 3.0, epsilon = 0.4);
  }

  #[test]
  fn simulated_tau_matches_closed_form() {
    for &theta in &[-0.5, 3.0] {
      let c = Clayton::bivariate(theta);
      let tau = c.tau_simulated(N, RandomState::Seed(31)).unwrap();
      assert_abs_diff_eq!(tau, Clayton::tau(theta), epsilon = 0.03);
    }
  }

  #[test]
  fn fit_ignores_columns_beyond_k_dim() {
    let c = Clayton::bivariate(3.0);
    let pair = c.rvs(N, &[], RandomState::Seed(5)).unwrap();
    let noise = Clayton::bivariate(0.0).rvs(N, &[], RandomState::Seed(6)).unwrap();
    let data = ndarray::concatenate![Axis(1), pair, noise.slice(ndarray::s![.., 0..1])];
    assert_eq!(data.ncols(), 3);

    let tau = kendall_tau(pair.column(0), pair.column(1)).unwrap();
    assert_relative_eq!(
      c.fit_corr_param(&data).unwrap(),
      c.arg_from_tau(tau).unwrap(),
      epsilon = 1e-12
    );
  }

  #[test]
  fn one_dimension_is_rejected() {
    let c = Clayton::new(2.0, 1);
    assert!(matches!(
      c.cdf(&array![[0.5]], &[]),
      Err(CopulaError::InvalidParameter(_))
    ));
  }

  #[test]
  fn negative_theta_needs_two_dimensions() {
    let c = Clayton::new(-0.5, 3);
    assert!(matches!(
      c.rvs(10, &[], RandomState::Seed(1)),
      Err(CopulaError::InvalidParameter(_))
    ));
  }

  #[test]
  fn theta_below_minus_one_is_rejected() {
    let c = Clayton::bivariate(-2.0);
    assert!(c.cdf(&array![[0.5, 0.5]], &[]).is_err());
  }
}
