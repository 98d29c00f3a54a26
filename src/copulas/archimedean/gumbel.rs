use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use rand::Rng;

use super::check_theta;
use super::marshall_olkin;
use super::positive_stable;
use super::resolve_theta;
use crate::copulas::boundary::check_k_dim;
use crate::copulas::boundary::check_width;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;
use crate::traits::CopulaExt;

/// Gumbel copula, generator `psi(t) = exp(-t^(1/theta))`, `theta >= 1`.
#[derive(ImplNew, Debug, Clone)]
pub struct Gumbel {
  pub theta: f64,
  pub k_dim: usize,
}

impl Gumbel {
  pub const THETA_BOUNDS: (f64, f64) = (1.0, f64::INFINITY);

  pub fn bivariate(theta: f64) -> Self {
    Self::new(theta, 2)
  }

  pub fn tau(theta: f64) -> f64 {
    1.0 - 1.0 / theta
  }

  fn theta(&self, args: &[f64]) -> Result<f64> {
    check_k_dim(self.k_dim)?;
    let theta = resolve_theta(self.theta, args)?;
    check_theta(theta, Self::THETA_BOUNDS, &[])?;
    Ok(theta)
  }
}

impl CopulaExt for Gumbel {
  fn k_dim(&self) -> usize {
    self.k_dim
  }

  fn pdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if self.k_dim != 2 {
      return Err(CopulaError::NotImplemented("gumbel pdf for k_dim > 2"));
    }

    if theta == 1.0 {
      return Ok(Array1::ones(u.nrows()));
    }

    Ok(u.map_axis(Axis(1), |row| {
      let (x, y) = (row[0], row[1]);
      let (lx, ly) = (-x.ln(), -y.ln());
      let tmp = lx.powf(theta) + ly.powf(theta);

      let cdf = (-tmp.powf(1.0 / theta)).exp();
      let a = 1.0 / (x * y);
      let b = tmp.powf(-2.0 + 2.0 / theta);
      let c = (lx * ly).powf(theta - 1.0);
      let d = 1.0 + (theta - 1.0) * tmp.powf(-1.0 / theta);
      cdf * a * b * c * d
    }))
  }

  fn cdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if theta == 1.0 {
      return Ok(u.map_axis(Axis(1), |row| row.product()));
    }

    Ok(u.map_axis(Axis(1), |row| {
      let h: f64 = row.iter().map(|x| (-x.ln()).powf(theta)).sum();
      (-h.powf(1.0 / theta)).exp()
    }))
  }

  fn rvs(&self, nobs: usize, args: &[f64], random_state: RandomState) -> Result<Array2<f64>> {
    let theta = self.theta(args)?;
    let mut rng = random_state.rng();

    if theta == 1.0 {
      return Ok(Array2::from_shape_simple_fn((nobs, self.k_dim), || {
        rng.gen::<f64>()
      }));
    }

    let alpha = 1.0 / theta;
    Ok(marshall_olkin(
      nobs,
      self.k_dim,
      &mut *rng,
      |r| positive_stable(alpha, r),
      |t| (-t.powf(alpha)).exp(),
    ))
  }

  fn arg_from_tau(&self, tau: f64) -> Result<f64> {
    if tau == 1.0 {
      return Ok(f64::INFINITY);
    }

    Ok(1.0 / (1.0 - tau))
  }
}
