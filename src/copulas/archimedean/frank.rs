use gauss_quad::GaussLegendre;
use impl_new_derive::ImplNew;
use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use rand::Rng;
use roots::find_root_brent;
use roots::SimpleConvergency;

use super::check_theta;
use super::logarithmic;
use super::marshall_olkin;
use super::resolve_theta;
use crate::copulas::boundary::check_k_dim;
use crate::copulas::boundary::check_width;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;
use crate::traits::CopulaExt;

/// Gauss–Legendre nodes for the Debye integral.
const DEBYE_NODES: usize = 64;
/// The Debye integrand is below 1e-24 past this point.
const DEBYE_CUTOFF: f64 = 60.0;

/// Frank copula, generator `psi(t) = -ln(1 - (1 - e^(-theta)) e^(-t)) / theta`.
///
/// Any `theta` in two dimensions, `theta > 0` above that. `theta = 0` is
/// independence.
#[derive(ImplNew, Debug, Clone)]
pub struct Frank {
  pub theta: f64,
  pub k_dim: usize,
}

impl Frank {
  pub const THETA_BOUNDS: (f64, f64) = (f64::NEG_INFINITY, f64::INFINITY);

  pub fn bivariate(theta: f64) -> Self {
    Self::new(theta, 2)
  }

  /// Kendall's tau, `1 - 4 (1 - D_1(theta)) / theta`.
  pub fn tau(theta: f64) -> Result<f64> {
    Ok(Self::tau_with(&Self::quadrature()?, theta))
  }

  fn quadrature() -> Result<GaussLegendre> {
    GaussLegendre::new(DEBYE_NODES)
      .map_err(|e| CopulaError::Statistic(format!("quadrature: {e:?}")))
  }

  fn tau_with(quad: &GaussLegendre, theta: f64) -> f64 {
    if theta == 0.0 {
      return 0.0;
    }
    if theta < 0.0 {
      return -Self::tau_with(quad, -theta);
    }

    let integral = quad.integrate(0.0, theta.min(DEBYE_CUTOFF), |t: f64| t / t.exp_m1());
    let debye = integral / theta;
    1.0 - 4.0 * (1.0 - debye) / theta
  }

  fn theta(&self, args: &[f64]) -> Result<f64> {
    check_k_dim(self.k_dim)?;
    let theta = resolve_theta(self.theta, args)?;
    check_theta(theta, Self::THETA_BOUNDS, &[])?;

    if theta < 0.0 && self.k_dim != 2 {
      return Err(CopulaError::invalid(format!(
        "negative frank theta {} needs k_dim = 2, got {}",
        theta, self.k_dim
      )));
    }

    Ok(theta)
  }
}

impl CopulaExt for Frank {
  fn k_dim(&self) -> usize {
    self.k_dim
  }

  fn pdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if self.k_dim != 2 {
      return Err(CopulaError::NotImplemented("frank pdf for k_dim > 2"));
    }

    if theta == 0.0 {
      return Ok(Array1::ones(u.nrows()));
    }

    let em = -(-theta).exp_m1();
    Ok(u.map_axis(Axis(1), |row| {
      let (x, y) = (row[0], row[1]);
      let num = theta * em * (-theta * (x + y)).exp();
      let den = em - (-(-theta * x).exp_m1()) * (-(-theta * y).exp_m1());
      num / (den * den)
    }))
  }

  fn cdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    let theta = self.theta(args)?;

    if theta == 0.0 {
      return Ok(u.map_axis(Axis(1), |row| row.product()));
    }

    let den = (-theta).exp_m1().powi(self.k_dim as i32 - 1);
    Ok(u.map_axis(Axis(1), |row| {
      let num: f64 = row.iter().map(|x| (-theta * x).exp_m1()).product();
      -(num / den).ln_1p() / theta
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

    if self.k_dim == 2 {
      let em = (-theta).exp_m1();
      let mut sample = Array2::<f64>::zeros((nobs, 2));
      for mut row in sample.rows_mut() {
        let u: f64 = rng.gen();
        let w: f64 = rng.gen();
        let x = w * em / (w + (1.0 - w) * (-theta * u).exp());
        row[0] = u;
        row[1] = -x.ln_1p() / theta;
      }
      return Ok(sample);
    }

    let p = -(-theta).exp_m1();
    Ok(marshall_olkin(
      nobs,
      self.k_dim,
      &mut *rng,
      |r| logarithmic(-theta, r),
      |t| -(-p * (-t).exp()).ln_1p() / theta,
    ))
  }

  fn arg_from_tau(&self, tau: f64) -> Result<f64> {
    if !(-1.0..=1.0).contains(&tau) {
      return Err(CopulaError::invalid(format!("tau {tau} outside [-1, 1]")));
    }
    if tau == 0.0 {
      return Ok(0.0);
    }
    if tau.abs() == 1.0 {
      return Ok(tau * f64::INFINITY);
    }

    let quad = Self::quadrature()?;
    let target = tau.abs();

    let lower = 1e-8;
    let tau_lower = Self::tau_with(&quad, lower);
    if target <= tau_lower {
      // tau is theta / 9 near independence
      return Ok(9.0 * tau);
    }

    let mut upper = 1.0;
    while Self::tau_with(&quad, upper) < target {
      upper *= 2.0;
      if upper > 1e8 {
        return Err(CopulaError::Statistic(format!(
          "frank theta for tau {tau} out of range"
        )));
      }
    }

    let f = |theta: f64| Self::tau_with(&quad, theta) - target;
    let mut convergency = SimpleConvergency {
      eps: 1e-12,
      max_iter: 200,
    };
    let theta = find_root_brent(lower, upper, f, &mut convergency)
      .map_err(|e| CopulaError::Statistic(format!("frank tau inversion: {e:?}")))?;

    Ok(theta.copysign(tau))
  }
}
