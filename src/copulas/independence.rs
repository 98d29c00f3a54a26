use ndarray::Array1;
use ndarray::Array2;
use ndarray::Axis;
use ndarray_rand::RandomExt;
use rand_distr::Uniform;

use crate::copulas::boundary::check_k_dim;
use crate::copulas::boundary::check_width;
use crate::error::CopulaError;
use crate::error::Result;
use crate::random::RandomState;
use crate::traits::CopulaExt;

/// Product copula, `C(u) = u_1 * ... * u_k`. Takes no parameters.
#[derive(Debug, Clone)]
pub struct Independence {
  pub k_dim: usize,
}

impl Independence {
  pub fn new(k_dim: usize) -> Self {
    Self { k_dim }
  }

  fn check_args(&self, args: &[f64]) -> Result<()> {
    check_k_dim(self.k_dim)?;
    if !args.is_empty() {
      return Err(CopulaError::ArgumentCount {
        what: "independence args",
        expected: 0,
        got: args.len(),
      });
    }
    Ok(())
  }
}

impl CopulaExt for Independence {
  fn k_dim(&self) -> usize {
    self.k_dim
  }

  fn pdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    self.check_args(args)?;

    Ok(u.map_axis(Axis(1), |row| {
      if row.iter().all(|&x| (0.0..=1.0).contains(&x)) {
        1.0
      } else {
        0.0
      }
    }))
  }

  fn cdf(&self, u: &Array2<f64>, args: &[f64]) -> Result<Array1<f64>> {
    check_width(u, self.k_dim)?;
    self.check_args(args)?;

    Ok(u.map_axis(Axis(1), |row| row.product()))
  }

  fn rvs(&self, nobs: usize, args: &[f64], random_state: RandomState) -> Result<Array2<f64>> {
    self.check_args(args)?;
    let mut rng = random_state.rng();

    Ok(Array2::random_using(
      (nobs, self.k_dim),
      Uniform::new(0.0, 1.0),
      &mut rng,
    ))
  }
}
