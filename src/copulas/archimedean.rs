//! # Archimedean
//!
//! $$
//! V\sim LS^{-1}(\psi),\quad E_i\overset{iid}{\sim}\mathrm{Exp}(1),\quad U_i=\psi(E_i/V)
//! $$
//!
use std::f64::consts::PI;

use ndarray::Array2;
use rand::Rng;
use rand::RngCore;
use rand_distr::Distribution;
use rand_distr::Exp1;

use crate::error::CopulaError;
use crate::error::Result;

pub mod clayton;
pub mod frank;
pub mod gumbel;

/// Validates `theta` against a closed interval and a list of excluded values.
pub(crate) fn check_theta(theta: f64, bounds: (f64, f64), invalid: &[f64]) -> Result<()> {
  let (lower, upper) = bounds;

  if !(lower <= theta && theta <= upper) || invalid.contains(&theta) {
    return Err(CopulaError::invalid(format!(
      "theta {} must be in the interval [{}, {}] and not in {:?}",
      theta, lower, upper, invalid
    )));
  }

  Ok(())
}

/// Picks the call-time parameter or falls back to the stored one.
pub(crate) fn resolve_theta(stored: f64, args: &[f64]) -> Result<f64> {
  match args {
    [] => Ok(stored),
    [theta] => Ok(*theta),
    _ => Err(CopulaError::ArgumentCount {
      what: "copula args",
      expected: 1,
      got: args.len(),
    }),
  }
}

/// Marshall–Olkin sampler: one mixing draw per row, `k_dim` exponentials.
pub(crate) fn marshall_olkin<M, P>(
  nobs: usize,
  k_dim: usize,
  rng: &mut dyn RngCore,
  mut mixing: M,
  psi: P,
) -> Array2<f64>
where
  M: FnMut(&mut dyn RngCore) -> f64,
  P: Fn(f64) -> f64,
{
  let mut sample = Array2::<f64>::zeros((nobs, k_dim));

  for mut row in sample.rows_mut() {
    let v = mixing(rng);
    for x in row.iter_mut() {
      let e: f64 = Exp1.sample(rng);
      *x = psi(e / v);
    }
  }

  tracing::debug!(nobs, k_dim, "drew marshall-olkin sample");
  sample
}

/// Positive stable variate with Laplace transform `exp(-t^alpha)`, `0 < alpha < 1`
/// (Kanter's representation).
pub(crate) fn positive_stable(alpha: f64, rng: &mut dyn RngCore) -> f64 {
  let theta = PI * rng.gen::<f64>();
  let w: f64 = Exp1.sample(rng);

  let a = (alpha * theta).sin() / theta.sin().powf(1.0 / alpha);
  let b = ((1.0 - alpha) * theta).sin() / w;
  a * b.powf((1.0 - alpha) / alpha)
}

/// Logarithmic series variate, `P(V = k) = -p^k / (k ln(1 - p))` (Kemp's LK).
///
/// Parameterised by `ln(1 - p)` so that `p` close to one stays exact.
pub(crate) fn logarithmic(log_1mp: f64, rng: &mut dyn RngCore) -> f64 {
  let p = -log_1mp.exp_m1();
  let u2: f64 = rng.gen();
  if u2 > p {
    return 1.0;
  }

  let q = -(log_1mp * rng.gen::<f64>()).exp_m1();

  if u2 < q * q {
    (1.0 + u2.ln() / q.ln()).floor()
  } else if u2 > q {
    1.0
  } else {
    2.0
  }
}
