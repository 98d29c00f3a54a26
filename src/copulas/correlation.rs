//! # Correlation
//!
//! $$
//! \tau_b=\frac{n_c-n_d}{\sqrt{(n_0-n_1)(n_0-n_2)}}
//! $$
//!
use std::cmp::Ordering;

use ndarray::Array2;
use ndarray::ArrayView1;

use crate::error::CopulaError;
use crate::error::Result;

/// Kendall's tau-b between two columns.
pub fn kendall_tau(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64> {
  let (tau, _significance) =
    kendalls::tau_b_with_comparator(&x.to_vec(), &y.to_vec(), |a: &f64, b: &f64| {
      a.partial_cmp(b).unwrap_or(Ordering::Greater)
    })
    .map_err(|e| CopulaError::Statistic(format!("kendall tau: {e:?}")))?;

  Ok(tau)
}

/// Kendall's tau matrix for a given data matrix
pub fn kendall_tau_matrix(data: &Array2<f64>) -> Result<Array2<f64>> {
  let cols = data.ncols();
  let mut tau_matrix = Array2::<f64>::eye(cols);

  for i in 0..cols {
    for j in (i + 1)..cols {
      let tau = kendall_tau(data.column(i), data.column(j))?;
      tau_matrix[[i, j]] = tau;
      tau_matrix[[j, i]] = tau;
    }
  }

  Ok(tau_matrix)
}

/// Arithmetic mean of tau over all unordered pairs of the first `k` columns.
pub fn mean_pairwise_tau(data: &Array2<f64>, k: usize) -> Result<f64> {
  if k < 2 || data.ncols() < k {
    return Err(CopulaError::DimensionMismatch {
      what: "pairwise tau",
      expected: k.max(2),
      got: data.ncols(),
    });
  }

  let mut sum = 0.0;
  let mut pairs = 0usize;
  for i in 0..k {
    for j in (i + 1)..k {
      sum += kendall_tau(data.column(i), data.column(j))?;
      pairs += 1;
    }
  }

  Ok(sum / pairs as f64)
}

#[cfg(test)]
mod tests {
  use approx::assert_abs_diff_eq;
  use ndarray::array;

  use super::*;

  #[test]
  fn tau_of_monotone_columns() {
    let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
    let up = array![0.1, 0.4, 0.5, 0.9, 1.2];
    let down = array![5.0, 4.0, 3.0, 2.0, 1.0];

    assert_abs_diff_eq!(kendall_tau(x.view(), up.view()).unwrap(), 1.0, epsilon = 1e-12);
    assert_abs_diff_eq!(kendall_tau(x.view(), down.view()).unwrap(), -1.0, epsilon = 1e-12);
  }

  #[test]
  fn tau_counts_discordant_pairs() {
    // one swapped pair out of six
    let x = array![1.0, 2.0, 3.0, 4.0];
    let y = array![1.0, 3.0, 2.0, 4.0];
    assert_abs_diff_eq!(
      kendall_tau(x.view(), y.view()).unwrap(),
      (5.0 - 1.0) / 6.0,
      epsilon = 1e-12
    );
  }

  #[test]
  fn matrix_is_symmetric_with_unit_diagonal() {
    let data = array![[1.0, 2.0, 9.0], [2.0, 1.0, 8.0], [3.0, 4.0, 7.0], [4.0, 3.0, 1.0]];
    let tau = kendall_tau_matrix(&data).unwrap();

    for i in 0..3 {
      assert_eq!(tau[[i, i]], 1.0);
      for j in 0..3 {
        assert_eq!(tau[[i, j]], tau[[j, i]]);
      }
    }
    assert_abs_diff_eq!(tau[[0, 2]], -1.0, epsilon = 1e-12);
  }

  #[test]
  fn mean_pairwise_matches_matrix_upper_triangle() {
    let data = array![[1.0, 2.0, 9.0], [2.0, 1.0, 8.0], [3.0, 4.0, 7.0], [4.0, 3.0, 1.0]];
    let tau = kendall_tau_matrix(&data).unwrap();
    let expected = (tau[[0, 1]] + tau[[0, 2]] + tau[[1, 2]]) / 3.0;
    assert_abs_diff_eq!(mean_pairwise_tau(&data, 3).unwrap(), expected, epsilon = 1e-12);
  }

  #[test]
  fn mean_pairwise_needs_two_columns() {
    let data = Array2::<f64>::zeros((4, 1));
    assert!(mean_pairwise_tau(&data, 1).is_err());
  }
}
