//! # Boundary
//!
//! $$
//! \tilde u=\tfrac12+(1-10^{-10})\,(u-\tfrac12)
//! $$
//!
use ndarray::Array1;
use ndarray::Array2;
use ndarray::ArrayView1;

use crate::error::CopulaError;
use crate::error::Result;

/// Shrink factor applied to uniform draws before a marginal ppf.
///
/// Keeps exact 0 and 1 draws off the boundary where unbounded marginals map
/// to infinity. Changing it changes samples at extreme quantiles.
pub const PPF_CONTRACTION: f64 = 1.0 - 1e-10;

#[inline]
pub fn contract_unit(u: f64) -> f64 {
  0.5 + PPF_CONTRACTION * (u - 0.5)
}

pub fn contract_column(u: ArrayView1<f64>) -> Array1<f64> {
  u.mapv(contract_unit)
}

/// Rejects copula input whose last axis is not `k_dim` wide.
pub fn check_width(u: &Array2<f64>, k_dim: usize) -> Result<()> {
  if u.ncols() != k_dim {
    return Err(CopulaError::DimensionMismatch {
      what: "copula input",
      expected: k_dim,
      got: u.ncols(),
    });
  }
  Ok(())
}

/// Rejects copulas of fewer than two dimensions.
pub fn check_k_dim(k_dim: usize) -> Result<()> {
  if k_dim < 2 {
    return Err(CopulaError::invalid(format!(
      "k_dim must be at least 2, got {k_dim}"
    )));
  }
  Ok(())
}

/// Column-stacks per-variable vectors into an `(nrows, columns.len())` matrix.
pub fn stack_columns(columns: &[Array1<f64>], nrows: usize) -> Result<Array2<f64>> {
  let mut out = Array2::<f64>::zeros((nrows, columns.len()));

  for (i, column) in columns.iter().enumerate() {
    if column.len() != nrows {
      return Err(CopulaError::DimensionMismatch {
        what: "stacked column length",
        expected: nrows,
        got: column.len(),
      });
    }
    out.column_mut(i).assign(column);
  }

  Ok(out)
}
