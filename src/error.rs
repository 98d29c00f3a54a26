//! # Error
//!
//! $$
//! \text{Errors: }\mathcal{E}=\{\text{not implemented},\ \text{dimension},\ \text{arity},\ \text{domain}\}
//! $$
//!
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CopulaError>;

#[derive(Debug, Error)]
pub enum CopulaError {
  /// A family did not supply an override for a required operation.
  #[error("{0} is not implemented for this copula")]
  NotImplemented(&'static str),

  #[error("{what}: expected dimension {expected}, got {got}")]
  DimensionMismatch {
    what: &'static str,
    expected: usize,
    got: usize,
  },

  #[error("{what}: expected {expected} arguments, got {got}")]
  ArgumentCount {
    what: &'static str,
    expected: usize,
    got: usize,
  },

  #[error("invalid parameter: {0}")]
  InvalidParameter(String),

  #[error(transparent)]
  Shape(#[from] ndarray::ShapeError),

  /// Kendall's tau, quadrature or root finding failed.
  #[error("statistic failed: {0}")]
  Statistic(String),
}

impl CopulaError {
  pub(crate) fn invalid(msg: impl Into<String>) -> Self {
    CopulaError::InvalidParameter(msg.into())
  }
}
