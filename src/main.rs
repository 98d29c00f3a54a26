use anyhow::Result;
use copula_rs::copulas::correlation::kendall_tau_matrix;
use copula_rs::prelude::*;
use ndarray::Axis;
use prettytable::row;
use prettytable::Table;

const N: usize = 20_000;

fn main() -> Result<()> {
  let joint = JointDistribution::new(
    Clayton::new(2.0, 3),
    vec![
      Box::new(Normal::new(0.0, 1.0)),
      Box::new(Gamma::new(2.0, 0.5)),
      Box::new(StudentT::new(0.0, 1.0, 4.0)),
    ],
    vec![],
  )?;

  let y = joint.rvs(N, None, None, RandomState::Seed(42))?;
  let mean = y.mean_axis(Axis(0)).unwrap_or_default();
  let std = y.std_axis(Axis(0), 1.0);
  let taus = kendall_tau_matrix(&y)?;

  let mut table = Table::new();
  table.add_row(row!["variable", "marginal", "mean", "std", "tau(0, i)"]);
  for (i, marginal) in joint.marginals().iter().enumerate() {
    table.add_row(row![
      i,
      format!("{marginal:?}"),
      format!("{:.4}", mean[i]),
      format!("{:.4}", std[i]),
      format!("{:.4}", taus[[0, i]])
    ]);
  }
  table.printstd();

  let fitted = joint.copula().fit_corr_param(&y)?;
  let logpdf = joint.logpdf(&y, None, None)?;

  let mut summary = Table::new();
  summary.add_row(row!["true theta", "fitted theta", "mean logpdf"]);
  summary.add_row(row![
    format!("{:.4}", joint.copula().theta),
    format!("{:.4}", fitted),
    format!("{:.4}", logpdf.mean().unwrap_or(f64::NAN))
  ]);
  summary.printstd();

  Ok(())
}
