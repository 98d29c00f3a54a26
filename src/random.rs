//! # Random
//!
//! $$
//! \text{RandomState}\in\{\text{default},\ \text{seed},\ \text{generator}\}
//! $$
//!
use rand::rngs::StdRng;
use rand::RngCore;
use rand::SeedableRng;

/// Where sampling draws its entropy from.
///
/// The crate never stores a generator between calls, reproducibility is up to
/// whoever builds the `RandomState`.
#[derive(Default)]
pub enum RandomState<'a> {
  /// Thread-local generator of the `rand` crate.
  #[default]
  Default,
  /// Fresh `StdRng` seeded with the given value.
  Seed(u64),
  /// Caller-owned generator, used as-is.
  Generator(&'a mut dyn RngCore),
}

impl<'a> RandomState<'a> {
  pub fn rng(self) -> Box<dyn RngCore + 'a> {
    match self {
      RandomState::Default => Box::new(rand::thread_rng()),
      RandomState::Seed(seed) => Box::new(StdRng::seed_from_u64(seed)),
      RandomState::Generator(rng) => Box::new(rng),
    }
  }
}

impl From<u64> for RandomState<'_> {
  fn from(seed: u64) -> Self {
    RandomState::Seed(seed)
  }
}

impl From<Option<u64>> for RandomState<'_> {
  fn from(seed: Option<u64>) -> Self {
    seed.map_or(RandomState::Default, RandomState::Seed)
  }
}

impl<'a, R: RngCore> From<&'a mut R> for RandomState<'a> {
  fn from(rng: &'a mut R) -> Self {
    RandomState::Generator(rng)
  }
}
