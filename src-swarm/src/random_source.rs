use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of the random draws consumed by the engines.
///
/// Engines only ever talk to this trait, so a run is reproducible as long as the
/// implementation is deterministic for a given seed and call order.
pub trait RandomSource {
	/// Uniform draw in [0, 1)
	fn uniform(&mut self) -> f64;

	/// Standard normal draw
	fn normal(&mut self) -> f64;

	/// Uniform index in [0, n); returns 0 when `n == 0`
	fn discrete_uniform(&mut self, n: usize) -> usize;

	/// Uniform draw in [-1, 1), used to sample parameters around the interval midpoint
	fn symmetric_uniform(&mut self) -> f64 {
		2.0 * self.uniform() - 1.0
	}
}

/// Default `RandomSource` backed by a seeded `StdRng`
#[derive(Debug, Clone)]
pub struct SeededRandom {
	rng: StdRng,
}

impl SeededRandom {
	/// Deterministic generator for `seed`
	pub fn new(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}

	/// Generator seeded from the thread rng, for unseeded runs
	pub fn from_entropy() -> Self {
		let mut thread_rng = rand::rng();
		Self { rng: StdRng::from_rng(&mut thread_rng) }
	}

	/// Seeded when `seed` is set, from entropy otherwise
	pub fn from_seed_option(seed: Option<u64>) -> Self {
		match seed {
			Some(s) => Self::new(s),
			None => Self::from_entropy(),
		}
	}
}

impl RandomSource for SeededRandom {
	fn uniform(&mut self) -> f64 {
		self.rng.random::<f64>()
	}

	fn normal(&mut self) -> f64 {
		self.rng.sample(StandardNormal)
	}

	fn discrete_uniform(&mut self, n: usize) -> usize {
		if n == 0 {
			return 0;
		}
		self.rng.random_range(0..n)
	}
}
