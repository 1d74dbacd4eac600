//! Evaluation of independent candidates, optionally on a rayon pool
//!
//! Only pure objective calls on parameter vectors that were already drawn go
//! through here, so the result does not depend on whether a pool is used.

use ndarray::Array1;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

/// Parallel evaluation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
	/// Evaluate batches of candidates on a rayon pool
	pub enabled: bool,
	/// Threads for a dedicated pool (None = rayon global pool)
	pub num_threads: Option<usize>,
}

/// Batch evaluator for one run.
///
/// A dedicated pool is built once here and reused for every batch of the run.
pub struct ParallelEvaluator {
	enabled: bool,
	pool: Option<rayon::ThreadPool>,
}

impl ParallelEvaluator {
	pub fn new(config: &ParallelConfig) -> Self {
		let pool = match (config.enabled, config.num_threads) {
			(true, Some(n)) => match rayon::ThreadPoolBuilder::new().num_threads(n).build() {
				Ok(pool) => Some(pool),
				Err(e) => {
					log::warn!("cannot build a pool of {} threads ({}), using the global pool", n, e);
					None
				}
			},
			_ => None,
		};
		Self { enabled: config.enabled, pool }
	}

	/// Threads available to a batch, 1 when evaluating sequentially
	pub fn num_threads(&self) -> usize {
		match (&self.pool, self.enabled) {
			(Some(pool), _) => pool.current_num_threads(),
			(None, true) => rayon::current_num_threads(),
			(None, false) => 1,
		}
	}

	/// Evaluate every parameter vector, keeping the input order
	pub fn evaluate<F>(&self, params: Vec<Array1<f64>>, func: &F) -> Vec<Candidate>
	where
		F: Fn(&Array1<f64>) -> f64 + Sync,
	{
		if !self.enabled || params.len() < 2 {
			return params.into_iter().map(|x| Candidate::evaluate(x, func)).collect();
		}

		let run = move || -> Vec<Candidate> {
			params.into_par_iter().map(|x| Candidate::evaluate(x, func)).collect()
		};
		match &self.pool {
			Some(pool) => pool.install(run),
			None => run(),
		}
	}
}

impl std::fmt::Debug for ParallelEvaluator {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ParallelEvaluator")
			.field("enabled", &self.enabled)
			.field("dedicated_pool", &self.pool.is_some())
			.field("num_threads", &self.num_threads())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(n: usize) -> Vec<Array1<f64>> {
		(0..n).map(|i| Array1::from(vec![i as f64, -(i as f64)])).collect()
	}

	#[test]
	fn test_sequential_and_parallel_agree() {
		let f = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
		let seq = ParallelEvaluator::new(&ParallelConfig::default()).evaluate(params(64), &f);
		let par = ParallelEvaluator::new(&ParallelConfig { enabled: true, num_threads: None })
			.evaluate(params(64), &f);
		let par2 = ParallelEvaluator::new(&ParallelConfig { enabled: true, num_threads: Some(2) })
			.evaluate(params(64), &f);
		assert_eq!(seq, par);
		assert_eq!(seq, par2);
		assert_eq!(seq[3].fitness, 18.0);
	}

	#[test]
	fn test_dedicated_pool_is_reused() {
		let f = |x: &Array1<f64>| x.sum();
		let evaluator = ParallelEvaluator::new(&ParallelConfig { enabled: true, num_threads: Some(3) });
		assert_eq!(evaluator.num_threads(), 3);

		let expected = ParallelEvaluator::new(&ParallelConfig::default()).evaluate(params(16), &f);
		for _ in 0..100 {
			assert_eq!(evaluator.evaluate(params(16), &f), expected);
		}
		assert_eq!(evaluator.num_threads(), 3);
	}

	#[test]
	fn test_sequential_evaluator() {
		let evaluator = ParallelEvaluator::new(&ParallelConfig { enabled: false, num_threads: Some(8) });
		assert_eq!(evaluator.num_threads(), 1);
		assert!(format!("{:?}", evaluator).contains("dedicated_pool: false"));
	}

	#[test]
	fn test_empty_batch() {
		let f = |_: &Array1<f64>| 0.0;
		let out = ParallelEvaluator::new(&ParallelConfig { enabled: true, num_threads: None }).evaluate(vec![], &f);
		assert!(out.is_empty());
	}
}
