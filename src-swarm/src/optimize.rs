use ndarray::Array1;

use crate::bounds::bounds_from_pairs;
use crate::cuckoo::{CuckooConfig, CuckooSearch};
use crate::firefly::{FireflyAlgorithm, FireflyConfig};
use crate::{OptimizationResult, SwarmError, SwarmReport};

/// Convenience function for Cuckoo Search:
/// - `func`: objective function mapping x -> f(x)
/// - `bounds`: vector of (lower, upper) pairs
/// - `config`: Cuckoo Search configuration
pub fn cuckoo_search<F>(func: &F, bounds: &[(f64, f64)], config: CuckooConfig) -> Result<SwarmReport, SwarmError>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let bounds = bounds_from_pairs(bounds)?;
	let mut cs = CuckooSearch::new(func, bounds);
	*cs.config_mut() = config;
	cs.solve()
}

/// Convenience function for the Firefly Algorithm, same shape as `cuckoo_search`
pub fn firefly_algorithm<F>(
	func: &F,
	bounds: &[(f64, f64)],
	config: FireflyConfig,
) -> Result<SwarmReport, SwarmError>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let bounds = bounds_from_pairs(bounds)?;
	let mut fa = FireflyAlgorithm::new(func, bounds);
	*fa.config_mut() = config;
	fa.solve()
}

fn generation_count(max_generations: i64) -> Result<usize, SwarmError> {
	usize::try_from(max_generations).map_err(|_| SwarmError::InvalidIterationCount(max_generations))
}

/// Minimize `objective` with Cuckoo Search.
///
/// Runs until `max_generations` generations are done or the best fitness is `<= tolerance`.
/// Every other parameter keeps its default (alpha 1.5, keep fraction 0.5 down to 0.05).
pub fn optimize_cuckoo<F>(
	objective: &F,
	bounds: &[(f64, f64)],
	population_size: usize,
	max_generations: i64,
	tolerance: f64,
	seed: u64,
) -> Result<OptimizationResult, SwarmError>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let bounds = bounds_from_pairs(bounds)?;
	let max_generations = generation_count(max_generations)?;
	let mut cs = CuckooSearch::new(objective, bounds);
	{
		let cfg = cs.config_mut();
		cfg.population_size = population_size;
		cfg.max_generations = max_generations;
		cfg.tolerance = tolerance;
		cfg.seed = Some(seed);
	}
	cs.solve().map(|report| report.result())
}

/// Minimize `objective` with the Firefly Algorithm using 25 fireflies for exactly
/// `max_generations` generations.
pub fn optimize_firefly<F>(
	objective: &F,
	bounds: &[(f64, f64)],
	max_generations: i64,
	seed: u64,
) -> Result<OptimizationResult, SwarmError>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let bounds = bounds_from_pairs(bounds)?;
	let max_generations = generation_count(max_generations)?;
	let mut fa = FireflyAlgorithm::new(objective, bounds);
	{
		let cfg = fa.config_mut();
		cfg.max_generations = max_generations;
		cfg.seed = Some(seed);
	}
	fa.solve().map(|report| report.result())
}
