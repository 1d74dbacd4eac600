//! Cuckoo Search
//!
//! Each generation lays one Levy-flight egg from a random nest, drops it into another random
//! nest when it is strictly better, then abandons the worst nests. The share of nests that
//! survive abandonment decays linearly from `p_max` to `p_min` over the run.

use std::time::{Duration, Instant};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::bounds::{ParameterBounds, validate_bounds};
use crate::candidate::{Candidate, Population, compare_fitness, is_better};
use crate::init_random::sample_parameters;
use crate::levy_flight::{LevyStepSize, levy_flight};
use crate::parallel_eval::{ParallelConfig, ParallelEvaluator};
use crate::random_source::{RandomSource, SeededRandom};
use crate::truncate::truncate_move;
use crate::{
	Callback, CallbackAction, OptimizationResult, SwarmError, SwarmIntermediate, SwarmReport,
	log_generation, timing_enabled,
};

/// Where new eggs go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Replacement {
	/// One egg per generation, compared against a uniformly chosen nest
	#[default]
	RandomSlot,
	/// One egg per nest, each nest keeps the better of the two.
	/// Historical variant, much more expensive per generation.
	ElitistMerge,
}

/// Cuckoo Search configuration
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct CuckooConfig {
	/// Number of nests
	pub population_size: usize,
	pub max_generations: usize,
	/// Stop once the best fitness is finite and <= tolerance
	pub tolerance: f64,
	/// Levy exponent
	pub alpha: f64,
	/// Keep fraction at the last generation
	pub p_min: f64,
	/// Keep fraction at the first generation
	pub p_max: f64,
	/// Factor applied to the Levy step size
	pub step_scale: f64,
	pub step_size: LevyStepSize,
	pub replacement: Replacement,
	/// None draws a seed from the thread rng
	pub seed: Option<u64>,
	/// Log progress at info level
	pub disp: bool,
	pub parallel: ParallelConfig,
	/// Optional per-generation callback (may stop early)
	#[serde(skip)]
	pub callback: Option<Callback>,
}

impl Default for CuckooConfig {
	fn default() -> Self {
		Self {
			population_size: 25,
			max_generations: 1000,
			tolerance: 1e-8,
			alpha: 1.5,
			p_min: 0.05,
			p_max: 0.5,
			step_scale: 0.01,
			step_size: LevyStepSize::default(),
			replacement: Replacement::default(),
			seed: None,
			disp: false,
			parallel: ParallelConfig::default(),
			callback: None,
		}
	}
}

impl CuckooConfig {
	pub fn validate(&self) -> Result<(), SwarmError> {
		if self.population_size < 1 {
			return Err(SwarmError::InvalidPopulationSize(self.population_size));
		}
		if !(self.alpha.is_finite() && self.alpha > 0.0) {
			return Err(SwarmError::InvalidLevyExponent(self.alpha));
		}
		if !(0.0..=1.0).contains(&self.p_min) {
			return Err(SwarmError::InvalidParameter { name: "p_min", value: self.p_min });
		}
		if !(self.p_min..=1.0).contains(&self.p_max) {
			return Err(SwarmError::InvalidParameter { name: "p_max", value: self.p_max });
		}
		if !(self.step_scale.is_finite() && self.step_scale > 0.0) {
			return Err(SwarmError::InvalidParameter { name: "step_scale", value: self.step_scale });
		}
		if self.tolerance.is_nan() {
			return Err(SwarmError::InvalidParameter { name: "tolerance", value: self.tolerance });
		}
		Ok(())
	}
}

/// Fluent builder for `CuckooConfig`
pub struct CuckooConfigBuilder {
	cfg: CuckooConfig,
}

impl Default for CuckooConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl CuckooConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: CuckooConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.population_size = v;
		self
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.max_generations = v;
		self
	}
	pub fn tol(mut self, v: f64) -> Self {
		self.cfg.tolerance = v;
		self
	}
	pub fn alpha(mut self, v: f64) -> Self {
		self.cfg.alpha = v;
		self
	}
	pub fn abandonment(mut self, p_min: f64, p_max: f64) -> Self {
		self.cfg.p_min = p_min;
		self.cfg.p_max = p_max;
		self
	}
	pub fn step_scale(mut self, v: f64) -> Self {
		self.cfg.step_scale = v;
		self
	}
	pub fn step_size(mut self, v: LevyStepSize) -> Self {
		self.cfg.step_size = v;
		self
	}
	pub fn replacement(mut self, v: Replacement) -> Self {
		self.cfg.replacement = v;
		self
	}
	pub fn seed(mut self, v: u64) -> Self {
		self.cfg.seed = Some(v);
		self
	}
	pub fn disp(mut self, v: bool) -> Self {
		self.cfg.disp = v;
		self
	}
	pub fn callback(mut self, cb: Callback) -> Self {
		self.cfg.callback = Some(cb);
		self
	}
	pub fn parallel(mut self, parallel: ParallelConfig) -> Self {
		self.cfg.parallel = parallel;
		self
	}
	pub fn enable_parallel(mut self, enable: bool) -> Self {
		self.cfg.parallel.enabled = enable;
		self
	}
	pub fn parallel_threads(mut self, num_threads: usize) -> Self {
		self.cfg.parallel.num_threads = Some(num_threads);
		self
	}
	pub fn build(self) -> CuckooConfig {
		self.cfg
	}
}

/// Levy-flight egg laid from `nest`, displaced relative to `best`.
///
/// For each dimension, in order, `r = 1 - uniform()` is drawn first and `normal()` second.
/// A coordinate with a zero step keeps its value, whatever the Levy draw.
pub fn levy_egg<R>(
	nest: &Array1<f64>,
	best: &Array1<f64>,
	bounds: &[ParameterBounds],
	alpha: f64,
	step_scale: f64,
	step_size: LevyStepSize,
	rng: &mut R,
) -> Array1<f64>
where
	R: RandomSource + ?Sized,
{
	Array1::from_shape_fn(nest.len(), |k| {
		let b = &bounds[k];
		let r = 1.0 - rng.uniform();
		let norm = rng.normal();
		let step = step_size.step_size(step_scale, b, nest[k], best[k]);
		if step == 0.0 {
			return nest[k];
		}
		truncate_move(b, nest[k], levy_flight(nest[k], step, alpha, r, norm))
	})
}

/// Evaluate `new_nests` and keep, slot by slot, whichever of old and new is strictly better.
///
/// Returns the best of the merged nests; the first one wins on ties.
///
/// # Panics
/// When `nests` is empty.
pub fn elitist_merge<F>(nests: &mut [Candidate], new_nests: &[Array1<f64>], func: &F) -> OptimizationResult
where
	F: Fn(&Array1<f64>) -> f64 + ?Sized,
{
	for (nest, params) in nests.iter_mut().zip(new_nests) {
		let egg = Candidate::evaluate(params.clone(), func);
		if is_better(egg.fitness, nest.fitness) {
			*nest = egg;
		}
	}
	let mut best = &nests[0];
	for nest in nests.iter().skip(1) {
		if compare_fitness(nest.fitness, best.fitness).is_lt() {
			best = nest;
		}
	}
	OptimizationResult::from(best)
}

/// Keep fraction at `generation`, linear from `p_max` down to `p_min`
pub fn abandonment_probability(p_min: f64, p_max: f64, generation: usize, max_generations: usize) -> f64 {
	if max_generations == 0 {
		return p_max;
	}
	p_max - (p_max - p_min) * generation as f64 / max_generations as f64
}

/// Number of worst nests to re-sample; at least one nest always survives
pub fn discard_count(keep_fraction: f64, population_size: usize) -> usize {
	let keep = ((keep_fraction * population_size as f64).floor() as usize).max(1);
	population_size.saturating_sub(keep)
}

fn within_tolerance(fitness: f64, tolerance: f64) -> bool {
	fitness.is_finite() && fitness <= tolerance
}

/// Cuckoo Search engine
pub struct CuckooSearch<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	func: &'a F,
	bounds: Vec<ParameterBounds>,
	config: CuckooConfig,
}

impl<'a, F> CuckooSearch<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	/// Creates a new engine with the default configuration
	pub fn new(func: &'a F, bounds: Vec<ParameterBounds>) -> Self {
		Self { func, bounds, config: CuckooConfig::default() }
	}

	/// Mutable access to the configuration
	pub fn config_mut(&mut self) -> &mut CuckooConfig {
		&mut self.config
	}

	/// Run the search with a generator seeded from `config.seed`
	pub fn solve(&mut self) -> Result<SwarmReport, SwarmError> {
		let mut rng = SeededRandom::from_seed_option(self.config.seed);
		self.solve_with(&mut rng)
	}

	/// Run the search drawing from `rng`; `config.seed` is ignored.
	///
	/// Configuration errors are reported before any draw or evaluation.
	pub fn solve_with<R>(&mut self, rng: &mut R) -> Result<SwarmReport, SwarmError>
	where
		R: RandomSource + ?Sized,
	{
		validate_bounds(&self.bounds)?;
		self.config.validate()?;

		let n = self.config.population_size;
		let max_gen = self.config.max_generations;
		let timing = timing_enabled();
		let evaluator = ParallelEvaluator::new(&self.config.parallel);

		if self.config.disp {
			log::info!(
				"Cuckoo search: {} nests, {} dimensions, maxiter={}, alpha={}, replacement={:?}",
				n,
				self.bounds.len(),
				max_gen,
				self.config.alpha,
				self.config.replacement
			);
		}

		let t_init0 = Instant::now();
		let initial = sample_parameters(&self.bounds, n, rng);
		let mut population = Population::new(evaluator.evaluate(initial, self.func));
		population.sort();
		let mut nfev = n;
		if timing {
			log::debug!("TIMING init: {:.3} ms", t_init0.elapsed().as_secs_f64() * 1e3);
		}
		log::debug!("Initial best: fitness={:.6e}", population.best().fitness);

		let mut nit = 0;
		let mut stopped = false;
		let mut t_lay_tot = Duration::ZERO;
		let mut t_abandon_tot = Duration::ZERO;

		while nit < max_gen && !within_tolerance(population.best().fitness, self.config.tolerance) {
			let t_lay0 = Instant::now();
			nfev += self.lay_eggs(&mut population, rng);
			population.sort();
			let t_lay = t_lay0.elapsed();

			let t_abandon0 = Instant::now();
			let keep_fraction =
				abandonment_probability(self.config.p_min, self.config.p_max, nit, max_gen);
			let discard = discard_count(keep_fraction, n);
			if discard > 0 {
				let fresh = sample_parameters(&self.bounds, discard, rng);
				population.replace_tail(evaluator.evaluate(fresh, self.func));
				nfev += discard;
				population.sort();
			}
			let t_abandon = t_abandon0.elapsed();

			nit += 1;
			t_lay_tot += t_lay;
			t_abandon_tot += t_abandon;
			if timing && (nit <= 5 || nit % 100 == 0) {
				log::debug!(
					"TIMING iter {:5}: lay={:.3} ms, abandon={:.3} ms ({} nests)",
					nit,
					t_lay.as_secs_f64() * 1e3,
					t_abandon.as_secs_f64() * 1e3,
					discard
				);
			}

			let best = population.best();
			let spread = population.fitness_std();
			log_generation(self.config.disp, "CS", nit, best.fitness, spread);

			if let Some(ref mut cb) = self.config.callback {
				let intermediate = SwarmIntermediate {
					x: best.parameters.clone(),
					fun: best.fitness,
					convergence: spread,
					iter: nit,
				};
				if let CallbackAction::Stop = cb(&intermediate) {
					stopped = true;
					break;
				}
			}
		}

		let best_f = population.best().fitness;
		let (success, message) = if stopped {
			(true, "Optimization stopped by callback".to_string())
		} else if within_tolerance(best_f, self.config.tolerance) {
			(true, format!("Converged: best_f={:.3e} <= tol={:.3e}", best_f, self.config.tolerance))
		} else {
			(false, format!("Maximum generations reached: {}", max_gen))
		};

		if self.config.disp {
			log::info!("CS finished: {}", message);
		}
		if timing {
			log::debug!(
				"TIMING total: lay={:.3} s, abandon={:.3} s",
				t_lay_tot.as_secs_f64(),
				t_abandon_tot.as_secs_f64()
			);
		}

		let best = population.best().clone();
		Ok(SwarmReport {
			parameters: best.parameters,
			fitness: best.fitness,
			success,
			message,
			nit,
			nfev,
			population,
		})
	}

	/// Replacement step of one generation; returns the number of evaluations
	fn lay_eggs<R>(&self, population: &mut Population, rng: &mut R) -> usize
	where
		R: RandomSource + ?Sized,
	{
		let cfg = &self.config;
		match cfg.replacement {
			Replacement::RandomSlot => {
				let s = rng.discrete_uniform(population.len());
				let egg = levy_egg(
					&population.get(s).parameters,
					&population.best().parameters,
					&self.bounds,
					cfg.alpha,
					cfg.step_scale,
					cfg.step_size,
					rng,
				);
				let egg = Candidate::evaluate(egg, self.func);
				let t = rng.discrete_uniform(population.len());
				population.replace_if_better(t, egg);
				1
			}
			Replacement::ElitistMerge => {
				let best = population.best().parameters.clone();
				let eggs: Vec<Array1<f64>> = population
					.as_slice()
					.iter()
					.map(|nest| {
						levy_egg(
							&nest.parameters,
							&best,
							&self.bounds,
							cfg.alpha,
							cfg.step_scale,
							cfg.step_size,
							rng,
						)
					})
					.collect();
				let merged = elitist_merge(population.as_mut_slice(), &eggs, self.func);
				log::trace!("merge best_f={:.6e}", merged.fitness);
				eggs.len()
			}
		}
	}
}
