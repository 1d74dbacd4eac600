//! Firefly Algorithm
//!
//! Every firefly moves towards each brighter (strictly better) one with an attraction that
//! decays with the squared distance, plus a random walk scaled by the interval width and
//! annealed geometrically by `delta` after each generation.

use std::time::{Duration, Instant};

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::bounds::{ParameterBounds, total_width, validate_bounds};
use crate::candidate::{Candidate, Population, is_better};
use crate::init_random::sample_parameters;
use crate::parallel_eval::{ParallelConfig, ParallelEvaluator};
use crate::random_source::{RandomSource, SeededRandom};
use crate::truncate::truncate_move;
use crate::{
	Callback, CallbackAction, SwarmError, SwarmIntermediate, SwarmReport, log_generation,
	timing_enabled,
};

/// Firefly Algorithm configuration
#[derive(Serialize, Deserialize)]
#[serde(default)]
pub struct FireflyConfig {
	pub population_size: usize,
	pub max_generations: usize,
	/// Attractiveness at distance 0
	pub beta: f64,
	/// Initial random walk scale
	pub alpha0: f64,
	/// Annealing factor of the random walk
	pub delta: f64,
	/// Light absorption; None derives it from the box
	pub gamma: Option<f64>,
	pub seed: Option<u64>,
	pub disp: bool,
	/// Only used for the initial population
	pub parallel: ParallelConfig,
	#[serde(skip)]
	pub callback: Option<Callback>,
}

impl Default for FireflyConfig {
	fn default() -> Self {
		Self {
			population_size: 25,
			max_generations: 1000,
			beta: 1.0,
			alpha0: 0.25,
			delta: 0.97,
			gamma: None,
			seed: None,
			disp: false,
			parallel: ParallelConfig::default(),
			callback: None,
		}
	}
}

impl FireflyConfig {
	pub fn validate(&self) -> Result<(), SwarmError> {
		if self.population_size < 1 {
			return Err(SwarmError::InvalidPopulationSize(self.population_size));
		}
		if !(self.beta.is_finite() && self.beta >= 0.0) {
			return Err(SwarmError::InvalidParameter { name: "beta", value: self.beta });
		}
		if !(self.alpha0.is_finite() && self.alpha0 >= 0.0) {
			return Err(SwarmError::InvalidParameter { name: "alpha0", value: self.alpha0 });
		}
		if !(self.delta > 0.0 && self.delta <= 1.0) {
			return Err(SwarmError::InvalidParameter { name: "delta", value: self.delta });
		}
		if let Some(gamma) = self.gamma {
			if !(gamma.is_finite() && gamma >= 0.0) {
				return Err(SwarmError::InvalidParameter { name: "gamma", value: gamma });
			}
		}
		Ok(())
	}
}

pub struct FireflyConfigBuilder {
	cfg: FireflyConfig,
}

impl Default for FireflyConfigBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl FireflyConfigBuilder {
	pub fn new() -> Self {
		Self { cfg: FireflyConfig::default() }
	}
	pub fn popsize(mut self, v: usize) -> Self {
		self.cfg.population_size = v;
		self
	}
	pub fn maxiter(mut self, v: usize) -> Self {
		self.cfg.max_generations = v;
		self
	}
	pub fn beta(mut self, v: f64) -> Self {
		self.cfg.beta = v;
		self
	}
	pub fn alpha0(mut self, v: f64) -> Self {
		self.cfg.alpha0 = v;
		self
	}
	pub fn delta(mut self, v: f64) -> Self {
		self.cfg.delta = v;
		self
	}
	pub fn gamma(mut self, v: f64) -> Self {
		self.cfg.gamma = Some(v);
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
	pub fn build(self) -> FireflyConfig {
		self.cfg
	}
}

/// `1 / sqrt(L)` for the summed interval width `L`, 0 for a degenerate box
pub fn light_absorption(total_width: f64) -> f64 {
	if total_width > 0.0 { 1.0 / total_width.sqrt() } else { 0.0 }
}

fn distance_sq(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
	a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

/// One full i/j sweep over the population; returns the number of evaluations.
///
/// A moved firefly is re-evaluated immediately and later comparisons in the sweep see
/// its new position and fitness.
pub fn firefly_sweep<F, R>(
	population: &mut Population,
	func: &F,
	bounds: &[ParameterBounds],
	beta: f64,
	gamma: f64,
	walk_scale: f64,
	rng: &mut R,
) -> usize
where
	F: Fn(&Array1<f64>) -> f64 + ?Sized,
	R: RandomSource + ?Sized,
{
	let n = population.len();
	let mut nfev = 0;
	for i in 0..n {
		for j in 0..n {
			if !is_better(population.get(j).fitness, population.get(i).fitness) {
				continue;
			}
			let xi = &population.get(i).parameters;
			let xj = &population.get(j).parameters;
			let attraction = beta * (-gamma * distance_sq(xi, xj)).exp();
			let moved = Array1::from_shape_fn(xi.len(), |k| {
				let b = &bounds[k];
				let step = attraction * (xj[k] - xi[k]) + walk_scale * rng.normal() * b.width();
				truncate_move(b, xi[k], xi[k] + step)
			});
			population.set(i, Candidate::evaluate(moved, func));
			nfev += 1;
		}
	}
	nfev
}

/// Firefly Algorithm engine
pub struct FireflyAlgorithm<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	func: &'a F,
	bounds: Vec<ParameterBounds>,
	config: FireflyConfig,
}

impl<'a, F> FireflyAlgorithm<'a, F>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	pub fn new(func: &'a F, bounds: Vec<ParameterBounds>) -> Self {
		Self { func, bounds, config: FireflyConfig::default() }
	}

	pub fn config_mut(&mut self) -> &mut FireflyConfig {
		&mut self.config
	}

	/// Run exactly `max_generations` generations unless the callback stops earlier
	pub fn solve(&mut self) -> Result<SwarmReport, SwarmError> {
		let mut rng = SeededRandom::from_seed_option(self.config.seed);
		self.solve_with(&mut rng)
	}

	/// Same as `solve`, drawing from `rng` instead of a generator seeded from `config.seed`
	pub fn solve_with<R>(&mut self, rng: &mut R) -> Result<SwarmReport, SwarmError>
	where
		R: RandomSource + ?Sized,
	{
		validate_bounds(&self.bounds)?;
		self.config.validate()?;

		let n = self.config.population_size;
		let max_gen = self.config.max_generations;
		let beta = self.config.beta;
		let gamma = self.config.gamma.unwrap_or_else(|| light_absorption(total_width(&self.bounds)));
		let timing = timing_enabled();

		if self.config.disp {
			log::info!(
				"Firefly: {} fireflies, {} dimensions, maxiter={}, beta={}, gamma={:.4e}, alpha0={}, delta={}",
				n,
				self.bounds.len(),
				max_gen,
				beta,
				gamma,
				self.config.alpha0,
				self.config.delta
			);
		}

		let initial = sample_parameters(&self.bounds, n, rng);
		let evaluator = ParallelEvaluator::new(&self.config.parallel);
		let mut population = Population::new(evaluator.evaluate(initial, self.func));
		population.sort();
		let mut nfev = n;
		log::debug!("Initial best: fitness={:.6e}", population.best().fitness);

		let mut delta_t = self.config.delta;
		let mut nit = 0;
		let mut stopped = false;
		let mut t_sweep_tot = Duration::ZERO;

		while nit < max_gen {
			let t_sweep0 = Instant::now();
			let walk_scale = self.config.alpha0 * delta_t;
			nfev += firefly_sweep(&mut population, self.func, &self.bounds, beta, gamma, walk_scale, rng);
			population.sort();
			delta_t *= self.config.delta;
			let t_sweep = t_sweep0.elapsed();
			t_sweep_tot += t_sweep;

			nit += 1;
			if timing && (nit <= 5 || nit % 100 == 0) {
				log::debug!("TIMING iter {:5}: sweep={:.3} ms", nit, t_sweep.as_secs_f64() * 1e3);
			}

			let best = population.best();
			let spread = population.fitness_std();
			log_generation(self.config.disp, "FA", nit, best.fitness, spread);

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

		let (success, message) = if stopped {
			(true, "Optimization stopped by callback".to_string())
		} else {
			(false, format!("Maximum generations reached: {}", max_gen))
		};
		if self.config.disp {
			log::info!("FA finished: {}", message);
		}
		if timing {
			log::debug!("TIMING total: sweep={:.3} s", t_sweep_tot.as_secs_f64());
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
}

#[cfg(test)]
mod tests {
	use super::*;

	struct FixedNormal(f64);

	impl RandomSource for FixedNormal {
		fn uniform(&mut self) -> f64 {
			0.5
		}
		fn normal(&mut self) -> f64 {
			self.0
		}
		fn discrete_uniform(&mut self, _n: usize) -> usize {
			0
		}
	}

	fn sphere(x: &Array1<f64>) -> f64 {
		x.iter().map(|v| v * v).sum()
	}

	#[test]
	fn test_light_absorption() {
		assert_eq!(light_absorption(16.0), 0.25);
		assert_eq!(light_absorption(0.0), 0.0);
	}

	#[test]
	fn test_sweep_moves_towards_brighter() {
		let bounds = vec![ParameterBounds::new(-4.0, 4.0)];
		let mut pop = Population::new(vec![
			Candidate::evaluate(Array1::from(vec![0.0]), &sphere),
			Candidate::evaluate(Array1::from(vec![2.0]), &sphere),
		]);
		// no random walk, gamma 0: full attraction puts firefly 1 onto firefly 0
		let nfev = firefly_sweep(&mut pop, &sphere, &bounds, 1.0, 0.0, 0.0, &mut FixedNormal(1.0));
		assert_eq!(nfev, 1);
		assert_eq!(pop.get(1).parameters[0], 0.0);
		assert_eq!(pop.get(1).fitness, 0.0);
		assert_eq!(pop.get(0).parameters[0], 0.0);
	}

	#[test]
	fn test_sweep_attraction_and_walk() {
		let bounds = vec![ParameterBounds::new(-4.0, 4.0)];
		let mut pop = Population::new(vec![
			Candidate::evaluate(Array1::from(vec![0.0]), &sphere),
			Candidate::evaluate(Array1::from(vec![2.0]), &sphere),
		]);
		let gamma = 0.25;
		let nfev = firefly_sweep(&mut pop, &sphere, &bounds, 1.0, gamma, 0.01, &mut FixedNormal(1.0));
		let expected = 2.0 + (-gamma * 4.0f64).exp() * (0.0 - 2.0) + 0.01 * 1.0 * 8.0;
		assert_eq!(nfev, 1);
		assert!((pop.get(1).parameters[0] - expected).abs() < 1e-12);
		assert!((pop.get(1).fitness - expected * expected).abs() < 1e-12);
	}

	fn positions(pop: &Population) -> Vec<f64> {
		pop.as_slice().iter().map(|c| c.parameters[0]).collect()
	}

	fn line(xs: &[f64]) -> Population {
		Population::new(xs.iter().map(|&x| Candidate::evaluate(Array1::from(vec![x]), &sphere)).collect())
	}

	#[test]
	fn test_sweep_move_can_end_later_attraction() {
		let bounds = vec![ParameterBounds::new(-10.0, 10.0)];
		let mut pop = line(&[1.0, 2.0, 3.0]);
		// firefly 2 jumps onto firefly 0 first, after which firefly 1 (now at 1.0) ties it
		let nfev = firefly_sweep(&mut pop, &sphere, &bounds, 1.0, 0.0, 0.0, &mut FixedNormal(0.0));
		assert_eq!(nfev, 2);
		assert_eq!(positions(&pop), vec![1.0, 1.0, 1.0]);
	}

	#[test]
	fn test_sweep_move_can_start_later_attraction() {
		let bounds = vec![ParameterBounds::new(-10.0, 10.0)];
		let mut pop = line(&[1.0, 2.0, 3.0]);
		// firefly 1 moves to 1.5, firefly 2 moves to 2.0 and then sees 1.5 as brighter
		let nfev = firefly_sweep(&mut pop, &sphere, &bounds, 0.5, 0.0, 0.0, &mut FixedNormal(0.0));
		assert_eq!(nfev, 3);
		assert_eq!(positions(&pop), vec![1.0, 1.5, 1.75]);
		assert_eq!(pop.get(2).fitness, 3.0625);
	}

	#[test]
	fn test_solve_with_draw_order() {
		struct Script(Vec<f64>, Vec<f64>);
		impl RandomSource for Script {
			fn uniform(&mut self) -> f64 {
				self.0.remove(0)
			}
			fn normal(&mut self) -> f64 {
				self.1.remove(0)
			}
			fn discrete_uniform(&mut self, _n: usize) -> usize {
				unreachable!()
			}
		}

		let bounds = vec![ParameterBounds::new(-1.0, 1.0)];
		let mut fa = FireflyAlgorithm::new(&sphere, bounds);
		*fa.config_mut() = FireflyConfigBuilder::new().popsize(2).maxiter(1).gamma(0.0).build();
		// fireflies at 0.5 and 0, walk 0.25 * 0.97 * 0.5 * 2 after full attraction
		let mut rng = Script(vec![0.75, 0.5], vec![0.5]);
		let report = fa.solve_with(&mut rng).unwrap();
		assert!(rng.0.is_empty() && rng.1.is_empty());
		assert_eq!(report.nfev, 3);
		assert_eq!(report.parameters[0], 0.0);
		assert!((positions(&report.population)[1] - 0.25 * 0.97).abs() < 1e-12);
	}

	#[test]
	fn test_sweep_clamps() {
		let bounds = vec![ParameterBounds::new(-1.0, 1.0)];
		let mut pop = Population::new(vec![
			Candidate::evaluate(Array1::from(vec![0.0]), &sphere),
			Candidate::evaluate(Array1::from(vec![1.0]), &sphere),
		]);
		firefly_sweep(&mut pop, &sphere, &bounds, 0.0, 0.0, 10.0, &mut FixedNormal(5.0));
		assert_eq!(pop.get(1).parameters[0], 1.0);
	}

	#[test]
	fn test_sweep_ignores_non_finite() {
		let bounds = vec![ParameterBounds::new(-1.0, 1.0)];
		let mut pop = Population::new(vec![
			Candidate::new(Array1::from(vec![0.0]), f64::NAN),
			Candidate::new(Array1::from(vec![0.5]), f64::NAN),
		]);
		let nfev = firefly_sweep(&mut pop, &sphere, &bounds, 1.0, 0.0, 0.1, &mut FixedNormal(1.0));
		assert_eq!(nfev, 0);
	}

	#[test]
	fn test_validation_errors() {
		let bounds = vec![ParameterBounds::new(-1.0, 1.0)];
		let mut fa = FireflyAlgorithm::new(&sphere, bounds.clone());
		fa.config_mut().population_size = 0;
		assert_eq!(fa.solve().unwrap_err(), SwarmError::InvalidPopulationSize(0));

		let mut fa = FireflyAlgorithm::new(&sphere, bounds.clone());
		fa.config_mut().delta = 1.5;
		assert_eq!(fa.solve().unwrap_err(), SwarmError::InvalidParameter { name: "delta", value: 1.5 });

		let mut fa = FireflyAlgorithm::new(&sphere, vec![]);
		assert_eq!(fa.solve().unwrap_err(), SwarmError::EmptyBounds);
	}

	#[test]
	fn test_degenerate_box() {
		let bounds = vec![ParameterBounds::new(2.0, 2.0); 2];
		let mut fa = FireflyAlgorithm::new(&sphere, bounds);
		*fa.config_mut() = FireflyConfigBuilder::new().popsize(5).maxiter(3).seed(1).build();
		let report = fa.solve().unwrap();
		assert_eq!(report.parameters, Array1::from(vec![2.0, 2.0]));
		assert_eq!(report.fitness, 8.0);
		assert_eq!(report.nit, 3);
	}
}
