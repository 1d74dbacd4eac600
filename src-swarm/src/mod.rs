//! Swarm based global optimizers for box constrained problems in pure Rust using ndarray
//!
//! Two independent metaheuristics share the same candidate model, random source
//! and sampling helpers:
//! - Cuckoo Search: Levy-flight eggs, random-slot replacement, abandonment of the
//!   worst nests with a linearly decaying keep fraction
//! - Firefly Algorithm: pairwise attraction decaying with distance plus an annealed
//!   random walk
//!
//! Supported features:
//! - Box constraints (lower/upper bounds), every candidate is clamped into the box
//! - Seeded, reproducible runs through the `RandomSource` trait
//! - Per-generation callback that may stop a run early
//! - Optional parallel evaluation of independent candidates (same results as sequential)
//! - CSV recording of the optimisation trace
//!
//! ```
//! use ndarray::Array1;
//! use swarmopt::optimize_firefly;
//!
//! let sphere = |x: &Array1<f64>| x.iter().map(|v| v * v).sum::<f64>();
//! let result = optimize_firefly(&sphere, &[(-4.0, 4.0); 2], 200, 42).unwrap();
//! assert!(result.fitness < 1e-3);
//! ```

use std::fmt;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

pub mod bounds;
pub mod candidate;
pub mod init_random;
pub mod levy_flight;
pub mod random_source;
pub mod truncate;

pub mod cuckoo;
pub mod firefly;

pub mod optimize;
pub mod parallel_eval;
pub mod recorder;
pub mod run_recorded;


pub use bounds::{ParameterBounds, bounds_from_pairs, validate_bounds};
pub use candidate::{Candidate, Population, compare_fitness, is_better};
pub use cuckoo::{CuckooConfig, CuckooConfigBuilder, CuckooSearch, Replacement};
pub use firefly::{FireflyAlgorithm, FireflyConfig, FireflyConfigBuilder};
pub use levy_flight::LevyStepSize;
pub use optimize::{cuckoo_search, firefly_algorithm, optimize_cuckoo, optimize_firefly};
pub use parallel_eval::{ParallelConfig, ParallelEvaluator};
pub use random_source::{RandomSource, SeededRandom};
pub use recorder::{OptimizationRecord, OptimizationRecorder};
pub use run_recorded::{run_recorded_cuckoo, run_recorded_firefly};

/// Configuration errors, all detected before the first evaluation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SwarmError {
	#[error("bound[{index}] has lower {lower} > upper {upper}")]
	InvalidBounds { index: usize, lower: f64, upper: f64 },

	#[error("no bounds given, at least one dimension is required")]
	EmptyBounds,

	#[error("population size must be at least 1, got {0}")]
	InvalidPopulationSize(usize),

	#[error("maximum number of generations must be >= 0, got {0}")]
	InvalidIterationCount(i64),

	#[error("Levy exponent must be a positive number, got {0}")]
	InvalidLevyExponent(f64),

	#[error("invalid value {value} for parameter {name}")]
	InvalidParameter { name: &'static str, value: f64 },
}

/// Best parameters found and their objective value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
	pub parameters: Array1<f64>,
	pub fitness: f64,
}

impl From<&Candidate> for OptimizationResult {
	fn from(c: &Candidate) -> Self {
		Self { parameters: c.parameters.clone(), fitness: c.fitness }
	}
}

/// Result/Report of an optimization run
#[derive(Clone)]
pub struct SwarmReport {
	pub parameters: Array1<f64>,
	pub fitness: f64,
	/// Tolerance reached or stopped by the callback
	pub success: bool,
	pub message: String,
	/// Generations run
	pub nit: usize,
	/// Objective evaluations
	pub nfev: usize,
	/// Final population, sorted ascending by fitness
	pub population: Population,
}

impl SwarmReport {
	pub fn result(&self) -> OptimizationResult {
		OptimizationResult { parameters: self.parameters.clone(), fitness: self.fitness }
	}
}

impl fmt::Debug for SwarmReport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SwarmReport")
			.field("parameters", &format!("len={}", self.parameters.len()))
			.field("fitness", &self.fitness)
			.field("success", &self.success)
			.field("message", &self.message)
			.field("nit", &self.nit)
			.field("nfev", &self.nfev)
			.field("population", &format!("len={}", self.population.len()))
			.finish()
	}
}

/// Information passed to callback after each generation
pub struct SwarmIntermediate {
	pub x: Array1<f64>,
	pub fun: f64,
	/// std of the finite fitness values in the population
	pub convergence: f64,
	pub iter: usize,
}

/// Action returned by callback
pub enum CallbackAction {
	Continue,
	Stop,
}

/// Per-generation callback
pub type Callback = Box<dyn FnMut(&SwarmIntermediate) -> CallbackAction>;

/// Timing toggle via env var
pub(crate) fn timing_enabled() -> bool {
	std::env::var("SWARMOPT_TIMING").map(|v| v != "0").unwrap_or(false)
}

pub(crate) fn log_generation(disp: bool, engine: &str, iter: usize, best_f: f64, spread: f64) {
	if disp {
		log::info!("{} iter {:5}  best_f={:.6e}  std={:.3e}", engine, iter, best_f, spread);
	} else {
		log::trace!("{} iter {:5}  best_f={:.6e}  std={:.3e}", engine, iter, best_f, spread);
	}
}
