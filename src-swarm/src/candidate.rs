use std::cmp::Ordering;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::bounds::ParameterBounds;

/// Orders fitness values ascending; NaN and infinite values sort after every finite value
pub fn compare_fitness(a: f64, b: f64) -> Ordering {
	match (a.is_finite(), b.is_finite()) {
		(true, true) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => Ordering::Equal,
	}
}

/// True when `candidate` is a strict improvement over `incumbent`.
///
/// A non-finite candidate is never better, whatever the incumbent holds.
pub fn is_better(candidate: f64, incumbent: f64) -> bool {
	candidate.is_finite() && (!incumbent.is_finite() || candidate < incumbent)
}

/// A parameter vector with the objective value it was evaluated to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
	pub parameters: Array1<f64>,
	pub fitness: f64,
}

impl Candidate {
	/// Pair `parameters` with an already known fitness
	pub fn new(parameters: Array1<f64>, fitness: f64) -> Self {
		Self { parameters, fitness }
	}

	/// Evaluate `func` at `parameters`
	pub fn evaluate<F>(parameters: Array1<f64>, func: &F) -> Self
	where
		F: Fn(&Array1<f64>) -> f64 + ?Sized,
	{
		let fitness = func(&parameters);
		Self { parameters, fitness }
	}

	pub fn within_bounds(&self, bounds: &[ParameterBounds]) -> bool {
		self.parameters.len() == bounds.len()
			&& self.parameters.iter().zip(bounds).all(|(&x, b)| b.contains(x))
	}
}

/// Fixed size collection of candidates, kept sorted by the engines after each generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Population {
	candidates: Vec<Candidate>,
}

impl Population {
	pub fn new(candidates: Vec<Candidate>) -> Self {
		Self { candidates }
	}

	pub fn len(&self) -> usize {
		self.candidates.len()
	}

	pub fn is_empty(&self) -> bool {
		self.candidates.is_empty()
	}

	/// Sort ascending by fitness; stability is not required
	pub fn sort(&mut self) {
		self.candidates.sort_unstable_by(|a, b| compare_fitness(a.fitness, b.fitness));
	}

	pub fn is_sorted(&self) -> bool {
		self.candidates
			.windows(2)
			.all(|w| compare_fitness(w[0].fitness, w[1].fitness) != Ordering::Greater)
	}

	/// First candidate; the best one once sorted
	///
	/// # Panics
	/// On an empty population, which the engines never build.
	pub fn best(&self) -> &Candidate {
		&self.candidates[0]
	}

	pub fn get(&self, i: usize) -> &Candidate {
		&self.candidates[i]
	}

	/// Overwrite slot `i` when `candidate` is strictly better; returns whether it was taken
	pub fn replace_if_better(&mut self, i: usize, candidate: Candidate) -> bool {
		if is_better(candidate.fitness, self.candidates[i].fitness) {
			self.candidates[i] = candidate;
			true
		} else {
			false
		}
	}

	pub fn set(&mut self, i: usize, candidate: Candidate) {
		self.candidates[i] = candidate;
	}

	/// Replace the last `fresh.len()` entries
	pub fn replace_tail(&mut self, fresh: Vec<Candidate>) {
		let start = self.candidates.len() - fresh.len();
		for (slot, candidate) in self.candidates[start..].iter_mut().zip(fresh) {
			*slot = candidate;
		}
	}

	pub fn as_slice(&self) -> &[Candidate] {
		&self.candidates
	}

	pub fn as_mut_slice(&mut self) -> &mut [Candidate] {
		&mut self.candidates
	}

	pub fn fitness(&self) -> Array1<f64> {
		self.candidates.iter().map(|c| c.fitness).collect()
	}

	pub fn within_bounds(&self, bounds: &[ParameterBounds]) -> bool {
		self.candidates.iter().all(|c| c.within_bounds(bounds))
	}

	/// Population standard deviation of the finite fitness values
	pub fn fitness_std(&self) -> f64 {
		let finite: Vec<f64> =
			self.candidates.iter().map(|c| c.fitness).filter(|f| f.is_finite()).collect();
		if finite.is_empty() {
			return f64::NAN;
		}
		let n = finite.len() as f64;
		let mean = finite.iter().sum::<f64>() / n;
		(finite.iter().map(|f| (f - mean).powi(2)).sum::<f64>() / n).sqrt()
	}
}
