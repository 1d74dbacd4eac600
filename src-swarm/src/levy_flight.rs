//! Levy-flight step shared by the cuckoo engine

use serde::{Deserialize, Serialize};

use crate::bounds::ParameterBounds;

/// Heavy tailed step length `r^(-1/alpha)` for `r` in (0, 1]
pub fn levy(alpha: f64, r: f64) -> f64 {
	r.powf(-1.0 / alpha)
}

/// Move `current` by `step_size * levy(alpha, r) * norm_rand`
pub fn levy_flight(current: f64, step_size: f64, alpha: f64, r: f64, norm_rand: f64) -> f64 {
	current + step_size * levy(alpha, r) * norm_rand
}

/// How the Levy step size is derived from the displacement to the best nest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevyStepSize {
	/// `scale * (upper - lower) * (current - best)`
	#[default]
	DomainScaled,
	/// `scale * (current - best)`; the older form, ignores the width of the box.
	/// Kept for reproducing historical runs only.
	Unscaled,
}

impl LevyStepSize {
	pub fn step_size(self, scale: f64, bounds: &ParameterBounds, current: f64, best: f64) -> f64 {
		match self {
			LevyStepSize::DomainScaled => scale * bounds.width() * (current - best),
			LevyStepSize::Unscaled => scale * (current - best),
		}
	}
}
