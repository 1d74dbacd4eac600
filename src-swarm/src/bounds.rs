use serde::{Deserialize, Serialize};

use crate::SwarmError;

/// Closed interval [lower, upper] for one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterBounds {
	pub lower: f64,
	pub upper: f64,
}

impl ParameterBounds {
	pub fn new(lower: f64, upper: f64) -> Self {
		Self { lower, upper }
	}

	pub fn width(&self) -> f64 {
		self.upper - self.lower
	}

	/// Halves before adding so intervals near `f64::MAX` stay finite
	pub fn midpoint(&self) -> f64 {
		self.upper * 0.5 + self.lower * 0.5
	}

	pub fn half_range(&self) -> f64 {
		self.upper * 0.5 - self.lower * 0.5
	}

	pub fn contains(&self, value: f64) -> bool {
		value >= self.lower && value <= self.upper
	}
}

impl From<(f64, f64)> for ParameterBounds {
	fn from((lower, upper): (f64, f64)) -> Self {
		Self::new(lower, upper)
	}
}

/// Check that there is at least one dimension and every bound pair is finite with `lower <= upper`
pub fn validate_bounds(bounds: &[ParameterBounds]) -> Result<(), SwarmError> {
	if bounds.is_empty() {
		return Err(SwarmError::EmptyBounds);
	}
	for (index, b) in bounds.iter().enumerate() {
		if !(b.lower.is_finite() && b.upper.is_finite() && b.lower <= b.upper) {
			return Err(SwarmError::InvalidBounds { index, lower: b.lower, upper: b.upper });
		}
	}
	Ok(())
}

/// Convert (lower, upper) pairs and validate them
pub fn bounds_from_pairs(pairs: &[(f64, f64)]) -> Result<Vec<ParameterBounds>, SwarmError> {
	let bounds: Vec<ParameterBounds> = pairs.iter().map(|&p| p.into()).collect();
	validate_bounds(&bounds)?;
	Ok(bounds)
}

/// Sum of the interval widths, the aggregate scale of the search box
pub fn total_width(bounds: &[ParameterBounds]) -> f64 {
	bounds.iter().map(|b| b.width()).sum()
}
