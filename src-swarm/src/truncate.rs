use crate::bounds::ParameterBounds;

/// Saturating clamp of `value` into [lower, upper].
///
/// NaN maps to the interval midpoint.
pub fn truncate(lower: f64, upper: f64, value: f64) -> f64 {
	if value > upper {
		upper
	} else if value < lower {
		lower
	} else if value.is_nan() {
		ParameterBounds::new(lower, upper).midpoint()
	} else {
		value
	}
}

/// Clamp a proposed move of one coordinate; a NaN move leaves the coordinate at `current`
pub fn truncate_move(bounds: &ParameterBounds, current: f64, moved: f64) -> f64 {
	let target = if moved.is_nan() { current } else { moved };
	truncate(bounds.lower, bounds.upper, target)
}
