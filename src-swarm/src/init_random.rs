use ndarray::Array1;

use crate::bounds::ParameterBounds;
use crate::random_source::RandomSource;
use crate::truncate::truncate;

/// Map a draw `r` in [-1, 1] onto [lower, upper] around the interval midpoint.
///
/// The result is clamped, so rounding never leaves the interval.
pub fn random_parameter(lower: f64, upper: f64, r: f64) -> f64 {
	let b = ParameterBounds::new(lower, upper);
	truncate(lower, upper, b.midpoint() + b.half_range() * r)
}

/// One `random_parameter` per dimension; `draw` is called once per dimension, in order
pub fn random_parameters<D>(bounds: &[ParameterBounds], mut draw: D) -> Array1<f64>
where
	D: FnMut() -> f64,
{
	bounds.iter().map(|b| random_parameter(b.lower, b.upper, draw())).collect()
}

/// Draw `count` parameter vectors, each dimension from `2 * uniform() - 1`.
///
/// All draws happen here, before any evaluation, so the vectors can be evaluated in parallel
/// without changing the random stream.
pub fn sample_parameters<R>(bounds: &[ParameterBounds], count: usize, rng: &mut R) -> Vec<Array1<f64>>
where
	R: RandomSource + ?Sized,
{
	(0..count).map(|_| random_parameters(bounds, || rng.symmetric_uniform())).collect()
}
