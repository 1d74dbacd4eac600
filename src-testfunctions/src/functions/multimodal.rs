use std::f64::consts::{E, TAU};

use ndarray::Array1;

/// Cosine modulated bowl with a regular grid of local minima; zero at the origin
pub fn rastrigin(x: &Array1<f64>) -> f64 {
	x.iter().map(|&v| 10.0 + v * v - 10.0 * (TAU * v).cos()).sum()
}

/// Nearly flat outer region with a deep hole at the origin, where it is zero
pub fn ackley(x: &Array1<f64>) -> f64 {
	let n = x.len() as f64;
	let mean_sq = x.dot(x) / n;
	let mean_cos = x.iter().map(|&v| (TAU * v).cos()).sum::<f64>() / n;
	20.0 + E - 20.0 * (-0.2 * mean_sq.sqrt()).exp() - mean_cos.exp()
}

/// Two dimensional, four minima of value zero
pub fn himmelblau(x: &Array1<f64>) -> f64 {
	let (a, b) = (x[0], x[1]);
	(a * a + b - 11.0).powi(2) + (a + b * b - 7.0).powi(2)
}
