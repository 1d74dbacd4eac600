use ndarray::Array1;

/// `sum x_i^2`, zero at the origin
pub fn sphere(x: &Array1<f64>) -> f64 {
	x.dot(x)
}

/// Banana valley, zero at `(1, ..., 1)`
pub fn rosenbrock(x: &Array1<f64>) -> f64 {
	let head = x.slice(ndarray::s![..-1]);
	let tail = x.slice(ndarray::s![1..]);
	head.iter()
		.zip(tail.iter())
		.map(|(&a, &b)| 100.0 * (b - a * a).powi(2) + (1.0 - a).powi(2))
		.sum()
}

/// Two dimensional, zero at `(1, 3)`
pub fn booth(x: &Array1<f64>) -> f64 {
	let (a, b) = (x[0], x[1]);
	(a + 2.0 * b - 7.0).powi(2) + (2.0 * a + b - 5.0).powi(2)
}

/// Two dimensional flat plate, zero at the origin.
/// The valley along `x0 = x1` is very shallow.
pub fn matyas(x: &Array1<f64>) -> f64 {
	let (a, b) = (x[0], x[1]);
	0.26 * (a * a + b * b) - 0.48 * a * b
}
