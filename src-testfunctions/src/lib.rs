//! Optimization test functions library
//!
//! Benchmark objectives used to validate the swarm optimizers, with a name registry
//! and default search boxes.
//!
//! # Example
//!
//! ```rust
//! use ndarray::Array1;
//! use swarmopt_testfunctions::*;
//!
//! let x = Array1::from_vec(vec![0.0, 0.0]);
//! let result = sphere(&x);
//! assert_eq!(result, 0.0);
//!
//! // Get function metadata
//! let bounds = get_function_bounds("sphere");
//! assert!(bounds.is_some());
//! ```

use ndarray::Array1;
use std::collections::HashMap;

pub mod functions;
pub use functions::*;

/// Signature shared by every test function
pub type TestFunction = fn(&Array1<f64>) -> f64;

/// Metadata for a test function including bounds and known minima
#[derive(Debug, Clone)]
pub struct FunctionMetadata {
	/// Function name
	pub name: String,
	/// Bounds for each dimension (min, max)
	pub bounds: Vec<(f64, f64)>,
	/// Global minima locations and values
	pub global_minima: Vec<(Vec<f64>, f64)>,
	/// Description of the function
	pub description: String,
	/// Whether the function is multimodal
	pub multimodal: bool,
	/// Whether the function accepts any dimension >= 2 (otherwise fixed to `bounds.len()`)
	pub n_dimensional: bool,
}

fn entry(
	name: &str,
	bounds: Vec<(f64, f64)>,
	global_minima: Vec<(Vec<f64>, f64)>,
	description: &str,
	multimodal: bool,
	n_dimensional: bool,
) -> (String, FunctionMetadata) {
	(
		name.to_string(),
		FunctionMetadata {
			name: name.to_string(),
			bounds,
			global_minima,
			description: description.to_string(),
			multimodal,
			n_dimensional,
		},
	)
}

/// Get metadata for all available test functions
pub fn get_function_metadata() -> HashMap<String, FunctionMetadata> {
	HashMap::from([
		entry(
			"sphere",
			vec![(-5.12, 5.12); 2],
			vec![(vec![0.0, 0.0], 0.0)],
			"N-dimensional unimodal bowl",
			false,
			true,
		),
		entry(
			"rosenbrock",
			vec![(-5.0, 10.0); 2],
			vec![(vec![1.0, 1.0], 0.0)],
			"N-dimensional curved valley",
			false,
			true,
		),
		entry(
			"booth",
			vec![(-10.0, 10.0); 2],
			vec![(vec![1.0, 3.0], 0.0)],
			"2D unimodal function",
			false,
			false,
		),
		entry(
			"matyas",
			vec![(-10.0, 10.0); 2],
			vec![(vec![0.0, 0.0], 0.0)],
			"2D unimodal plate",
			false,
			false,
		),
		entry(
			"rastrigin",
			vec![(-5.12, 5.12); 2],
			vec![(vec![0.0, 0.0], 0.0)],
			"N-dimensional highly multimodal function",
			true,
			true,
		),
		entry(
			"ackley",
			vec![(-32.768, 32.768); 2],
			vec![(vec![0.0, 0.0], 0.0)],
			"N-dimensional multimodal function",
			true,
			true,
		),
		entry(
			"himmelblau",
			vec![(-5.0, 5.0); 2],
			vec![
				(vec![3.0, 2.0], 0.0),
				(vec![-2.805118, 3.131312], 0.0),
				(vec![-3.779310, -3.283186], 0.0),
				(vec![3.584428, -1.848126], 0.0),
			],
			"2D function with four global minima",
			true,
			false,
		),
	])
}

/// Look up a test function by name
pub fn get_function(name: &str) -> Option<TestFunction> {
	let f: TestFunction = match name {
		"sphere" => sphere,
		"rosenbrock" => rosenbrock,
		"booth" => booth,
		"matyas" => matyas,
		"rastrigin" => rastrigin,
		"ackley" => ackley,
		"himmelblau" => himmelblau,
		_ => return None,
	};
	Some(f)
}

/// Default bounds of a function as listed in its metadata
pub fn get_function_bounds(name: &str) -> Option<Vec<(f64, f64)>> {
	get_function_metadata().get(name).map(|meta| meta.bounds.clone())
}

/// Bounds for `dim` dimensions.
///
/// N-dimensional functions repeat their first bound; fixed-dimension functions ignore `dim`.
/// Unknown names get `fallback` repeated `dim` times.
pub fn get_function_bounds_vec(name: &str, dim: usize, fallback: (f64, f64)) -> Vec<(f64, f64)> {
	match get_function_metadata().get(name) {
		Some(meta) if meta.n_dimensional => vec![meta.bounds[0]; dim],
		Some(meta) => meta.bounds.clone(),
		None => vec![fallback; dim],
	}
}
