//! Recording wrappers around the engines, used for testing and analysis

use ndarray::Array1;

use crate::cuckoo::CuckooConfig;
use crate::firefly::FireflyConfig;
use crate::recorder::OptimizationRecorder;
use crate::{SwarmReport, cuckoo_search, firefly_algorithm};

/// Run Cuckoo Search and write one CSV row per generation to `<output_dir>/<function_name>.csv`.
///
/// A callback already present in `config` still runs after the recorder.
pub fn run_recorded_cuckoo<F>(
	function_name: &str,
	func: F,
	bounds: &[(f64, f64)],
	mut config: CuckooConfig,
	output_dir: &str,
) -> Result<(SwarmReport, String), Box<dyn std::error::Error>>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let recorder = OptimizationRecorder::new(function_name);
	config.callback = Some(recorder.chain_callback(config.callback.take()));
	let report = cuckoo_search(&func, bounds, config)?;
	let csv_path = recorder.save_to_csv(output_dir)?;
	log::debug!("{}: {} generations recorded to {}", function_name, recorder.num_iterations(), csv_path);
	Ok((report, csv_path))
}

/// Firefly counterpart of `run_recorded_cuckoo`
pub fn run_recorded_firefly<F>(
	function_name: &str,
	func: F,
	bounds: &[(f64, f64)],
	mut config: FireflyConfig,
	output_dir: &str,
) -> Result<(SwarmReport, String), Box<dyn std::error::Error>>
where
	F: Fn(&Array1<f64>) -> f64 + Sync,
{
	let recorder = OptimizationRecorder::new(function_name);
	config.callback = Some(recorder.chain_callback(config.callback.take()));
	let report = firefly_algorithm(&func, bounds, config)?;
	let csv_path = recorder.save_to_csv(output_dir)?;
	log::debug!("{}: {} generations recorded to {}", function_name, recorder.num_iterations(), csv_path);
	Ok((report, csv_path))
}
