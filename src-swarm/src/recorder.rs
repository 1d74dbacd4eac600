use std::fs::create_dir_all;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use crate::{Callback, CallbackAction, SwarmIntermediate};

/// Records optimization progress via the per-generation callback
#[derive(Debug, Clone)]
pub struct OptimizationRecorder {
	/// Run name, used for the CSV file name
	function_name: String,
	records: Arc<Mutex<Vec<OptimizationRecord>>>,
}

/// A single generation record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationRecord {
	pub iteration: usize,
	/// Best parameters at the end of the generation
	pub x: Vec<f64>,
	pub best_result: f64,
	/// Standard deviation of the population fitness
	pub convergence: f64,
	/// Strictly better than every previous record
	pub is_improvement: bool,
}

fn lock(records: &Mutex<Vec<OptimizationRecord>>) -> MutexGuard<'_, Vec<OptimizationRecord>> {
	records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl OptimizationRecorder {
	pub fn new(function_name: impl Into<String>) -> Self {
		Self { function_name: function_name.into(), records: Arc::new(Mutex::new(Vec::new())) }
	}

	/// Callback that appends one record per generation and never stops the run
	pub fn create_callback(&self) -> Callback {
		self.chain_callback(None)
	}

	/// Same as `create_callback`, then forwards to `next` and returns its decision
	pub fn chain_callback(&self, mut next: Option<Callback>) -> Callback {
		let records = self.records.clone();
		Box::new(move |intermediate: &SwarmIntermediate| -> CallbackAction {
			{
				let mut guard = lock(&records);
				let is_improvement = guard.iter().all(|r| intermediate.fun < r.best_result);
				guard.push(OptimizationRecord {
					iteration: intermediate.iter,
					x: intermediate.x.to_vec(),
					best_result: intermediate.fun,
					convergence: intermediate.convergence,
					is_improvement,
				});
			}
			match next.as_mut() {
				Some(cb) => cb(intermediate),
				None => CallbackAction::Continue,
			}
		})
	}

	/// Write all records to `<output_dir>/<function_name>.csv` and return the path
	pub fn save_to_csv(&self, output_dir: &str) -> Result<String, Box<dyn std::error::Error>> {
		create_dir_all(output_dir)?;
		let filename = Path::new(output_dir)
			.join(format!("{}.csv", self.function_name))
			.to_string_lossy()
			.into_owned();
		let mut writer = csv::Writer::from_path(&filename)?;

		let records = lock(&self.records);
		let Some(first) = records.first() else {
			writer.flush()?;
			return Ok(filename);
		};

		let mut header = vec!["iteration".to_string()];
		header.extend((0..first.x.len()).map(|i| format!("x{}", i)));
		header.extend(["best_result", "convergence", "is_improvement"].map(String::from));
		writer.write_record(&header)?;

		for record in records.iter() {
			let mut row = vec![record.iteration.to_string()];
			row.extend(record.x.iter().map(|xi| format!("{:.16}", xi)));
			row.push(format!("{:.16}", record.best_result));
			row.push(format!("{:.16}", record.convergence));
			row.push(record.is_improvement.to_string());
			writer.write_record(&row)?;
		}
		writer.flush()?;

		Ok(filename)
	}

	pub fn get_records(&self) -> Vec<OptimizationRecord> {
		lock(&self.records).clone()
	}

	pub fn num_iterations(&self) -> usize {
		lock(&self.records).len()
	}

	pub fn clear(&self) {
		lock(&self.records).clear();
	}

	/// Last recorded best, if any generation ran
	pub fn get_best_solution(&self) -> Option<(Vec<f64>, f64)> {
		lock(&self.records).last().map(|r| (r.x.clone(), r.best_result))
	}
}
