use std::error::Error;
use std::fs;

use clap::{Parser, ValueEnum};
use ndarray::Array1;
use serde::Serialize;

use swarmopt::{
	CuckooConfig, FireflyConfig, SwarmReport, cuckoo_search, firefly_algorithm, run_recorded_cuckoo,
	run_recorded_firefly,
};
use swarmopt_testfunctions::{get_function, get_function_bounds_vec, get_function_metadata};

#[derive(Debug, Clone, Copy, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
enum Algorithm {
	Cuckoo,
	Firefly,
}

/// Run a swarm optimizer on one of the benchmark functions
#[derive(Parser)]
#[command(name = "run_swarm")]
#[command(about = "Minimize a benchmark function with Cuckoo Search or the Firefly Algorithm")]
struct Args {
	#[arg(short, long, value_enum, default_value = "cuckoo")]
	algorithm: Algorithm,

	/// Benchmark function name
	#[arg(short, long, default_value = "sphere")]
	function: String,

	/// Number of dimensions
	#[arg(short, long, default_value = "2")]
	dim: usize,

	/// Population size (overrides the config file)
	#[arg(long)]
	popsize: Option<usize>,

	/// Maximum number of generations (overrides the config file)
	#[arg(long)]
	maxiter: Option<usize>,

	/// Cuckoo tolerance on the best fitness (overrides the config file)
	#[arg(long)]
	tol: Option<f64>,

	#[arg(long)]
	seed: Option<u64>,

	/// JSON file with the engine configuration
	#[arg(long)]
	config: Option<String>,

	/// Directory receiving a CSV trace of the run
	#[arg(long)]
	record: Option<String>,

	/// Print the result as JSON
	#[arg(long)]
	json: bool,

	/// Log progress every generation
	#[arg(short, long)]
	verbose: bool,

	/// List the available functions and exit
	#[arg(long)]
	list: bool,
}

#[derive(Serialize)]
struct RunSummary<'a> {
	algorithm: Algorithm,
	function: &'a str,
	parameters: Vec<f64>,
	fitness: f64,
	success: bool,
	message: &'a str,
	nit: usize,
	nfev: usize,
}

fn load_config<T: serde::de::DeserializeOwned + Default>(path: Option<&str>) -> Result<T, Box<dyn Error>> {
	match path {
		Some(p) => Ok(serde_json::from_str(&fs::read_to_string(p)?)?),
		None => Ok(T::default()),
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let args = Args::parse();

	if args.list {
		let mut names: Vec<_> = get_function_metadata().into_values().collect();
		names.sort_by(|a, b| a.name.cmp(&b.name));
		for m in names {
			println!("{:<16} {}", m.name, m.description);
		}
		return Ok(());
	}

	let func = get_function(&args.function).ok_or_else(|| format!("unknown function '{}'", args.function))?;
	let objective = move |x: &Array1<f64>| func(x);
	let bounds = get_function_bounds_vec(&args.function, args.dim, (-5.0, 5.0));
	log::info!("{:?} on {} with {} dimensions", args.algorithm, args.function, bounds.len());

	let (report, csv_path): (SwarmReport, Option<String>) = match args.algorithm {
		Algorithm::Cuckoo => {
			let mut config: CuckooConfig = load_config(args.config.as_deref())?;
			if let Some(v) = args.popsize {
				config.population_size = v;
			}
			if let Some(v) = args.maxiter {
				config.max_generations = v;
			}
			if let Some(v) = args.tol {
				config.tolerance = v;
			}
			if args.seed.is_some() {
				config.seed = args.seed;
			}
			config.disp |= args.verbose;
			match &args.record {
				Some(dir) => {
					let (r, p) = run_recorded_cuckoo(&args.function, objective, &bounds, config, dir)?;
					(r, Some(p))
				}
				None => (cuckoo_search(&objective, &bounds, config)?, None),
			}
		}
		Algorithm::Firefly => {
			let mut config: FireflyConfig = load_config(args.config.as_deref())?;
			if let Some(v) = args.popsize {
				config.population_size = v;
			}
			if let Some(v) = args.maxiter {
				config.max_generations = v;
			}
			if args.tol.is_some() {
				log::warn!("--tol is ignored by the firefly algorithm");
			}
			if args.seed.is_some() {
				config.seed = args.seed;
			}
			config.disp |= args.verbose;
			match &args.record {
				Some(dir) => {
					let (r, p) = run_recorded_firefly(&args.function, objective, &bounds, config, dir)?;
					(r, Some(p))
				}
				None => (firefly_algorithm(&objective, &bounds, config)?, None),
			}
		}
	};

	if let Some(p) = &csv_path {
		log::info!("trace saved to {}", p);
	}

	if args.json {
		let summary = RunSummary {
			algorithm: args.algorithm,
			function: &args.function,
			parameters: report.parameters.to_vec(),
			fitness: report.fitness,
			success: report.success,
			message: &report.message,
			nit: report.nit,
			nfev: report.nfev,
		};
		println!("{}", serde_json::to_string_pretty(&summary)?);
	} else {
		println!("{}", report.message);
		println!("f(x) = {:.6e} after {} generations, {} evaluations", report.fitness, report.nit, report.nfev);
		let xs: Vec<String> = report.parameters.iter().map(|v| format!("{:.6}", v)).collect();
		println!("x = [{}]", xs.join(", "));
	}

	Ok(())
}
