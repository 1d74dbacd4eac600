use swarmopt::{
	CuckooConfigBuilder, FireflyConfigBuilder, SwarmError, cuckoo_search, firefly_algorithm, optimize_cuckoo,
	optimize_firefly,
};
use swarmopt_testfunctions::sphere;

#[test]
fn test_invalid_bounds() {
	let err = optimize_cuckoo(&sphere, &[(0.0, 1.0), (3.0, -3.0)], 25, 10, 0.0, 1).unwrap_err();
	assert_eq!(err, SwarmError::InvalidBounds { index: 1, lower: 3.0, upper: -3.0 });

	let err = optimize_firefly(&sphere, &[(f64::NAN, 1.0)], 10, 1).unwrap_err();
	assert!(matches!(err, SwarmError::InvalidBounds { index: 0, .. }));

	assert_eq!(optimize_firefly(&sphere, &[], 10, 1).unwrap_err(), SwarmError::EmptyBounds);
}

#[test]
fn test_unbounded_and_huge_boxes() {
	let err = optimize_cuckoo(&sphere, &[(f64::NEG_INFINITY, f64::INFINITY)], 10, 10, 0.0, 1).unwrap_err();
	assert!(matches!(err, SwarmError::InvalidBounds { index: 0, .. }));

	let bounds = [(-1e308, 1e308), (-f64::MAX, f64::MAX)];
	let report = firefly_algorithm(&sphere, &bounds, FireflyConfigBuilder::new().seed(2).maxiter(5).build()).unwrap();
	for (x, (lo, hi)) in report.parameters.iter().zip(bounds) {
		assert!(x.is_finite() && *x >= lo && *x <= hi);
	}
}

#[test]
fn test_invalid_population_size() {
	let err = optimize_cuckoo(&sphere, &[(-1.0, 1.0)], 0, 10, 0.0, 1).unwrap_err();
	assert_eq!(err, SwarmError::InvalidPopulationSize(0));

	let err = firefly_algorithm(&sphere, &[(-1.0, 1.0)], FireflyConfigBuilder::new().popsize(0).build())
		.unwrap_err();
	assert_eq!(err, SwarmError::InvalidPopulationSize(0));
}

#[test]
fn test_invalid_iteration_count() {
	assert_eq!(
		optimize_cuckoo(&sphere, &[(-1.0, 1.0)], 25, -3, 0.0, 1).unwrap_err(),
		SwarmError::InvalidIterationCount(-3)
	);
	assert_eq!(
		optimize_firefly(&sphere, &[(-1.0, 1.0)], i64::MIN, 1).unwrap_err(),
		SwarmError::InvalidIterationCount(i64::MIN)
	);
}

#[test]
fn test_invalid_levy_exponent() {
	for alpha in [0.0, -1.5, f64::INFINITY] {
		let err = cuckoo_search(&sphere, &[(-1.0, 1.0)], CuckooConfigBuilder::new().alpha(alpha).build())
			.unwrap_err();
		assert!(matches!(err, SwarmError::InvalidLevyExponent(_)), "alpha={} gave {:?}", alpha, err);
	}
}

#[test]
fn test_invalid_parameters() {
	let err = cuckoo_search(&sphere, &[(-1.0, 1.0)], CuckooConfigBuilder::new().step_scale(0.0).build())
		.unwrap_err();
	assert_eq!(err, SwarmError::InvalidParameter { name: "step_scale", value: 0.0 });

	let err = cuckoo_search(&sphere, &[(-1.0, 1.0)], CuckooConfigBuilder::new().abandonment(-0.1, 0.5).build())
		.unwrap_err();
	assert_eq!(err, SwarmError::InvalidParameter { name: "p_min", value: -0.1 });

	let err = firefly_algorithm(&sphere, &[(-1.0, 1.0)], FireflyConfigBuilder::new().gamma(-1.0).build())
		.unwrap_err();
	assert_eq!(err, SwarmError::InvalidParameter { name: "gamma", value: -1.0 });
}

#[test]
fn test_errors_detected_before_evaluation() {
	let calls = std::sync::atomic::AtomicUsize::new(0);
	let counted = |x: &ndarray::Array1<f64>| {
		calls.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
		sphere(x)
	};
	assert!(optimize_cuckoo(&counted, &[(-1.0, 1.0)], 25, -1, 0.0, 1).is_err());
	assert!(optimize_firefly(&counted, &[(2.0, 1.0)], 10, 1).is_err());
	assert_eq!(calls.load(std::sync::atomic::Ordering::Relaxed), 0);
}

#[test]
fn test_config_from_json() {
	let config: swarmopt::CuckooConfig =
		serde_json::from_str(r#"{"population_size": 10, "alpha": 1.2, "step_size": "unscaled", "seed": 3}"#)
			.unwrap();
	assert_eq!(config.population_size, 10);
	assert_eq!(config.alpha, 1.2);
	assert_eq!(config.step_size, swarmopt::LevyStepSize::Unscaled);
	assert_eq!(config.p_max, 0.5);
	assert!(config.callback.is_none());

	let config: swarmopt::FireflyConfig =
		serde_json::from_str(r#"{"max_generations": 5, "gamma": 0.1, "parallel": {"enabled": true}}"#).unwrap();
	assert_eq!(config.max_generations, 5);
	assert_eq!(config.gamma, Some(0.1));
	assert!(config.parallel.enabled);
	assert_eq!(config.parallel.num_threads, None);
}
