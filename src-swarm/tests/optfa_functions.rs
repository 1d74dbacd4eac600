use swarmopt::{FireflyConfigBuilder, optimize_firefly, run_recorded_firefly};
use swarmopt_testfunctions::{booth, matyas, sphere};

#[test]
fn test_fa_sphere_3d() {
	let bounds = vec![(-4.0, 4.0); 3];
	let result = optimize_firefly(&sphere, &bounds, 1000, 42).unwrap();
	assert!(result.fitness < 1e-8, "fitness too high: {}", result.fitness);
	for &xi in result.parameters.iter() {
		assert!(xi.abs() < 1e-3, "variable too far from 0: {}", xi);
	}
}

#[test]
fn test_fa_booth() {
	let dir = tempfile::tempdir().unwrap();
	let config = FireflyConfigBuilder::new().seed(7).maxiter(1000).build();
	let (report, _csv_path) = run_recorded_firefly(
		"booth",
		booth,
		&[(-10.0, 10.0), (-10.0, 10.0)],
		config,
		dir.path().to_str().unwrap(),
	)
	.unwrap();

	assert!(report.fitness < 1e-6, "fitness too high: {}", report.fitness);
	assert!((report.parameters[0] - 1.0).abs() < 1e-2);
	assert!((report.parameters[1] - 3.0).abs() < 1e-2);
	assert_eq!(report.nit, 1000);
	assert!(!report.success);
}

#[test]
fn test_fa_matyas() {
	let result = optimize_firefly(&matyas, &[(-10.0, 10.0), (-10.0, 10.0)], 1000, 3).unwrap();
	assert!(result.fitness < 1e-6, "fitness too high: {}", result.fitness);
}
