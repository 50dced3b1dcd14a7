#![allow(non_snake_case)]

use conegen::{
    algebra::*, cones::*, conformance::*, generator::*, io::ConfigurablePrintTarget,
};
use std::fmt;

fn mixed_cone_spec() -> ConeSpec {
    ConeSpecBuilder::default()
        .z(10)
        .l(15)
        .q(vec![5, 10, 0, 1])
        .s(vec![3, 4, 0, 0, 1, 10])
        .ep(10)
        .ed(10)
        .p(vec![-0.25, 0.5, 0.75, -0.33])
        .build()
        .unwrap()
}

// answers with the certificate after applying `perturb` to it
struct PerturbedOracle<F> {
    perturb: F,
}

impl<F> SolverAdapter<f64> for PerturbedOracle<F>
where
    F: FnMut(&mut Solution<f64>),
{
    type Error = std::convert::Infallible;

    fn solve(
        &mut self,
        problem: &ProblemInstance<f64>,
        options: &SolverOptions<f64>,
    ) -> Result<Solution<f64>, Self::Error> {
        let mut solution = CertificateOracle.solve(problem, options)?;
        (self.perturb)(&mut solution);
        Ok(solution)
    }
}

#[derive(Debug)]
struct SolverCrashed;

impl fmt::Display for SolverCrashed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "numerical failure")
    }
}

impl std::error::Error for SolverCrashed {}

struct FailingSolver;

impl SolverAdapter<f64> for FailingSolver {
    type Error = SolverCrashed;

    fn solve(
        &mut self,
        _problem: &ProblemInstance<f64>,
        _options: &SolverOptions<f64>,
    ) -> Result<Solution<f64>, SolverCrashed> {
        Err(SolverCrashed)
    }
}

#[test]
fn test_oracle_passes_all_regimes() {
    let spec = mixed_cone_spec();
    let options = SolverOptions::default();

    let problems = [
        generate_feasible(&spec, 60, 0.1, 1).unwrap(),
        generate_infeasible(&spec, 60, 0.1, 2).unwrap(),
        generate_unbounded(&spec, 60, 0.1, 3).unwrap(),
    ];

    for problem in problems.iter() {
        let report = run_conformance(
            &mut CertificateOracle,
            problem,
            &options,
            ConformanceTolerances::default(),
        )
        .unwrap();
        assert_eq!(report.kind, problem.kind());
        assert!(report.passed());
    }
}

#[test]
fn test_feasible_report_contents() {
    let spec = mixed_cone_spec();
    let problem = generate_feasible(&spec, 40, 0.2, 11).unwrap();
    let checker = ConformanceChecker::<f64>::default();

    let solution = CertificateOracle.solve(&problem, &SolverOptions::default()).unwrap();
    let report = checker.check(&problem, &solution).unwrap();

    let names: Vec<&str> = report.checks.iter().map(|c| c.name).collect();
    assert_eq!(
        names,
        vec![
            "objective",
            "primal residual",
            "dual residual",
            "complementarity",
            "primal cone membership",
            "dual cone membership",
        ]
    );
    assert_eq!(report.get("complementarity").unwrap().bound, 1.5e-7);
}

#[test]
fn test_perturbed_slack_fails() {
    let spec = mixed_cone_spec();
    let problem = generate_feasible(&spec, 60, 0.1, 1).unwrap();

    let mut adapter = PerturbedOracle {
        perturb: |sol: &mut Solution<f64>| {
            sol.s.scalarop(|s| s + 1.);
        },
    };

    let result = run_conformance(
        &mut adapter,
        &problem,
        &SolverOptions::default(),
        ConformanceTolerances::default(),
    );

    match result {
        Err(ConformanceError::Failed { failed }) => {
            assert!(failed.contains(&"primal residual"));
            assert!(!failed.contains(&"dual residual"));
        }
        _ => panic!("perturbed solution passed conformance"),
    }
}

#[test]
fn test_reversed_dual_ray_fails() {
    let spec = mixed_cone_spec();
    let problem = generate_infeasible(&spec, 60, 0.1, 2).unwrap();

    let mut adapter = PerturbedOracle {
        perturb: |sol: &mut Solution<f64>| {
            sol.y.negate();
        },
    };

    let result = run_conformance(
        &mut adapter,
        &problem,
        &SolverOptions::default(),
        ConformanceTolerances::default(),
    );

    match result {
        Err(ConformanceError::Failed { failed }) => {
            assert!(failed.contains(&"dual ray offset"));
            assert!(failed.contains(&"dual cone membership"));
            assert!(!failed.contains(&"dual ray residual"));
        }
        _ => panic!("reversed dual ray passed conformance"),
    }
}

#[test]
fn test_solver_failure() {
    let spec = ConeSpecBuilder::default().l(3).build().unwrap();
    let problem = generate_feasible(&spec, 2, 1.0, 0).unwrap();

    let result = run_conformance(
        &mut FailingSolver,
        &problem,
        &SolverOptions::default(),
        ConformanceTolerances::default(),
    );
    match result {
        Err(ConformanceError::Solver(msg)) => assert_eq!(msg, "numerical failure"),
        _ => panic!("expected a solver failure"),
    }
}

#[test]
fn test_verbose_report() {
    let spec = ConeSpecBuilder::default().l(3).ep(1).build().unwrap();
    let problem = generate_unbounded(&spec, 3, 0.5, 5).unwrap();
    let options = SolverOptionsBuilder::default().verbose(true).build().unwrap();

    let mut checker = ConformanceChecker::<f64>::default();
    checker.print_to_buffer();
    checker
        .run(&mut CertificateOracle, &problem, &options)
        .unwrap();

    let text = checker.get_print_buffer().unwrap();
    assert!(text.contains("conformance: unbounded problem"));
    assert!(text.contains("primal ray cost"));
    assert!(!text.contains("FAIL"));
}
