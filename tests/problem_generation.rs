#![allow(non_snake_case)]

use conegen::{algebra::*, cones::*, generator::*};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

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

fn cone_violations(spec: &ConeSpec, s: &[f64], y: &[f64]) -> (f64, f64) {
    let projector = ConeProjector::<f64>::default();
    let ps = projector.project(s, spec).unwrap();
    let dy = projector.project_dual(y, spec).unwrap();
    (ps.norm_inf_diff(s), dy.norm_inf_diff(y))
}

#[test]
fn test_generate_feasible() {
    let spec = mixed_cone_spec();
    let (m, n) = (spec.total_dimension(), 60);
    let P = generate_feasible(&spec, n, 0.1, 1234).unwrap();

    assert_eq!(P.kind(), ProblemKind::Feasible);
    assert_eq!((P.m(), P.n()), (m, n));
    assert_eq!((P.b.len(), P.c.len()), (m, n));
    assert!(P.A.check_format().is_ok());
    assert_eq!(P.A.nnz(), 1110);

    let Certificate::Optimal { x, y, s, objective } = &P.certificate else {
        panic!("feasible problem without an optimal certificate");
    };

    // Ax + s = b
    let mut r = s.clone();
    P.A.gemv(&mut r, x, 1., 1.);
    assert!(r.norm_inf_diff(&P.b) < 1e-10);

    // A'y + c = 0
    let mut r = P.c.clone();
    P.A.t().gemv(&mut r, y, 1., 1.);
    assert!(r.norm() < 1e-10);

    assert!(s.dot(y).abs() < 1e-7);
    assert!((P.c.dot(x) - objective).abs() < 1e-12);
    // strong duality
    assert!((P.b.dot(y) + objective).abs() < 1e-7);

    let (ds, dy) = cone_violations(&spec, s, y);
    assert!(ds < 1e-7 && dy < 1e-7);
}

#[test]
fn test_generate_infeasible() {
    let spec = mixed_cone_spec();
    let P = generate_infeasible(&spec, 50, 0.2, 42).unwrap();
    assert_eq!(P.kind(), ProblemKind::Infeasible);

    let Certificate::PrimalInfeasible { y } = &P.certificate else {
        panic!("infeasible problem without a dual ray");
    };

    let mut r = vec![0.; P.n()];
    P.A.t().gemv(&mut r, y, 1., 0.);
    assert!(r.norm() < 1e-9);
    assert!((P.b.dot(y) + 1.).abs() < 1e-10);
    assert!(P.b.dot(y) < -0.1);

    let (_, dy) = cone_violations(&spec, &vec![0.; P.m()], y);
    assert!(dy < 1e-7);
}

#[test]
fn test_generate_unbounded() {
    let spec = mixed_cone_spec();
    let P = generate_unbounded(&spec, 50, 0.2, 42).unwrap();
    assert_eq!(P.kind(), ProblemKind::Unbounded);

    let Certificate::DualInfeasible { x, s } = &P.certificate else {
        panic!("unbounded problem without a primal ray");
    };

    let mut r = s.clone();
    P.A.gemv(&mut r, x, 1., 1.);
    assert!(r.norm() < 1e-9);
    assert!((P.c.dot(x) + 1.).abs() < 1e-10);

    let (ds, _) = cone_violations(&spec, s, &vec![0.; P.m()]);
    assert!(ds < 1e-7);
}

#[test]
fn test_generation_is_deterministic() {
    let spec = mixed_cone_spec();

    let P1 = generate_feasible(&spec, 30, 0.3, 7).unwrap();
    let P2 = generate_feasible(&spec, 30, 0.3, 7).unwrap();
    assert_eq!(P1, P2);

    let P3 = generate_feasible(&spec, 30, 0.3, 8).unwrap();
    assert_ne!(P1.b, P3.b);
    assert_ne!(P1.A, P3.A);

    let U1 = generate_unbounded(&spec, 30, 0.3, 7).unwrap();
    let U2 = generate_unbounded(&spec, 30, 0.3, 7).unwrap();
    assert_eq!(U1, U2);
}

#[test]
fn test_factory_with_external_rng() {
    // the same seed through the factory or the free functions gives the
    // same problem, and consecutive draws from one factory differ
    let spec = ConeSpecBuilder::default().l(4).q(vec![3]).build().unwrap();
    let rng = ChaCha8Rng::seed_from_u64(3);
    let mut factory = RandomProblemFactory::<f64, _>::new(rng, GeneratorSettings::default());

    let P1 = factory.generate_infeasible(&spec, 4, 0.5).unwrap();
    let P2 = factory.generate_infeasible(&spec, 4, 0.5).unwrap();
    assert_eq!(P1, generate_infeasible(&spec, 4, 0.5, 3).unwrap());
    assert_ne!(P1, P2);
}

#[test]
fn test_invalid_density() {
    let spec = mixed_cone_spec();
    for density in [-0.1, 1.01, f64::NAN] {
        assert!(matches!(
            generate_feasible(&spec, 10, density, 0),
            Err(GeneratorError::InvalidDensity(_))
        ));
    }
}

#[test]
fn test_degenerate_certificates() {
    // zero variables leave no primal ray to normalise
    let spec = ConeSpecBuilder::default().l(5).build().unwrap();
    assert!(matches!(
        generate_unbounded(&spec, 0, 0.5, 0),
        Err(GeneratorError::DegenerateCertificate(_))
    ));

    // the dual of an empty cone has only the zero ray
    let spec = ConeSpec::default();
    assert!(matches!(
        generate_infeasible(&spec, 3, 0.5, 0),
        Err(GeneratorError::DegenerateCertificate(_))
    ));
}

#[test]
fn test_projection_failure_propagates() {
    let spec = ConeSpecBuilder::default().ep(4).build().unwrap();
    let projection = ProjectionSettingsBuilder::<f64>::default()
        .max_iter(1)
        .build()
        .unwrap();
    let settings = GeneratorSettingsBuilder::<f64>::default()
        .projection(projection)
        .build()
        .unwrap();
    let mut factory = RandomProblemFactory::from_seed(0, settings);

    // with an iteration budget of one, at least one of many random
    // exponential cone projections fails
    let failed = (0..20)
        .map(|_| factory.generate_feasible(&spec, 2, 0.5))
        .any(|r| matches!(r, Err(GeneratorError::Projection(_))));
    assert!(failed);
}
