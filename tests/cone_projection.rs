#![allow(non_snake_case)]

use conegen::{algebra::*, cones::*, generator::randn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// every cone type, including blocks of size zero
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

#[test]
fn test_mixed_cone_dimension() {
    let spec = mixed_cone_spec();
    assert_eq!(spec.total_dimension(), 185);
    assert_eq!(spec.dual_total_dimension(), 185);
    assert_eq!(spec.dual(), None);
}

#[test]
fn test_moreau_decomposition() {
    let spec = mixed_cone_spec();
    let projector = ConeProjector::<f64>::default();
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    for _ in 0..20 {
        let mut x: Vec<f64> = randn(&mut rng, spec.total_dimension());
        x.scale(10.);

        // x = Π_K(x) - Π_{K*}(-x)
        let p = projector.project(&x, &spec).unwrap();
        let mut minus_x = x.clone();
        minus_x.negate();
        let d = projector.project_dual(&minus_x, &spec).unwrap();

        let mut r = vec![0.; x.len()];
        r.waxpby(1., &p, -1., &d);
        assert!(r.norm_inf_diff(&x) < 1e-8);
    }
}

#[test]
fn test_projection_idempotent() {
    let spec = mixed_cone_spec();
    let projector = ConeProjector::<f64>::default();
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..20 {
        let x: Vec<f64> = randn(&mut rng, spec.total_dimension());

        let p = projector.project(&x, &spec).unwrap();
        let pp = projector.project(&p, &spec).unwrap();
        assert!(pp.norm_inf_diff(&p) < 1e-7);

        let d = projector.project_dual(&x, &spec).unwrap();
        let dd = projector.project_dual(&d, &spec).unwrap();
        assert!(dd.norm_inf_diff(&d) < 1e-7);
    }
}

#[test]
fn test_self_dual_blocks() {
    let spec = ConeSpecBuilder::default()
        .l(7)
        .q(vec![4, 1, 6])
        .s(vec![3, 5])
        .build()
        .unwrap();
    let projector = ConeProjector::<f64>::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..10 {
        let x: Vec<f64> = randn(&mut rng, spec.total_dimension());
        let p = projector.project(&x, &spec).unwrap();
        let d = projector.project_dual(&x, &spec).unwrap();
        assert!(p.norm_inf_diff(&d) < 1e-12);
    }
}

#[test]
fn test_zero_cone_projections() {
    let spec = ConeSpecBuilder::default().z(3).build().unwrap();
    let projector = ConeProjector::<f64>::default();
    let x = vec![1., -2., 3.];

    assert_eq!(projector.project(&x, &spec).unwrap(), vec![0.; 3]);
    assert_eq!(projector.project_dual(&x, &spec).unwrap(), x);
}

#[test]
fn test_labeled_composite_projection() {
    // exponential, dual exponential, power (a = 0.5) and dual power (a = 0.75)
    let spec = ConeSpecBuilder::default()
        .ep(1)
        .ed(1)
        .p(vec![0.5, -0.75])
        .build()
        .unwrap();
    let projector = ConeProjector::<f64>::default();

    let x = vec![
        1., 2., 0., //
        -1., -2., 0., //
        3.75, 0., 3., //
        -0.25, -0.75, -2.,
    ];
    let expected = vec![
        0., 1., 1., //
        -1., -1., 1., //
        4., 1., 2., //
        0.75, 0.25, -1.,
    ];

    let p = projector.project(&x, &spec).unwrap();
    assert!(p.norm_inf_diff(&expected) < 1e-7);
}

#[test]
fn test_dual_spec_projection() {
    // projecting onto K* is the same as projecting onto spec.dual()
    let projector = ConeProjector::<f64>::default();
    let mut rng = ChaCha8Rng::seed_from_u64(21);

    for (ep, ed) in [(10, 0), (0, 10)] {
        let spec = ConeSpecBuilder::default()
            .z(10)
            .l(15)
            .q(vec![5, 10, 0, 1])
            .s(vec![3, 4, 0, 0, 1, 10])
            .ep(ep)
            .ed(ed)
            .p(vec![-0.25, 0.5, 0.75, -0.33])
            .build()
            .unwrap();
        let dual = spec.dual().unwrap();

        let x: Vec<f64> = randn(&mut rng, spec.total_dimension());
        let d = projector.project_dual(&x, &spec).unwrap();
        let p = projector.project(&x, &dual).unwrap();
        assert!(p.norm_inf_diff(&d) < 1e-8);
    }
}

#[test]
fn test_projection_dimension_mismatch() {
    let spec = mixed_cone_spec();
    let projector = ConeProjector::<f64>::default();
    let x = vec![0.; 184];

    assert_eq!(
        projector.project(&x, &spec),
        Err(ProjectionError::DimensionMismatch {
            expected: 185,
            found: 184
        })
    );
}

#[test]
fn test_projection_iteration_budget() {
    // a single root search iteration is not enough for an interior
    // exponential cone case
    let spec = ConeSpecBuilder::default().ep(1).build().unwrap();
    let settings = ProjectionSettingsBuilder::<f64>::default()
        .max_iter(1)
        .build()
        .unwrap();
    let projector = ConeProjector::new(settings);

    let result = projector.project(&[1., 2., 0.], &spec);
    assert!(matches!(
        result,
        Err(ProjectionError::DidNotConverge { .. })
    ));
}
