#![allow(non_snake_case)]

use super::random::{check_density, MAX_DRAWS};
use super::*;

// A primal ray x with Ax + s = 0, s ∈ K and c'x = -1 can be added
// to any feasible point to decrease the objective without bound.
pub(crate) fn gen_unbounded<T, R>(
    rng: &mut R,
    projector: &ConeProjector<T>,
    spec: &ConeSpec,
    n: usize,
    density: f64,
) -> Result<ProblemInstance<T>, GeneratorError>
where
    T: FloatT,
    R: Rng + ?Sized,
{
    check_density(density)?;
    let m = spec.total_dimension();

    let z: Vec<T> = randn(rng, m);
    let s = projector.project(&z, spec)?;

    let A0: CscMatrix<T> = sprandn(rng, m, n, density)?;
    let x: Vec<T> = randn(rng, n);
    let xnorm2 = x.sumsq();
    if xnorm2 == T::zero() {
        return Err(GeneratorError::DegenerateCertificate(
            "primal ray has zero norm",
        ));
    }

    // A = A0 - (s + A0 x) x' / ||x||²
    let mut r = s.clone();
    A0.gemv(&mut r, &x, T::one(), T::one());
    let mut M = A0.to_dense();
    M.ger(-xnorm2.recip(), &r, &x);
    let A = CscMatrix::from_dense(&M);

    let mut drawn = None;
    for _ in 0..MAX_DRAWS {
        let c: Vec<T> = randn(rng, n);
        let cx = c.dot(&x);
        if cx != T::zero() {
            drawn = Some((c, cx));
            break;
        }
    }
    let Some((mut c, cx)) = drawn else {
        return Err(GeneratorError::DegenerateCertificate(
            "cost is orthogonal to the primal ray",
        ));
    };
    c.scale(-cx.recip());

    let b: Vec<T> = randn(rng, m);

    Ok(ProblemInstance {
        A,
        b,
        c,
        cone: spec.clone(),
        certificate: Certificate::DualInfeasible { x, s },
    })
}

#[test]
fn test_unbounded_certificate() {
    let spec = ConeSpecBuilder::default()
        .z(1)
        .l(3)
        .ed(1)
        .p(vec![0.3, -0.6])
        .build()
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let projector = ConeProjector::<f64>::default();
    let P = gen_unbounded(&mut rng, &projector, &spec, 6, 0.3).unwrap();

    let Certificate::DualInfeasible { x, s } = &P.certificate else {
        panic!("expected an unboundedness certificate");
    };
    let mut r = s.clone();
    P.A.gemv(&mut r, x, 1., 1.);
    assert!(r.norm() < 1e-10);
    assert!((P.c.dot(x) + 1.).abs() < 1e-12);
}

#[test]
fn test_unbounded_without_variables_is_degenerate() {
    let spec = ConeSpecBuilder::default().l(3).build().unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let projector = ConeProjector::<f64>::default();
    let result = gen_unbounded(&mut rng, &projector, &spec, 0, 0.3);
    assert!(matches!(
        result,
        Err(GeneratorError::DegenerateCertificate(_))
    ));
}

#[test]
fn test_unbounded_small_orthant() {
    let spec = ConeSpecBuilder::default().l(2).build().unwrap();
    let projector = ConeProjector::<f64>::default();

    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let P = gen_unbounded(&mut rng, &projector, &spec, 1, 1.0).unwrap();

        let Certificate::DualInfeasible { x, s } = &P.certificate else {
            panic!("expected an unboundedness certificate");
        };
        assert!(s.iter().all(|&v| v >= 0.));
        assert!((P.c.dot(x) + 1.).abs() < 1e-12);
    }
}

#[cfg(test)]
use crate::cones::ConeSpecBuilder;
