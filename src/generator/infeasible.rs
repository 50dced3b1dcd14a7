#![allow(non_snake_case)]

use super::random::{check_density, MAX_DRAWS};
use super::*;

// A dual ray y ∈ K* with A'y = 0 and b'y = -1 certifies that no x
// satisfies Ax + s = b with s ∈ K.
pub(crate) fn gen_infeasible<T, R>(
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

    if m == 0 {
        return Err(GeneratorError::DegenerateCertificate(
            "dual ray has zero norm",
        ));
    }

    // z is redrawn while it projects to the origin of K*
    let mut drawn = None;
    for _ in 0..MAX_DRAWS {
        let z: Vec<T> = randn(rng, m);
        let y = projector.project_dual(&z, spec)?;
        let ynorm2 = y.sumsq();
        if ynorm2 > T::zero() {
            drawn = Some((y, ynorm2));
            break;
        }
    }
    let Some((y, ynorm2)) = drawn else {
        return Err(GeneratorError::DegenerateCertificate(
            "dual ray has zero norm",
        ));
    };

    // A = A0 - y (A0'y)' / ||y||²
    let A0: CscMatrix<T> = sprandn(rng, m, n, density)?;
    let mut w = vec![T::zero(); n];
    A0.t().gemv(&mut w, &y, T::one(), T::zero());
    let mut M = A0.to_dense();
    M.ger(-ynorm2.recip(), &y, &w);
    let A = CscMatrix::from_dense(&M);

    let mut drawn = None;
    for _ in 0..MAX_DRAWS {
        let b: Vec<T> = randn(rng, m);
        let by = b.dot(&y);
        if by != T::zero() {
            drawn = Some((b, by));
            break;
        }
    }
    let Some((mut b, by)) = drawn else {
        return Err(GeneratorError::DegenerateCertificate(
            "offset is orthogonal to the dual ray",
        ));
    };
    b.scale(-by.recip());

    let c: Vec<T> = randn(rng, n);

    Ok(ProblemInstance {
        A,
        b,
        c,
        cone: spec.clone(),
        certificate: Certificate::PrimalInfeasible { y },
    })
}

#[test]
fn test_infeasible_certificate() {
    let spec = ConeSpecBuilder::default()
        .l(6)
        .q(vec![4])
        .s(vec![2])
        .build()
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let projector = ConeProjector::<f64>::default();
    let P = gen_infeasible(&mut rng, &projector, &spec, 4, 0.5).unwrap();

    let Certificate::PrimalInfeasible { y } = &P.certificate else {
        panic!("expected an infeasibility certificate");
    };
    let mut r = vec![0.; P.n()];
    P.A.t().gemv(&mut r, y, 1., 0.);
    assert!(r.norm() < 1e-10);
    assert!((P.b.dot(y) + 1.).abs() < 1e-12);
}

#[test]
fn test_infeasible_empty_cone_is_degenerate() {
    // only the empty ray exists when K has dimension zero
    let spec = ConeSpec::default();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let projector = ConeProjector::<f64>::default();
    let result = gen_infeasible(&mut rng, &projector, &spec, 4, 0.5);
    assert!(matches!(
        result,
        Err(GeneratorError::DegenerateCertificate(_))
    ));
}

#[test]
fn test_infeasible_small_orthant() {
    // Π_{K*}(z) vanishes for a quarter of the draws when K = R²₊
    let spec = ConeSpecBuilder::default().l(2).build().unwrap();
    let projector = ConeProjector::<f64>::default();

    for seed in 0..200 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let P = gen_infeasible(&mut rng, &projector, &spec, 2, 1.0).unwrap();

        let Certificate::PrimalInfeasible { y } = &P.certificate else {
            panic!("expected an infeasibility certificate");
        };
        assert!(y.norm() > 0.);
        assert!(y.iter().all(|&v| v >= 0.));
        assert!((P.b.dot(y) + 1.).abs() < 1e-12);
    }
}

#[cfg(test)]
use crate::cones::ConeSpecBuilder;
