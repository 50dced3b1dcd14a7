#![allow(non_snake_case)]

use super::random::check_density;
use super::*;

// z ~ N(0,I) gives the primal-dual pair through the Moreau split
// z = Π_{K*}(z) - Π_K(-z), so s = y - z lies in K with s'y = 0.
pub(crate) fn gen_feasible<T, R>(
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
    let y = projector.project_dual(&z, spec)?;
    let mut s = vec![T::zero(); m];
    s.waxpby(T::one(), &y, -T::one(), &z);

    let A: CscMatrix<T> = sprandn(rng, m, n, density)?;
    let x: Vec<T> = randn(rng, n);

    let mut c = vec![T::zero(); n];
    A.t().gemv(&mut c, &y, -T::one(), T::zero());

    let mut b = s.clone();
    A.gemv(&mut b, &x, T::one(), T::one());

    let objective = c.dot(&x);

    Ok(ProblemInstance {
        A,
        b,
        c,
        cone: spec.clone(),
        certificate: Certificate::Optimal { x, y, s, objective },
    })
}

#[test]
fn test_feasible_certificate() {
    let spec = ConeSpecBuilder::default()
        .z(2)
        .l(4)
        .q(vec![3])
        .ep(1)
        .build()
        .unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let projector = ConeProjector::<f64>::default();
    let P = gen_feasible(&mut rng, &projector, &spec, 5, 0.4).unwrap();

    let Certificate::Optimal { x, y, s, objective } = &P.certificate else {
        panic!("expected an optimal certificate");
    };
    assert_eq!(P.m(), 12);
    assert_eq!(P.n(), 5);
    assert!(s.dot(y).abs() < 1e-10);
    assert!((P.c.dot(x) - objective).abs() < 1e-12);

    // zero cone rows of s vanish
    assert!(s[0..2].norm_inf() < 1e-14);

    let mut r = P.b.clone();
    P.A.gemv(&mut r, x, -1., 1.);
    assert!(r.norm_inf_diff(s) < 1e-12);
}

#[cfg(test)]
use crate::cones::ConeSpecBuilder;
