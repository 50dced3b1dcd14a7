// Scaled upper triangular vectorization of symmetric matrices.
//
// Entries are taken column by column from the upper triangle with the
// off diagonal terms scaled by √2, so that <svec(X),svec(Y)> = tr(XY).

#![allow(non_snake_case)]

use crate::algebra::{triangular_number, AsFloatT, FloatT, Matrix};

/// Fill the symmetric matrix `M` from its scaled triangular vectorization
pub fn svec_to_mat<T: FloatT>(M: &mut Matrix<T>, x: &[T]) {
    let n = M.m;
    assert_eq!(M.n, n);
    assert_eq!(x.len(), triangular_number(n));

    let isqrt2 = T::FRAC_1_SQRT_2();
    let mut idx = 0;
    for col in 0..n {
        for row in 0..=col {
            if row == col {
                M[(row, col)] = x[idx];
            } else {
                M[(row, col)] = x[idx] * isqrt2;
                M[(col, row)] = x[idx] * isqrt2;
            }
            idx += 1;
        }
    }
}

/// Scaled triangular vectorization of the symmetric part of `M`
pub fn mat_to_svec<T: FloatT>(x: &mut [T], M: &Matrix<T>) {
    let n = M.m;
    assert_eq!(M.n, n);
    assert_eq!(x.len(), triangular_number(n));

    let sqrt2 = T::SQRT_2();
    let half: T = (0.5).as_T();
    let mut idx = 0;
    for col in 0..n {
        for row in 0..=col {
            x[idx] = if row == col {
                M[(row, col)]
            } else {
                (M[(row, col)] + M[(col, row)]) * half * sqrt2
            };
            idx += 1;
        }
    }
}

#[test]
#[allow(non_snake_case)]
fn test_svec_inner_product() {
    use crate::algebra::VectorMath;

    // X = [1 2; 2 3], Y = [4 -1; -1 5], tr(XY) = 4 - 2 - 2 + 15
    let X = Matrix::new_from_slice((2, 2), &[1., 2., 2., 3.]);
    let Y = Matrix::new_from_slice((2, 2), &[4., -1., -1., 5.]);
    let mut x = vec![0.0f64; 3];
    let mut y = vec![0.0f64; 3];
    mat_to_svec(&mut x, &X);
    mat_to_svec(&mut y, &Y);

    assert!((x.dot(&y) - 15.).abs() < 1e-12);
    assert!((x[1] - 2. * std::f64::consts::SQRT_2).abs() < 1e-12);

    let mut Z = Matrix::zeros((2, 2));
    svec_to_mat(&mut Z, &x);
    assert!(Z.data().norm_inf_diff(X.data()) < 1e-12);
}

#[test]
#[allow(non_snake_case)]
fn test_svec_round_trip() {
    use crate::algebra::VectorMath;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::StandardNormal;

    // the √2 scaling is inexact, so entries agree to within a few ulps
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    for n in [1, 2, 4, 7] {
        for _ in 0..50 {
            let mut M = Matrix::<f64>::zeros((n, n));
            for col in 0..n {
                for row in 0..=col {
                    let v: f64 = rng.sample(StandardNormal);
                    M[(row, col)] = v;
                    M[(col, row)] = v;
                }
            }
            let mut x = vec![0.0f64; triangular_number(n)];
            mat_to_svec(&mut x, &M);
            let mut Z = Matrix::zeros((n, n));
            svec_to_mat(&mut Z, &x);

            let tol = 4. * f64::EPSILON * M.data().norm_inf();
            assert!(Z.data().norm_inf_diff(M.data()) <= tol);
            assert_eq!(Z[(0, 0)], M[(0, 0)]);
        }
    }
}
