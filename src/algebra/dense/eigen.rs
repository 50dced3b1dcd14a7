#![allow(non_snake_case)]

use crate::algebra::{AsFloatT, DenseFactorizationError, FloatT, Matrix, ShapedMatrix};
use itertools::izip;
use nalgebra::{linalg::SymmetricEigen, DMatrix};

/// Symmetric eigendecomposition engine.
///
/// The decomposition is computed in f64 by nalgebra regardless of `T`,
/// and the results are converted back on completion.
pub struct EigEngine<T> {
    /// Computed eigenvalues (unordered)
    pub λ: Vec<T>,

    /// Computed eigenvectors, stored columnwise
    pub V: Matrix<T>,
}

impl<T> EigEngine<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            λ: vec![T::zero(); n],
            V: Matrix::zeros((n, n)),
        }
    }

    /// Eigenvalues and eigenvectors of the symmetric matrix `A`.
    /// Only the upper triangle of `A` is referenced.
    pub fn eigen(&mut self, A: &Matrix<T>) -> Result<(), DenseFactorizationError> {
        let n = self.λ.len();
        if !A.is_square() || A.nrows() != n {
            return Err(DenseFactorizationError::IncompatibleDimension);
        }

        let Af = DMatrix::<f64>::from_fn(n, n, |i, j| {
            let (r, c) = if i <= j { (i, j) } else { (j, i) };
            A[(r, c)].to_f64().unwrap_or(f64::NAN)
        });
        if Af.iter().any(|v| !v.is_finite()) {
            return Err(DenseFactorizationError::Eigen);
        }

        let eig = SymmetricEigen::new(Af);
        if eig.eigenvalues.iter().any(|v| !v.is_finite()) {
            return Err(DenseFactorizationError::Eigen);
        }

        for (λi, &v) in izip!(self.λ.iter_mut(), eig.eigenvalues.iter()) {
            *λi = v.as_T();
        }
        for j in 0..n {
            for i in 0..n {
                self.V[(i, j)] = eig.eigenvectors[(i, j)].as_T();
            }
        }
        Ok(())
    }

    /// Overwrites `A` with `V*diag(f(λ))*V'` from the most recent
    /// decomposition
    pub fn reconstruct(&self, A: &mut Matrix<T>, f: impl Fn(T) -> T) {
        let n = self.λ.len();
        assert!(A.nrows() == n && A.ncols() == n);

        A.data_mut().fill(T::zero());
        for (k, &λk) in self.λ.iter().enumerate() {
            let fk = f(λk);
            if fk == T::zero() {
                continue;
            }
            let vk = self.V.col_slice(k);
            A.ger(fk, vk, vk);
        }
    }
}

#[test]
fn test_eigen_reconstruct() {
    // A = [2 1 0; 1 2 0; 0 0 -1] has eigenvalues 1, 3, -1
    let A = Matrix::new_from_slice((3, 3), &[2., 1., 0., 1., 2., 0., 0., 0., -1.]);
    let mut eng = EigEngine::<f64>::new(3);
    eng.eigen(&A).unwrap();

    let mut λ = eng.λ.clone();
    λ.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert!((λ[0] + 1.).abs() < 1e-12);
    assert!((λ[1] - 1.).abs() < 1e-12);
    assert!((λ[2] - 3.).abs() < 1e-12);

    let mut B = Matrix::zeros((3, 3));
    eng.reconstruct(&mut B, |x| x);
    for (a, b) in A.data().iter().zip(B.data()) {
        assert!((a - b).abs() < 1e-12);
    }

    // clip the negative eigenvalue
    eng.reconstruct(&mut B, |x| x.max(0.));
    assert!(B[(2, 2)].abs() < 1e-12);
    assert!((B[(0, 1)] - 1.).abs() < 1e-12);
}

#[test]
fn test_eigen_bad_dimension() {
    let A = Matrix::<f64>::zeros((2, 3));
    let mut eng = EigEngine::<f64>::new(2);
    assert_eq!(
        eng.eigen(&A),
        Err(DenseFactorizationError::IncompatibleDimension)
    );
}
