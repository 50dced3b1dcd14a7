use super::*;
use crate::algebra::*;
use core::marker::PhantomData;

// ------------------------------------
// Positive Semidefinite Cone (Scaled triangular form)
// ------------------------------------

/// Cone of n × n positive semidefinite matrices, vectorized in scaled
/// upper triangular form with n(n+1)/2 entries.
pub struct PSDTriangleCone<T: FloatT = f64> {
    n: usize,     // matrix dimension, i.e. matrix is n × n
    numel: usize, // total number of elements in (upper triangle of) the matrix
    phantom: PhantomData<T>,
}

impl<T> PSDTriangleCone<T>
where
    T: FloatT,
{
    pub fn new(n: usize) -> Self {
        Self {
            n,
            numel: triangular_number(n),
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for PSDTriangleCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.numel
    }

    fn project(
        &self,
        x: &mut [T],
        _pd: PrimalOrDualCone,
        _settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError> {
        if self.n == 0 {
            return Ok(());
        }

        let mut X = Matrix::zeros((self.n, self.n));
        let mut engine = EigEngine::<T>::new(self.n);

        svec_to_mat(&mut X, x);
        engine.eigen(&X).map_err(|_| ProjectionError::Eigen)?;
        engine.reconstruct(&mut X, |λ| T::max(λ, T::zero()));
        mat_to_svec(x, &X);

        Ok(())
    }
}

#[test]
fn test_psd_projection() {
    let K = PSDTriangleCone::<f64>::new(2);
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;

    // diag(1,-1) projects to diag(1,0)
    let mut x = vec![1., 0., -1.];
    K.project(&mut x, pd, &settings).unwrap();
    assert!(x.norm_inf_diff(&[1., 0., 0.]) < 1e-14);

    // [0 1; 1 0] has eigenvalues ±1, so projects to [1 1; 1 1]/2
    let s2 = std::f64::consts::SQRT_2;
    let mut x = vec![0., s2, 0.];
    K.project(&mut x, pd, &settings).unwrap();
    assert!(x.norm_inf_diff(&[0.5, 0.5 * s2, 0.5]) < 1e-14);

    // the 1 × 1 cone is the nonnegative ray
    let K = PSDTriangleCone::<f64>::new(1);
    let mut x = vec![-3.];
    K.project(&mut x, pd, &settings).unwrap();
    assert!(x[0].abs() < 1e-15);
}
