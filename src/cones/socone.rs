use super::*;
use crate::algebra::*;
use core::marker::PhantomData;

// -------------------------------------
// Second order Cone
// -------------------------------------

/// The cone {(t,x) : ||x|| ≤ t}.  A cone of dimension 1 is the ray t ≥ 0
/// and a cone of dimension 0 is empty.
pub struct SecondOrderCone<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> SecondOrderCone<T>
where
    T: FloatT,
{
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for SecondOrderCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.dim
    }

    fn project(
        &self,
        x: &mut [T],
        _pd: PrimalOrDualCone,
        _settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError> {
        let Some((t, xs)) = x.split_first_mut() else {
            return Ok(());
        };

        let nx = xs.norm();
        if nx <= *t {
            // already in the cone
        } else if nx <= -*t {
            *t = T::zero();
            xs.fill(T::zero());
        } else {
            let half: T = (0.5).as_T();
            let α = (nx + *t) * half;
            *t = α;
            xs.scale(α / nx);
        }
        Ok(())
    }
}

#[test]
fn test_soc_projection() {
    let K = SecondOrderCone::<f64>::new(3);
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;

    // interior point is unchanged
    let mut x = vec![5., 3., 4.];
    K.project(&mut x, pd, &settings).unwrap();
    assert_eq!(x, vec![5., 3., 4.]);

    // polar point goes to zero
    let mut x = vec![-5., 3., 4.];
    K.project(&mut x, pd, &settings).unwrap();
    assert_eq!(x, vec![0., 0., 0.]);

    // (0,3,4) goes to (5/2)(1,3/5,4/5)
    let mut x = vec![0., 3., 4.];
    K.project(&mut x, pd, &settings).unwrap();
    assert!(x.norm_inf_diff(&[2.5, 1.5, 2.]) < 1e-15);

    // the one dimensional cone is the ray t ≥ 0
    let K = SecondOrderCone::<f64>::new(1);
    let mut x = vec![-2.];
    K.project(&mut x, pd, &settings).unwrap();
    assert_eq!(x, vec![0.]);
}
