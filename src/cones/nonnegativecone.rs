use super::*;
use crate::algebra::VectorMath;
use core::marker::PhantomData;

// -------------------------------------
// Nonnegative Cone
// -------------------------------------

pub struct NonnegativeCone<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> NonnegativeCone<T>
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

impl<T> Cone<T> for NonnegativeCone<T>
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
        x.scalarop(|v| T::max(v, T::zero()));
        Ok(())
    }
}

#[test]
fn test_nonnegative_projection() {
    let K = NonnegativeCone::<f64>::new(4);
    let settings = ProjectionSettings::default();
    let mut x = vec![1., -2., 0., 3.5];
    K.project(&mut x, PrimalOrDualCone::DualCone, &settings).unwrap();
    assert_eq!(x, vec![1., 0., 0., 3.5]);
}
