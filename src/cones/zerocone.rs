use super::*;
use core::marker::PhantomData;

// -------------------------------------
// Zero Cone
// -------------------------------------

pub struct ZeroCone<T: FloatT = f64> {
    dim: usize,
    phantom: PhantomData<T>,
}

impl<T> ZeroCone<T>
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

impl<T> Cone<T> for ZeroCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        self.dim
    }

    fn project(
        &self,
        x: &mut [T],
        pd: PrimalOrDualCone,
        _settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError> {
        // the dual of {0} is the whole space
        if pd == PrimalOrDualCone::PrimalCone {
            x.fill(T::zero());
        }
        Ok(())
    }
}
