use super::*;

/// Euclidean projection onto a composite cone described by a
/// [`ConeSpec`], or onto its dual.
///
/// The projector holds only its settings.  Every call partitions the
/// input by [`ConeSpec::blocks`] and projects each block independently.
#[derive(Debug, Clone, Default)]
pub struct ConeProjector<T: FloatT = f64> {
    pub settings: ProjectionSettings<T>,
}

impl<T> ConeProjector<T>
where
    T: FloatT,
{
    pub fn new(settings: ProjectionSettings<T>) -> Self {
        Self { settings }
    }

    /// Projection of `x` onto the cone
    pub fn project(&self, x: &[T], spec: &ConeSpec) -> Result<Vec<T>, ProjectionError> {
        let mut out = x.to_vec();
        self.project_in_place(&mut out, spec)?;
        Ok(out)
    }

    /// Projection of `x` onto the dual cone
    pub fn project_dual(&self, x: &[T], spec: &ConeSpec) -> Result<Vec<T>, ProjectionError> {
        let mut out = x.to_vec();
        self.project_dual_in_place(&mut out, spec)?;
        Ok(out)
    }

    /// Overwrites `x` with its projection onto the cone
    pub fn project_in_place(&self, x: &mut [T], spec: &ConeSpec) -> Result<(), ProjectionError> {
        self._project(x, spec, PrimalOrDualCone::PrimalCone)
    }

    /// Overwrites `x` with its projection onto the dual cone
    pub fn project_dual_in_place(
        &self,
        x: &mut [T],
        spec: &ConeSpec,
    ) -> Result<(), ProjectionError> {
        self._project(x, spec, PrimalOrDualCone::DualCone)
    }

    fn _project(
        &self,
        x: &mut [T],
        spec: &ConeSpec,
        pd: PrimalOrDualCone,
    ) -> Result<(), ProjectionError> {
        let expected = spec.total_dimension();
        if x.len() != expected {
            return Err(ProjectionError::DimensionMismatch {
                expected,
                found: x.len(),
            });
        }
        let cones = CompositeCone::<T>::new(&spec.blocks());
        cones.project(x, pd, &self.settings)
    }
}

#[test]
fn test_projector_dimension_mismatch() {
    let spec = ConeSpecBuilder::default().l(3).build().unwrap();
    let projector = ConeProjector::<f64>::default();

    assert_eq!(
        projector.project(&[1., 2.], &spec),
        Err(ProjectionError::DimensionMismatch {
            expected: 3,
            found: 2
        })
    );
    assert_eq!(projector.project(&[1., -2., 3.], &spec), Ok(vec![1., 0., 3.]));
}

#[test]
fn test_projector_zero_cone() {
    let spec = ConeSpecBuilder::default().z(2).l(1).build().unwrap();
    let projector = ConeProjector::<f64>::default();

    assert_eq!(projector.project(&[1., -2., -3.], &spec), Ok(vec![0., 0., 0.]));
    assert_eq!(projector.project_dual(&[1., -2., -3.], &spec), Ok(vec![1., -2., 0.]));
}
