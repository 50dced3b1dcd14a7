use super::*;
use std::collections::HashMap;
use std::iter::zip;
use std::ops::Range;

// -------------------------------------
// default composite cone type
// -------------------------------------

pub struct CompositeCone<T: FloatT = f64> {
    cones: Vec<SupportedCone<T>>,

    //Type count for each cone type
    pub(crate) type_counts: HashMap<SupportedConeTag, usize>,

    //overall size of the composite cone
    pub(crate) numel: usize,

    //ranges for the indices of the constituent cones
    pub(crate) rng_cones: Vec<Range<usize>>,
}

impl<T> CompositeCone<T>
where
    T: FloatT,
{
    pub fn new(types: &[SupportedConeT<T>]) -> Self {
        let mut cones: Vec<SupportedCone<T>> = Vec::with_capacity(types.len());

        // Count for the number of each cone type, indexed by SupportedConeTag
        let mut type_counts = HashMap::new();

        // create cones with the given dims
        for t in types.iter() {
            *type_counts.entry(t.as_tag()).or_insert(0) += 1;
            cones.push(make_cone(t));
        }

        // count up elements
        let numel = cones.iter().map(|c| c.numel()).sum();

        //ranges for the subvectors associated with each cone
        let rng_cones = _make_rng_cones(&cones);

        Self {
            cones,
            type_counts,
            numel,
            rng_cones,
        }
    }

    pub fn len(&self) -> usize {
        self.cones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cones.is_empty()
    }

    pub fn numel(&self) -> usize {
        self.numel
    }

    pub fn get_type_count(&self, tag: SupportedConeTag) -> usize {
        self.type_counts.get(&tag).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SupportedCone<T>> {
        self.cones.iter()
    }

    /// Projects `x` blockwise onto the composite cone (`pd = PrimalCone`)
    /// or onto its dual (`pd = DualCone`).
    pub fn project(
        &self,
        x: &mut [T],
        pd: PrimalOrDualCone,
        settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError> {
        if x.len() != self.numel {
            return Err(ProjectionError::DimensionMismatch {
                expected: self.numel,
                found: x.len(),
            });
        }

        for (cone, rng) in zip(&self.cones, &self.rng_cones) {
            cone.project(&mut x[rng.clone()], pd, settings)?;
        }
        Ok(())
    }
}

fn _make_rng_cones<T>(cones: &[SupportedCone<T>]) -> Vec<Range<usize>>
where
    T: FloatT,
{
    let mut rngs = Vec::with_capacity(cones.len());

    let mut start = 0;
    for cone in cones {
        let stop = start + cone.numel();
        rngs.push(start..stop);
        start = stop;
    }
    rngs
}

#[test]
fn test_composite_ranges() {
    let types = vec![
        SupportedConeT::ZeroConeT(2),
        SupportedConeT::SecondOrderConeT(0),
        SupportedConeT::PSDTriangleConeT(3),
        SupportedConeT::ExponentialConeT(),
        SupportedConeT::PowerConeT(0.5),
    ];
    let K = CompositeCone::<f64>::new(&types);

    assert_eq!(K.numel(), 2 + 0 + 6 + 3 + 3);
    assert_eq!(K.rng_cones, vec![0..2, 2..2, 2..8, 8..11, 11..14]);
    assert_eq!(K.get_type_count(SupportedConeTag::SecondOrderCone), 1);
    assert_eq!(K.get_type_count(SupportedConeTag::DualPowerCone), 0);

    let mut x = vec![0.; 13];
    let err = K.project(&mut x, PrimalOrDualCone::PrimalCone, &ProjectionSettings::default());
    assert_eq!(
        err,
        Err(ProjectionError::DimensionMismatch {
            expected: 14,
            found: 13
        })
    );
}
