//! Cone descriptions and Euclidean projections onto cones.
//!
//! A composite cone is described by a [`ConeSpec`] and is partitioned into
//! typed blocks.  Each block type implements the [`Cone`] trait, and
//! [`ConeProjector`] projects onto the composite cone or its dual blockwise.

#![allow(non_snake_case)]

use crate::algebra::FloatT;
use enum_dispatch::*;

//primitive cone types
mod expcone;
mod nonnegativecone;
mod powcone;
mod psdtrianglecone;
mod socone;
mod zerocone;

//the supported cone wrapper type for primitives
//and the composite cone
mod compositecone;
mod supportedcone;

//user facing cone descriptions, settings and errors
mod conespec;
mod errors;
mod projector;
mod rootfinding;
mod settings;

//flatten all cone implementations to appear in this module
pub use compositecone::*;
pub use conespec::*;
pub use errors::*;
pub use expcone::*;
pub use nonnegativecone::*;
pub use powcone::*;
pub use projector::*;
pub use psdtrianglecone::*;
pub use settings::*;
pub use socone::*;
pub use supportedcone::*;
pub use zerocone::*;

// marker for primal / dual distinctions
#[derive(PartialEq, Eq, Clone, Debug, Copy)]
pub enum PrimalOrDualCone {
    PrimalCone,
    DualCone,
}

impl PrimalOrDualCone {
    /// Orientation of a cone with this orientation when the dual is
    /// requested by `pd`.  Taking the dual of a dual cone gives the primal.
    pub fn compose(self, pd: PrimalOrDualCone) -> PrimalOrDualCone {
        if self == pd {
            PrimalOrDualCone::PrimalCone
        } else {
            PrimalOrDualCone::DualCone
        }
    }
}

#[enum_dispatch]
pub trait Cone<T>
where
    T: FloatT,
{
    // number of vector entries occupied by the cone
    fn numel(&self) -> usize;

    // overwrites x with its Euclidean projection onto the cone (pd = PrimalCone)
    // or onto its dual cone (pd = DualCone)
    fn project(
        &self,
        x: &mut [T],
        pd: PrimalOrDualCone,
        settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError>;
}

// Projection onto the dual of a 3 dimensional cone K through the Moreau
// decomposition, i.e. Π_{K*}(v) = v + Π_K(-v)
pub(crate) fn project_dual_by_moreau<T, F>(x: &mut [T], project_primal: F) -> Result<(), ProjectionError>
where
    T: FloatT,
    F: FnOnce(&mut [T; 3]) -> Result<(), ProjectionError>,
{
    assert_eq!(x.len(), 3);
    let mut w = [-x[0], -x[1], -x[2]];
    project_primal(&mut w)?;
    for (xi, wi) in x.iter_mut().zip(w) {
        *xi += wi;
    }
    Ok(())
}
