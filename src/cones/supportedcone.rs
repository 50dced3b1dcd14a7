use super::*;
use crate::algebra::triangular_number;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ---------------------------------------------------
// We define some machinery here for enumerating the
// different cone types that can live in the composite cone
// ---------------------------------------------------

/// API type describing the type of a conic constraint.
///
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SupportedConeT<T> {
    /// The zero cone (used for equality constraints).
    ///
    /// The parameter indicates the cones dimension.
    ZeroConeT(usize),
    /// The nonnegative orthant.
    ///
    /// The parameter indicates the cones dimension.
    NonnegativeConeT(usize),
    /// The second order cone / Lorenz cone / ice-cream cone.
    ///
    /// The parameter indicates the cones dimension.
    SecondOrderConeT(usize),
    /// The positive semidefinite cone in triangular form.
    ///
    /// The parameter indicates the matrix dimension, i.e. size = 1
    /// means that the variable is 1x1.
    PSDTriangleConeT(usize),
    /// The exponential cone in R^3.
    ///
    /// This cone takes no parameters
    ExponentialConeT(),
    /// The dual of the exponential cone in R^3.
    ///
    /// This cone takes no parameters
    DualExponentialConeT(),
    /// The power cone in R^3.
    ///
    /// The parameter indicates the power.
    PowerConeT(T),
    /// The dual of the power cone in R^3.
    ///
    /// The parameter indicates the power of the primal cone.
    DualPowerConeT(T),
}

impl<T> SupportedConeT<T> {
    /// Returns the number of vector entries occupied by the cone
    pub fn nvars(&self) -> usize {
        match self {
            SupportedConeT::ZeroConeT(dim) => *dim,
            SupportedConeT::NonnegativeConeT(dim) => *dim,
            SupportedConeT::SecondOrderConeT(dim) => *dim,
            SupportedConeT::PSDTriangleConeT(dim) => triangular_number(*dim),
            SupportedConeT::ExponentialConeT() => 3,
            SupportedConeT::DualExponentialConeT() => 3,
            SupportedConeT::PowerConeT(_) => 3,
            SupportedConeT::DualPowerConeT(_) => 3,
        }
    }
}

impl<T> std::fmt::Display for SupportedConeT<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", &self.as_tag().as_str())
    }
}

// we will use the SupportedCone enum to dispatch
// calls via enum_dispatch, with one variant per
// primitive cone type.  Dual exponential and dual
// power cones are primitive cones with dual orientation.

#[allow(clippy::enum_variant_names)]
#[enum_dispatch(Cone<T>)]
pub enum SupportedCone<T>
where
    T: FloatT,
{
    ZeroCone(ZeroCone<T>),
    NonnegativeCone(NonnegativeCone<T>),
    SecondOrderCone(SecondOrderCone<T>),
    PSDTriangleCone(PSDTriangleCone<T>),
    ExponentialCone(ExponentialCone<T>),
    PowerCone(PowerCone<T>),
}

pub fn make_cone<T: FloatT>(cone: &SupportedConeT<T>) -> SupportedCone<T> {
    use PrimalOrDualCone::*;
    match *cone {
        SupportedConeT::ZeroConeT(dim) => ZeroCone::<T>::new(dim).into(),
        SupportedConeT::NonnegativeConeT(dim) => NonnegativeCone::<T>::new(dim).into(),
        SupportedConeT::SecondOrderConeT(dim) => SecondOrderCone::<T>::new(dim).into(),
        SupportedConeT::PSDTriangleConeT(dim) => PSDTriangleCone::<T>::new(dim).into(),
        SupportedConeT::ExponentialConeT() => ExponentialCone::<T>::new(PrimalCone).into(),
        SupportedConeT::DualExponentialConeT() => ExponentialCone::<T>::new(DualCone).into(),
        SupportedConeT::PowerConeT(α) => PowerCone::<T>::new(α, PrimalCone).into(),
        SupportedConeT::DualPowerConeT(α) => PowerCone::<T>::new(α, DualCone).into(),
    }
}

// -------------------------------------
// Cone type tags, used for counting and
// printing by type
// -------------------------------------

#[derive(PartialEq, Eq, Clone, Debug, Copy, Hash)]
pub enum SupportedConeTag {
    ZeroCone = 0,
    NonnegativeCone,
    SecondOrderCone,
    PSDTriangleCone,
    ExponentialCone,
    DualExponentialCone,
    PowerCone,
    DualPowerCone,
}

pub trait SupportedConeAsTag {
    fn as_tag(&self) -> SupportedConeTag;
}

impl<T> SupportedConeAsTag for SupportedConeT<T> {
    fn as_tag(&self) -> SupportedConeTag {
        match self {
            SupportedConeT::ZeroConeT(_) => SupportedConeTag::ZeroCone,
            SupportedConeT::NonnegativeConeT(_) => SupportedConeTag::NonnegativeCone,
            SupportedConeT::SecondOrderConeT(_) => SupportedConeTag::SecondOrderCone,
            SupportedConeT::PSDTriangleConeT(_) => SupportedConeTag::PSDTriangleCone,
            SupportedConeT::ExponentialConeT() => SupportedConeTag::ExponentialCone,
            SupportedConeT::DualExponentialConeT() => SupportedConeTag::DualExponentialCone,
            SupportedConeT::PowerConeT(_) => SupportedConeTag::PowerCone,
            SupportedConeT::DualPowerConeT(_) => SupportedConeTag::DualPowerCone,
        }
    }
}

impl SupportedConeTag {
    /// All tags, in the order cone blocks appear in a composite cone
    pub const ALL: [SupportedConeTag; 8] = [
        SupportedConeTag::ZeroCone,
        SupportedConeTag::NonnegativeCone,
        SupportedConeTag::SecondOrderCone,
        SupportedConeTag::PSDTriangleCone,
        SupportedConeTag::ExponentialCone,
        SupportedConeTag::DualExponentialCone,
        SupportedConeTag::PowerCone,
        SupportedConeTag::DualPowerCone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SupportedConeTag::ZeroCone => "ZeroCone",
            SupportedConeTag::NonnegativeCone => "NonnegativeCone",
            SupportedConeTag::SecondOrderCone => "SecondOrderCone",
            SupportedConeTag::PSDTriangleCone => "PSDTriangleCone",
            SupportedConeTag::ExponentialCone => "ExponentialCone",
            SupportedConeTag::DualExponentialCone => "DualExponentialCone",
            SupportedConeTag::PowerCone => "PowerCone",
            SupportedConeTag::DualPowerCone => "DualPowerCone",
        }
    }
}
