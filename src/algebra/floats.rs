#![allow(non_snake_case)]
use num_traits::{Float, FloatConst, FromPrimitive, NumAssign, ToPrimitive};
use std::fmt::{Debug, Display, LowerExp};

/// Main trait for floating point types used throughout `conegen`.
///
/// All projections and problem data are represented on values implementing
/// `FloatT`.  Implementations exist for the native f32 and f64 types.  The
/// eigensolver used for PSD projections always works internally in f64, so
/// any other type satisfying these bounds is also supported.
///
/// `FloatT` relies on [`num_traits`](num_traits) for most of its constituent
/// trait bounds.
pub trait FloatT:
    'static
    + Send
    + Sync
    + Float
    + FloatConst
    + NumAssign
    + Default
    + FromPrimitive
    + ToPrimitive
    + Display
    + LowerExp
    + Debug
    + Sized
{
}

impl<T> FloatT for T where
    T: 'static
        + Send
        + Sync
        + Float
        + FloatConst
        + NumAssign
        + Default
        + FromPrimitive
        + ToPrimitive
        + Display
        + LowerExp
        + Debug
        + Sized
{
}

/// Trait for converting Rust primitives to [`FloatT`](crate::algebra::FloatT)
///
/// This convenience trait is implemented on f32/64 and u32/64/usize.  It is
/// used internally for converting constant primitives and sampled f64 random
/// values to [`FloatT`](crate::algebra::FloatT).

// NB: `AsFloatT` lets us write (2.0).as_T() on constants, rather
// than the awful T::from_f64(2.0).unwrap()
pub trait AsFloatT<T>: 'static {
    fn as_T(&self) -> T;
}

macro_rules! impl_as_FloatT {
    ($ty:ty, $ident:ident) => {
        impl<T> AsFloatT<T> for $ty
        where
            T: std::ops::Mul<T, Output = T> + FromPrimitive + 'static,
        {
            #[inline]
            fn as_T(&self) -> T {
                T::$ident(*self).unwrap()
            }
        }
    };
}
impl_as_FloatT!(u32, from_u32);
impl_as_FloatT!(u64, from_u64);
impl_as_FloatT!(usize, from_usize);
impl_as_FloatT!(f32, from_f32);
impl_as_FloatT!(f64, from_f64);
