//! Linear algebra and floating point types used throughout `conegen`.
//!
//! Vector operations are implemented as traits on native `[T]` slices,
//! with sparse matrices in compressed sparse column format and a small
//! column major dense type for eigendecompositions.

#![allow(non_snake_case)]

mod adjoint;
mod csc;
mod dense;
mod error_types;
mod floats;
mod math_traits;
mod matrix_traits;
mod matrix_types;
mod scalarmath;
mod vecmath;

pub use csc::*;
pub use dense::*;
pub use error_types::*;
pub use floats::*;
pub use math_traits::*;
pub use matrix_traits::*;
pub use matrix_types::*;
pub(crate) use scalarmath::*;
