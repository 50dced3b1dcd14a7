use super::FloatT;

// All internal math for projections, problem generation and
// conformance checks should go through these core traits, which
// are implemented generically for floats of type FloatT.

/// Scalar operations on [`FloatT`](crate::algebra::FloatT)

pub trait ScalarMath {
    type T: FloatT;

    /// Safe logarithm.
    ///
    /// Returns log(s) if s > 0   -Infinity otherwise.
    fn logsafe(&self) -> Self::T;
}

/// Vector operations on slices of [`FloatT`](crate::algebra::FloatT)

pub trait VectorMath {
    type T;

    /// Apply an elementwise operation on a vector.
    fn scalarop(&mut self, op: impl Fn(Self::T) -> Self::T) -> &mut Self;

    /// Elementwise scaling.
    fn scale(&mut self, c: Self::T) -> &mut Self;

    /// Elementwise negation of entries.
    fn negate(&mut self) -> &mut Self;

    /// Dot product
    fn dot(&self, y: &Self) -> Self::T;

    /// Sum of elements.
    fn sum(&self) -> Self::T;

    /// Sum of squares of the elements.
    fn sumsq(&self) -> Self::T;

    /// 2-norm
    fn norm(&self) -> Self::T;

    /// Infinity norm
    fn norm_inf(&self) -> Self::T;

    /// Maximum absolute elementwise difference between `self` and `b`
    fn norm_inf_diff(&self, b: &Self) -> Self::T;

    /// Checks if all elements are finite, i.e. no Infs or NaNs
    fn is_finite(&self) -> bool;

    //blas-like vector ops
    //--------------------

    /// BLAS-like shift and scale in place.  Produces `self = a*x+b*self`
    fn axpby(&mut self, a: Self::T, x: &Self, b: Self::T) -> &mut Self;

    /// BLAS-like shift and scale, non in-place version.  Produces `self = a*x+b*y`
    fn waxpby(&mut self, a: Self::T, x: &Self, b: Self::T, y: &Self) -> &mut Self;
}

/// Matrix operations for matrices of [`FloatT`](crate::algebra::FloatT)

pub trait MatrixVectorMultiply {
    type T: FloatT;

    /// BLAS-like general matrix-vector multiply.  Produces `y = a*self*x + b*y`
    fn gemv(&self, y: &mut [Self::T], x: &[Self::T], a: Self::T, b: Self::T);
}
