use super::{FloatT, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath for [T] {
    type T = T;
    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        for x in &mut *self {
            *x = op(*x);
        }
        self
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn dot(&self, y: &[T]) -> T {
        assert_eq!(self.len(), y.len());
        accumulate_pairwise(self, y, |x, y| x * y)
    }

    fn sum(&self) -> T {
        accumulate_pairwise(self, self, |x, _| x)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    // 2-norm
    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    // Returns infinity norm
    fn norm_inf(&self) -> T {
        let mut out = T::zero();
        for v in self.iter().map(|v| v.abs()) {
            if v.is_nan() {
                return T::nan();
            }
            out = if v > out { v } else { out };
        }
        out
    }

    // max absolute difference (used for unit testing)
    fn norm_inf_diff(&self, b: &[T]) -> T {
        assert_eq!(self.len(), b.len());
        zip(self, b).fold(T::zero(), |acc, (x, y)| T::max(acc, T::abs(*x - *y)))
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|&x| T::is_finite(x))
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());

        zip(&mut *self, x).for_each(|(y, x)| *y = a * (*x) + b * (*y));
        self
    }

    fn waxpby(&mut self, a: T, x: &[T], b: T, y: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        assert_eq!(self.len(), y.len());

        for (w, (x, y)) in zip(&mut *self, zip(x, y)) {
            *w = a * (*x) + b * (*y);
        }
        self
    }
}

// ---------------------------------------------------------------------
// pairwise accumulator utility for sums, dot products etc.  Recursive
// halving keeps the rounding error growth at O(log n).

fn accumulate_pairwise<T, F>(x: &[T], y: &[T], op: F) -> T
where
    T: FloatT,
    F: Fn(T, T) -> T + Copy,
{
    const BASE_CASE_DIM: usize = 16;

    let n = x.len();
    if n < BASE_CASE_DIM {
        zip(x, y).fold(T::zero(), |acc, (&x, &y)| acc + op(x, y))
    } else {
        let n2 = n / 2;
        accumulate_pairwise(&x[..n2], &y[..n2], op) + accumulate_pairwise(&x[n2..], &y[n2..], op)
    }
}

#[test]
fn test_dot_product() {
    let x = vec![1., 2., 3., 4.];
    let y = vec![4., 5., 6., 7.];
    assert_eq!(x.dot(&y), 60.);
}

#[test]
fn test_sum() {
    let maxlen = 128 * 7 + 1; //awkward length to test base case
    let x: Vec<f64> = (1..=maxlen).map(|x| x as f64).collect();

    for i in 0..=x.len() {
        let z = &x[0..i];
        let sum1 = z.iter().fold(0.0, |acc, &z| acc + z);
        let sum2 = z.sum();
        assert_eq!(sum1, sum2);
    }
}

#[test]
fn test_norms() {
    let x = vec![3., -4., 0.];
    assert_eq!(x.norm(), 5.);
    assert_eq!(x.norm_inf(), 4.);
    assert_eq!(x.norm_inf_diff(&[3., -3., 0.5]), 1.);
}

#[test]
fn test_axpby_waxpby() {
    let mut y = vec![1., 2., 3.];
    y.axpby(2., &[1., 1., 1.], -1.);
    assert_eq!(y, vec![1., 0., -1.]);

    let mut w = vec![0.; 3];
    w.waxpby(1., &[1., 2., 3.], -1., &[3., 2., 1.]);
    assert_eq!(w, vec![-2., 0., 2.]);
}
