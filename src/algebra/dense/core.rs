#![allow(non_snake_case)]

use crate::algebra::{Adjoint, FloatT, Matrix, MatrixShape, ShapedMatrix};
use std::ops::{Index, IndexMut};

impl<T> Matrix<T>
where
    T: FloatT,
{
    pub fn zeros(size: (usize, usize)) -> Self {
        let (m, n) = size;
        let data = vec![T::zero(); m * n];
        Self { m, n, data }
    }

    pub fn new_from_slice(size: (usize, usize), src: &[T]) -> Self {
        let (m, n) = size;
        assert!(m * n == src.len());
        Self {
            m,
            n,
            data: src.to_vec(),
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    pub fn col_slice(&self, col: usize) -> &[T] {
        assert!(col < self.n);
        &self.data[(col * self.m)..(col + 1) * self.m]
    }

    pub fn col_slice_mut(&mut self, col: usize) -> &mut [T] {
        assert!(col < self.n);
        &mut self.data[(col * self.m)..(col + 1) * self.m]
    }

    /// BLAS-like rank one update.  Produces `self = self + a*x*y'`
    pub fn ger(&mut self, a: T, x: &[T], y: &[T]) {
        assert_eq!(x.len(), self.m);
        assert_eq!(y.len(), self.n);

        for (col, &yj) in y.iter().enumerate() {
            let ayj = a * yj;
            for (Mij, &xi) in self.col_slice_mut(col).iter_mut().zip(x) {
                *Mij += ayj * xi;
            }
        }
    }

    #[inline]
    fn index_linear(&self, idx: (usize, usize)) -> usize {
        idx.0 + self.m * idx.1
    }
}

impl<T> Index<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    type Output = T;
    fn index(&self, idx: (usize, usize)) -> &Self::Output {
        &self.data[self.index_linear(idx)]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T>
where
    T: FloatT,
{
    fn index_mut(&mut self, idx: (usize, usize)) -> &mut Self::Output {
        let lidx = self.index_linear(idx);
        &mut self.data[lidx]
    }
}

impl<T> ShapedMatrix for Matrix<T>
where
    T: FloatT,
{
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
    fn shape(&self) -> MatrixShape {
        MatrixShape::N
    }
}

#[test]
#[allow(non_snake_case)]
fn test_dense_ger() {
    let mut A = Matrix::new_from_slice((2, 3), &[1., 2., 3., 4., 5., 6.]);
    A.ger(2., &[1., -1.], &[1., 0., 2.]);

    // column major, so A = [1 3 5; 2 4 6] + 2*[1 0 2; -1 0 -2]
    assert_eq!(A.data(), &[3., 0., 3., 4., 9., 2.]);
    assert_eq!(A[(0, 2)], 9.);
    assert_eq!(A.t().size(), (3, 2));
}
