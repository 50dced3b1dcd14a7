#![allow(non_snake_case)]

use crate::algebra::{Adjoint, CscMatrix, FloatT, Matrix, MatrixShape, ShapedMatrix, SparseFormatError};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Use [`check_format`](CscMatrix::check_format) for that.
    ///
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// allocate space for a sparse matrix with `nnz` elements
    ///
    /// To make an m x n matrix of zeros, use
    /// ```no_run
    /// use conegen::algebra::CscMatrix;
    /// let m = 3;
    /// let n = 4;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc(m,n,0);
    /// ```
    pub fn spalloc(m: usize, n: usize, nnz: usize) -> Self {
        let mut colptr = vec![0; n + 1];
        let rowval = vec![0; nnz];
        let nzval = vec![T::zero(); nnz];
        colptr[n] = nnz;

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Sparse matrix from a dense one, dropping exact zeros
    pub fn from_dense(M: &Matrix<T>) -> Self {
        let mut colptr = Vec::with_capacity(M.n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        colptr.push(0);
        for col in 0..M.n {
            for (row, &v) in M.col_slice(col).iter().enumerate() {
                if v != T::zero() {
                    rowval.push(row);
                    nzval.push(v);
                }
            }
            colptr.push(rowval.len());
        }
        CscMatrix::new(M.m, M.n, colptr, rowval, nzval)
    }

    /// Dense copy of the matrix
    pub fn to_dense(&self) -> Matrix<T> {
        let mut M = Matrix::zeros((self.m, self.n));
        for col in 0..self.n {
            for k in self.colptr[col]..self.colptr[col + 1] {
                M[(self.rowval[k], col)] = self.nzval[k];
            }
        }
        M
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// transpose
    pub fn t(&self) -> Adjoint<'_, Self> {
        Adjoint { src: self }
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowval);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
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
fn test_csc_dense_round_trip() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );
    assert!(A.check_format().is_ok());

    let M = A.to_dense();
    assert_eq!(M[(1, 0)], 1.);
    assert_eq!(M[(5, 1)], 9.);
    assert_eq!(M[(4, 4)], 14.);
    assert_eq!(M[(0, 0)], 0.);
    assert_eq!(M[(1, 3)], 0.);

    // dense round trip keeps the sparsity pattern
    let B = CscMatrix::from_dense(&M);
    assert_eq!(A, B);
}

#[test]
fn test_csc_check_format() {
    let mut A = CscMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 1], vec![1., 2., 3.]);
    assert!(A.check_format().is_ok());

    A.rowval[1] = 0;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    A.rowval[1] = 2;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadRowval));

    A.rowval[1] = 1;
    A.colptr[1] = 4;
    assert_eq!(A.check_format(), Err(SparseFormatError::BadColptr));
}
