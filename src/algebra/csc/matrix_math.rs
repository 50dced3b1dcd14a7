use crate::algebra::*;

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }
}

impl<T: FloatT> MatrixVectorMultiply for Adjoint<'_, CscMatrix<T>> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self.src, y, x, a, b);
    }
}

// y = b*y, with the common cases short circuited
fn _scale_output<T: FloatT>(y: &mut [T], b: T) {
    if b == T::zero() {
        y.fill(T::zero());
    } else if b == T::one() {
    } else if b == -T::one() {
        y.negate();
    } else {
        y.scale(b);
    }
}

// sparse matrix-vector multiply, no transpose
#[allow(non_snake_case)]
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    _scale_output(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A*x
    for (j, xj) in x.iter().enumerate() {
        for i in A.colptr[j]..A.colptr[j + 1] {
            y[A.rowval[i]] += a * A.nzval[i] * *xj;
        }
    }
}

// sparse matrix-vector multiply, transposed
#[allow(non_snake_case)]
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    _scale_output(y, b);

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A'*x
    for (j, yj) in y.iter_mut().enumerate() {
        for k in A.colptr[j]..A.colptr[j + 1] {
            *yj += a * A.nzval[k] * x[A.rowval[k]];
        }
    }
}

#[test]
#[allow(non_snake_case)]
fn test_csc_gemv() {
    // A = [1. 3. 5.; 2. 0. 6.; 0. 4. 7.]
    let A = CscMatrix::new(
        3,
        3,
        vec![0, 2, 4, 7],
        vec![0, 1, 0, 2, 0, 1, 2],
        vec![1., 2., 3., 4., 5., 6., 7.],
    );
    let x = vec![1., 2., 3.];

    let mut y = vec![1., 1., 1.];
    A.gemv(&mut y, &x, 1., 0.);
    assert_eq!(y, vec![22., 20., 29.]);

    let mut y = vec![1., 1., 1.];
    A.t().gemv(&mut y, &x, -1., 2.);
    assert_eq!(y, vec![-3., -13., -36.]);
}
