use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix assembly operations.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Row value exceeds the matrix row dimension")]
    /// Row value exceeds the matrix row dimension
    BadRowval,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
}

/// Error type returned by dense factorization routines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DenseFactorizationError {
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    #[error("Eigendecomposition produced non-finite values")]
    Eigen,
}
