use thiserror::Error;

/// Error type returned when a cone description is invalid.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConeSpecError {
    /// A cone dimension or count is negative
    #[error("invalid cone specification: negative dimension {value} for \"{key}\"")]
    NegativeDimension { key: String, value: i64 },
    /// A power cone exponent lies outside (-1,1) or is not finite
    #[error("invalid cone specification: power cone exponent {0} is not in (-1,1)")]
    InvalidExponent(f64),
    /// The mapping contains a key that is not a cone family
    #[error("invalid cone specification: unknown cone key \"{0}\"")]
    UnknownKey(String),
    /// The value for a key has the wrong kind
    #[error("invalid cone specification: \"{key}\" expects {expected}")]
    WrongKind { key: String, expected: &'static str },
    /// The description could not be parsed
    #[error("invalid cone specification: {0}")]
    Parse(String),
}

/// Error type returned by cone projections.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    /// The vector length does not agree with the cone dimension
    #[error("vector has length {found} but the cone has dimension {expected}")]
    DimensionMismatch { expected: usize, found: usize },
    /// An iterative projection exhausted its iteration budget
    #[error("{cone} projection did not converge in {iterations} iterations")]
    DidNotConverge {
        cone: &'static str,
        iterations: u32,
    },
    /// The PSD eigendecomposition failed
    #[error("eigendecomposition failed in PSD cone projection")]
    Eigen,
}
