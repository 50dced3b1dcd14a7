//! Conformance checks for conic solvers against generated problems.
//!
//! A solver is wrapped in a [`SolverAdapter`] and asked to solve a
//! [`ProblemInstance`](crate::generator::ProblemInstance).  The returned
//! primal-dual triple is then checked by a [`ConformanceChecker`] against
//! the optimality, infeasibility or unboundedness conditions matching the
//! certificate carried by the instance.

use crate::algebra::*;
use crate::cones::ProjectionError;
use crate::generator::ProblemKind;
use thiserror::Error;

mod adapter;
mod checker;
mod report;
mod settings;

pub use adapter::*;
pub use checker::*;
pub use report::*;
pub use settings::*;

/// Error type returned by conformance runs.
#[derive(Error, Debug)]
pub enum ConformanceError {
    /// The solver adapter reported a failure
    #[error("solver failed: {0}")]
    Solver(String),
    /// A cone projection failed during a membership check
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    /// One or more checks did not pass
    #[error("failed conformance checks: {}", failed.join(", "))]
    Failed { failed: Vec<&'static str> },
    /// Solution vectors do not match the problem data
    #[error("solution vector {name} has length {found}, expected {expected}")]
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
    /// The requested checks do not apply to the problem's certificate
    #[error("expected a {expected} problem, found a {found} one")]
    KindMismatch {
        expected: ProblemKind,
        found: ProblemKind,
    },
    /// The report could not be written
    #[error("failed to write conformance report: {0}")]
    Io(#[from] std::io::Error),
}

/// Primal-dual triple returned by a solver
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound = "T: serde::Serialize + serde::de::DeserializeOwned")
)]
pub struct Solution<T: FloatT = f64> {
    /// primal variables
    pub x: Vec<T>,
    /// dual variables
    pub y: Vec<T>,
    /// primal slacks
    pub s: Vec<T>,
}

impl<T> Solution<T>
where
    T: FloatT,
{
    /// All-zero solution for a problem with `m` constraints and `n` variables
    pub fn zeros(m: usize, n: usize) -> Self {
        Self {
            x: vec![T::zero(); n],
            y: vec![T::zero(); m],
            s: vec![T::zero(); m],
        }
    }
}
