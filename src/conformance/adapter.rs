use super::*;
use crate::generator::{Certificate, ProblemInstance};
use std::convert::Infallible;

/// Black-box interface to a conic solver under test.
///
/// Implementations translate the problem data into the solver's own
/// format and return its primal-dual triple.  For infeasible problems
/// only `y` is checked, and for unbounded problems only `x` and `s`.
pub trait SolverAdapter<T: FloatT> {
    type Error: std::error::Error;

    fn solve(
        &mut self,
        problem: &ProblemInstance<T>,
        options: &SolverOptions<T>,
    ) -> Result<Solution<T>, Self::Error>;
}

/// Adapter answering with the certificate the problem was generated
/// from.  Vectors the certificate does not provide are returned as zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertificateOracle;

impl<T> SolverAdapter<T> for CertificateOracle
where
    T: FloatT,
{
    type Error = Infallible;

    fn solve(
        &mut self,
        problem: &ProblemInstance<T>,
        _options: &SolverOptions<T>,
    ) -> Result<Solution<T>, Infallible> {
        let (m, n) = (problem.m(), problem.n());
        let solution = match &problem.certificate {
            Certificate::Optimal { x, y, s, .. } => Solution {
                x: x.clone(),
                y: y.clone(),
                s: s.clone(),
            },
            Certificate::PrimalInfeasible { y } => Solution {
                y: y.clone(),
                ..Solution::zeros(m, n)
            },
            Certificate::DualInfeasible { x, s } => Solution {
                x: x.clone(),
                s: s.clone(),
                ..Solution::zeros(m, n)
            },
        };
        Ok(solution)
    }
}
