#![allow(non_snake_case)]

use super::*;
use crate::cones::{ConeProjector, ConeSpec, ProjectionSettings};
use crate::generator::{Certificate, ProblemInstance};
use crate::io::{ConfigurablePrintTarget, PrintTarget};

/// Checks solver output against the conditions certified by a
/// generated problem.
#[derive(Debug)]
pub struct ConformanceChecker<T: FloatT = f64> {
    pub projector: ConeProjector<T>,
    pub tolerances: ConformanceTolerances<T>,
    stream: PrintTarget,
}

impl<T> Default for ConformanceChecker<T>
where
    T: FloatT,
{
    fn default() -> Self {
        Self::new(ConformanceTolerances::default())
    }
}

impl<T> ConformanceChecker<T>
where
    T: FloatT,
{
    pub fn new(tolerances: ConformanceTolerances<T>) -> Self {
        Self::new_with_projection(tolerances, ProjectionSettings::default())
    }

    pub fn new_with_projection(
        tolerances: ConformanceTolerances<T>,
        projection: ProjectionSettings<T>,
    ) -> Self {
        Self {
            projector: ConeProjector::new(projection),
            tolerances,
            stream: PrintTarget::default(),
        }
    }

    /// Optimality conditions: objective value, primal and dual residuals,
    /// complementarity, and cone membership of `s` and `y`.
    pub fn check_feasible(
        &self,
        problem: &ProblemInstance<T>,
        solution: &Solution<T>,
    ) -> Result<ConformanceReport<T>, ConformanceError> {
        let Certificate::Optimal { objective, .. } = &problem.certificate else {
            return Err(ConformanceError::KindMismatch {
                expected: ProblemKind::Feasible,
                found: problem.kind(),
            });
        };
        _check_dims(problem, solution, true, true)?;
        let tol = &self.tolerances;
        let Solution { x, y, s } = solution;
        let A = &problem.A;

        let pcost = problem.c.dot(x);

        // Ax - b + s
        let mut rp = s.clone();
        rp.axpby(-T::one(), &problem.b, T::one());
        A.gemv(&mut rp, x, T::one(), T::one());

        // A'y + c
        let mut rd = problem.c.clone();
        A.t().gemv(&mut rd, y, T::one(), T::one());

        let checks = vec![
            ConformanceCheck::new("objective", T::abs(pcost - *objective), tol.objective),
            ConformanceCheck::new("primal residual", rp.norm(), tol.residual),
            ConformanceCheck::new("dual residual", rd.norm(), tol.residual),
            ConformanceCheck::new("complementarity", T::abs(s.dot(y)), tol.complementarity),
            ConformanceCheck::new(
                "primal cone membership",
                self._primal_violation(s, &problem.cone)?,
                tol.membership,
            ),
            ConformanceCheck::new(
                "dual cone membership",
                self._dual_violation(y, &problem.cone)?,
                tol.membership,
            ),
        ];

        Ok(ConformanceReport {
            kind: ProblemKind::Feasible,
            checks,
        })
    }

    /// Dual ray conditions: `A'y ≈ 0`, `b'y < -margin` and `y ∈ K*`.
    pub fn check_infeasible(
        &self,
        problem: &ProblemInstance<T>,
        solution: &Solution<T>,
    ) -> Result<ConformanceReport<T>, ConformanceError> {
        if problem.kind() != ProblemKind::Infeasible {
            return Err(ConformanceError::KindMismatch {
                expected: ProblemKind::Infeasible,
                found: problem.kind(),
            });
        }
        _check_dims(problem, solution, false, true)?;
        let tol = &self.tolerances;
        let y = &solution.y;

        let mut r = vec![T::zero(); problem.n()];
        problem.A.t().gemv(&mut r, y, T::one(), T::zero());

        let checks = vec![
            ConformanceCheck::new("dual ray residual", r.norm(), tol.residual),
            ConformanceCheck::new("dual ray offset", problem.b.dot(y), -tol.margin),
            ConformanceCheck::new(
                "dual cone membership",
                self._dual_violation(y, &problem.cone)?,
                tol.membership,
            ),
        ];

        Ok(ConformanceReport {
            kind: ProblemKind::Infeasible,
            checks,
        })
    }

    /// Primal ray conditions: `Ax + s ≈ 0`, `c'x < -margin` and `s ∈ K`.
    pub fn check_unbounded(
        &self,
        problem: &ProblemInstance<T>,
        solution: &Solution<T>,
    ) -> Result<ConformanceReport<T>, ConformanceError> {
        if problem.kind() != ProblemKind::Unbounded {
            return Err(ConformanceError::KindMismatch {
                expected: ProblemKind::Unbounded,
                found: problem.kind(),
            });
        }
        _check_dims(problem, solution, true, false)?;
        let tol = &self.tolerances;
        let Solution { x, s, .. } = solution;

        let mut r = s.clone();
        problem.A.gemv(&mut r, x, T::one(), T::one());

        let checks = vec![
            ConformanceCheck::new("primal ray residual", r.norm(), tol.residual),
            ConformanceCheck::new("primal ray cost", problem.c.dot(x), -tol.margin),
            ConformanceCheck::new(
                "primal cone membership",
                self._primal_violation(s, &problem.cone)?,
                tol.membership,
            ),
        ];

        Ok(ConformanceReport {
            kind: ProblemKind::Unbounded,
            checks,
        })
    }

    /// Applies the checks matching the problem's certificate
    pub fn check(
        &self,
        problem: &ProblemInstance<T>,
        solution: &Solution<T>,
    ) -> Result<ConformanceReport<T>, ConformanceError> {
        match problem.kind() {
            ProblemKind::Feasible => self.check_feasible(problem, solution),
            ProblemKind::Infeasible => self.check_infeasible(problem, solution),
            ProblemKind::Unbounded => self.check_unbounded(problem, solution),
        }
    }

    /// Solves `problem` with `adapter` and checks the result.  The report
    /// is printed when `options.verbose` is set.
    pub fn run<S>(
        &mut self,
        adapter: &mut S,
        problem: &ProblemInstance<T>,
        options: &SolverOptions<T>,
    ) -> Result<ConformanceReport<T>, ConformanceError>
    where
        S: SolverAdapter<T>,
    {
        let solution = adapter
            .solve(problem, options)
            .map_err(|e| ConformanceError::Solver(e.to_string()))?;

        let report = self.check(problem, &solution)?;
        if options.verbose {
            report.print(&mut self.stream)?;
        }
        report.into_result()
    }

    fn _primal_violation(&self, s: &[T], cone: &ConeSpec) -> Result<T, ConformanceError> {
        let p = self.projector.project(s, cone)?;
        Ok(p.norm_inf_diff(s))
    }

    fn _dual_violation(&self, y: &[T], cone: &ConeSpec) -> Result<T, ConformanceError> {
        let p = self.projector.project_dual(y, cone)?;
        Ok(p.norm_inf_diff(y))
    }
}

impl<T> ConfigurablePrintTarget for ConformanceChecker<T>
where
    T: FloatT,
{
    fn print_to_stdout(&mut self) {
        self.stream.print_to_stdout()
    }
    fn print_to_file(&mut self, file: std::fs::File) {
        self.stream.print_to_file(file)
    }
    fn print_to_stream(&mut self, stream: Box<dyn std::io::Write + Send + Sync>) {
        self.stream.print_to_stream(stream)
    }
    fn print_to_buffer(&mut self) {
        self.stream.print_to_buffer()
    }
    fn get_print_buffer(&mut self) -> std::io::Result<String> {
        self.stream.get_print_buffer()
    }
}

/// Solves `problem` with `adapter` and checks the solution against its
/// certificate, printing the report to stdout when `options.verbose`.
pub fn run_conformance<T, S>(
    adapter: &mut S,
    problem: &ProblemInstance<T>,
    options: &SolverOptions<T>,
    tolerances: ConformanceTolerances<T>,
) -> Result<ConformanceReport<T>, ConformanceError>
where
    T: FloatT,
    S: SolverAdapter<T>,
{
    ConformanceChecker::new(tolerances).run(adapter, problem, options)
}

fn _check_dims<T: FloatT>(
    problem: &ProblemInstance<T>,
    solution: &Solution<T>,
    primal: bool,
    dual: bool,
) -> Result<(), ConformanceError> {
    let (m, n) = (problem.m(), problem.n());
    let mut lengths = vec![];
    if primal {
        lengths.push(("x", n, solution.x.len()));
        lengths.push(("s", m, solution.s.len()));
    }
    if dual {
        lengths.push(("y", m, solution.y.len()));
    }
    if let Some(&(name, expected, found)) = lengths.iter().find(|(_, e, f)| e != f) {
        return Err(ConformanceError::DimensionMismatch {
            name,
            expected,
            found,
        });
    }
    Ok(())
}

#[test]
fn test_checker_dimension_and_kind_errors() {
    use crate::cones::ConeSpecBuilder;
    use crate::generator::generate_feasible;

    let spec = ConeSpecBuilder::default().l(3).q(vec![3]).build().unwrap();
    let problem = generate_feasible(&spec, 2, 0.5, 9).unwrap();
    let checker = ConformanceChecker::<f64>::default();

    let short = Solution::zeros(problem.m() - 1, problem.n());
    assert!(matches!(
        checker.check(&problem, &short),
        Err(ConformanceError::DimensionMismatch { name: "s", .. })
    ));

    let zeros = Solution::zeros(problem.m(), problem.n());
    assert!(matches!(
        checker.check_unbounded(&problem, &zeros),
        Err(ConformanceError::KindMismatch { .. })
    ));
}
