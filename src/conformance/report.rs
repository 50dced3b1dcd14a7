use super::*;
use crate::io::PrintTarget;
use std::io::Write;

/// Outcome of a single named check.  A check passes when
/// `value < bound`, so NaN values always fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceCheck<T> {
    pub name: &'static str,
    pub value: T,
    pub bound: T,
    pub passed: bool,
}

impl<T> ConformanceCheck<T>
where
    T: FloatT,
{
    pub fn new(name: &'static str, value: T, bound: T) -> Self {
        Self {
            name,
            value,
            bound,
            passed: value < bound,
        }
    }
}

/// All checks applied to one solution
#[derive(Debug, Clone, PartialEq)]
pub struct ConformanceReport<T> {
    pub kind: ProblemKind,
    pub checks: Vec<ConformanceCheck<T>>,
}

impl<T> ConformanceReport<T>
where
    T: FloatT,
{
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// names of the checks that did not pass
    pub fn failures(&self) -> Vec<&'static str> {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| c.name)
            .collect()
    }

    pub fn get(&self, name: &str) -> Option<&ConformanceCheck<T>> {
        self.checks.iter().find(|c| c.name == name)
    }

    /// `Ok(self)` if every check passed, otherwise the failed names
    pub fn into_result(self) -> Result<Self, ConformanceError> {
        if self.passed() {
            Ok(self)
        } else {
            Err(ConformanceError::Failed {
                failed: self.failures(),
            })
        }
    }

    pub fn print(&self, out: &mut PrintTarget) -> std::io::Result<()> {
        writeln!(out, "\nconformance: {} problem", self.kind)?;
        writeln!(
            out,
            "  {:<24}  {:>10}  {:>10}  result",
            "check", "value", "bound"
        )?;
        writeln!(out, "  {}", "-".repeat(56))?;
        for check in self.checks.iter() {
            writeln!(
                out,
                "  {:<24}  {:>10.3e}  {:>10.3e}  {}",
                check.name,
                check.value,
                check.bound,
                _pass_fail(check.passed)
            )?;
        }
        writeln!(out,)?;
        out.flush()
    }
}

fn _pass_fail(v: bool) -> &'static str {
    match v {
        true => "pass",
        false => "FAIL",
    }
}

#[test]
fn test_report_result() {
    use crate::io::ConfigurablePrintTarget;

    let report = ConformanceReport {
        kind: ProblemKind::Infeasible,
        checks: vec![
            ConformanceCheck::new("dual ray residual", 1e-9, 1e-3),
            ConformanceCheck::new("dual ray offset", f64::NAN, -0.1),
        ],
    };
    assert!(!report.passed());
    assert!(report.get("dual ray residual").unwrap().passed);

    let mut out = PrintTarget::default();
    out.print_to_buffer();
    report.print(&mut out).unwrap();
    let text = out.get_print_buffer().unwrap();
    assert!(text.contains("conformance: infeasible problem"));
    assert!(text.contains("FAIL"));

    match report.into_result() {
        Err(ConformanceError::Failed { failed }) => assert_eq!(failed, vec!["dual ray offset"]),
        _ => panic!("expected a failed report"),
    }
}
