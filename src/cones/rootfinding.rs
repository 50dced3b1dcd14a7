// Safeguarded scalar Newton iteration shared by the exponential and
// power cone projections.

use super::{ProjectionError, ProjectionSettings};
#[cfg(test)]
use super::ProjectionSettingsBuilder;
use crate::algebra::*;

/// Finds a root of the increasing function `f` on the open interval
/// `(lo, hi)`, where `f(lo) ≤ 0 ≤ f(hi)`.  The function returns the pair
/// `(f(x), f'(x))` and is only ever evaluated strictly inside the bracket.
///
/// Newton steps are taken when they remain inside the current bracket and
/// shrink quickly enough, with bisection used otherwise.  A residual test
/// is only accepted at points where `f'(x) > 0`.
pub(crate) fn newton_bracketed<T, F>(
    f: F,
    bracket: (T, T),
    x0: T,
    settings: &ProjectionSettings<T>,
    cone: &'static str,
) -> Result<T, ProjectionError>
where
    T: FloatT,
    F: Fn(T) -> (T, T),
{
    let half: T = (0.5).as_T();
    let (mut lo, mut hi) = bracket;
    let tol = settings.root_tol;

    let mut x = if x0 > lo && x0 < hi { x0 } else { half * (lo + hi) };
    let mut dxold = hi - lo;

    for _ in 0..settings.max_iter {
        let (fx, dfx) = f(x);

        if fx.is_nan() {
            break;
        }
        if T::abs(fx) <= tol && dfx > T::zero() {
            return Ok(x);
        }

        // shrink the bracket
        if fx < T::zero() {
            lo = x;
        } else {
            hi = x;
        }

        let mut xnew = half * (lo + hi);
        if dfx > T::zero() {
            let step = fx / dfx;
            let xn = x - step;
            if xn > lo && xn < hi && T::abs(step) < half * T::abs(dxold) {
                xnew = xn;
            }
        }

        let dx = xnew - x;
        dxold = dx;
        x = xnew;

        if T::abs(dx) <= tol * (T::one() + T::abs(x)) || hi - lo <= tol * (T::one() + T::abs(x)) {
            return Ok(x);
        }
    }

    Err(ProjectionError::DidNotConverge {
        cone,
        iterations: settings.max_iter,
    })
}

#[test]
fn test_newton_bracketed_sqrt2() {
    let settings = ProjectionSettings::<f64>::default();
    let r = newton_bracketed(|x| (x * x - 2., 2. * x), (0., 2.), 1., &settings, "test").unwrap();
    assert!((r - std::f64::consts::SQRT_2).abs() < 1e-12);
}

#[test]
fn test_newton_bracketed_flat_derivative() {
    // x^3 has f'(0) = 0 at its root, so convergence relies on the bracket
    let settings = ProjectionSettings::<f64>::default();
    let r = newton_bracketed(|x| (x * x * x, 3. * x * x), (-1., 3.), 2., &settings, "test").unwrap();
    assert!(r.abs() < 1e-4);
}

#[test]
fn test_newton_bracketed_budget() {
    let settings = ProjectionSettingsBuilder::<f64>::default()
        .max_iter(2)
        .build()
        .unwrap();
    let result = newton_bracketed(|x: f64| (x.ln(), 1. / x), (1e-300, 1e300), 1e200, &settings, "test");
    assert_eq!(
        result,
        Err(ProjectionError::DidNotConverge {
            cone: "test",
            iterations: 2
        })
    );
}
