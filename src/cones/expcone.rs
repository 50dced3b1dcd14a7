use super::rootfinding::newton_bracketed;
use super::*;
use crate::algebra::*;
use core::marker::PhantomData;

// -------------------------------------
// Exponential Cone
// -------------------------------------

/// The exponential cone cl{(x,y,z) : y > 0, y exp(x/y) ≤ z}, or its dual
/// cone when constructed with [`PrimalOrDualCone::DualCone`].
pub struct ExponentialCone<T: FloatT = f64> {
    orientation: PrimalOrDualCone,
    phantom: PhantomData<T>,
}

impl<T> ExponentialCone<T>
where
    T: FloatT,
{
    pub fn new(orientation: PrimalOrDualCone) -> Self {
        Self {
            orientation,
            phantom: PhantomData,
        }
    }
}

impl<T> Cone<T> for ExponentialCone<T>
where
    T: FloatT,
{
    fn numel(&self) -> usize {
        3
    }

    fn project(
        &self,
        x: &mut [T],
        pd: PrimalOrDualCone,
        settings: &ProjectionSettings<T>,
    ) -> Result<(), ProjectionError> {
        match self.orientation.compose(pd) {
            PrimalOrDualCone::PrimalCone => _project_exp_primal(x, settings),
            PrimalOrDualCone::DualCone => {
                project_dual_by_moreau(x, |w| _project_exp_primal(w, settings))
            }
        }
    }
}

// ---------------------------------------------
// internal operations for exponential cones
// ---------------------------------------------

fn _project_exp_primal<T>(v: &mut [T], settings: &ProjectionSettings<T>) -> Result<(), ProjectionError>
where
    T: FloatT,
{
    let (r, s, t) = (v[0], v[1], v[2]);
    let thresh = settings.cone_threshold * v.norm_inf();
    let zero = T::zero();

    // v in cl(K_exp)
    if (s > zero && s * T::exp(r / s) - t <= thresh) || (r <= zero && s == zero && t >= zero) {
        return Ok(());
    }

    // -v in K_exp^*
    if (r > zero && r * T::exp(s / r) + T::E() * t <= thresh)
        || (r == zero && s <= zero && t <= zero)
    {
        v.fill(zero);
        return Ok(());
    }

    // special case with analytical solution
    if r < zero && s < zero {
        v[1] = zero;
        v[2] = T::max(t, zero);
        return Ok(());
    }

    // bisection on the dual variable ρ of the boundary constraint
    let mut x = [zero; 3];
    let (mut lb, mut ub) = _exp_rho_bounds(v, &mut x, settings)?;

    let half: T = (0.5).as_T();
    for _ in 0..settings.max_iter {
        let ρ = half * (lb + ub);
        let g = _exp_grad_rho(v, &mut x, ρ, settings)?;
        if g > zero {
            lb = ρ;
        } else {
            ub = ρ;
        }
        if ub - lb <= settings.root_tol * (T::one() + ub) {
            v.copy_from_slice(&x);
            return Ok(());
        }
    }

    Err(ProjectionError::DidNotConverge {
        cone: "exponential cone",
        iterations: settings.max_iter,
    })
}

// initial bracket for the bisection on ρ
fn _exp_rho_bounds<T>(
    v: &[T],
    x: &mut [T; 3],
    settings: &ProjectionSettings<T>,
) -> Result<(T, T), ProjectionError>
where
    T: FloatT,
{
    let two: T = (2.).as_T();
    let mut lb = T::zero();
    let mut ub: T = (0.125).as_T();

    for _ in 0..settings.max_iter {
        if _exp_grad_rho(v, x, ub, settings)? <= T::zero() {
            return Ok((lb, ub));
        }
        lb = ub;
        ub *= two;
    }
    Err(ProjectionError::DidNotConverge {
        cone: "exponential cone",
        iterations: settings.max_iter,
    })
}

// Computes the candidate projection x for a fixed ρ, and returns the
// gradient of the dual function with respect to ρ at that point.
fn _exp_grad_rho<T>(
    v: &[T],
    x: &mut [T; 3],
    ρ: T,
    settings: &ProjectionSettings<T>,
) -> Result<T, ProjectionError>
where
    T: FloatT,
{
    _exp_solve_for_x_with_rho(v, x, ρ, settings)?;

    let ε: T = (1e-12).as_T();
    if x[1] <= ε {
        Ok(x[0])
    } else {
        Ok(x[0] + x[1] * (x[1] / x[2]).logsafe())
    }
}

fn _exp_solve_for_x_with_rho<T>(
    v: &[T],
    x: &mut [T; 3],
    ρ: T,
    settings: &ProjectionSettings<T>,
) -> Result<(), ProjectionError>
where
    T: FloatT,
{
    let t = _exp_newton_one_d(ρ, v[1], v[2], settings)?;
    x[2] = t + v[2];
    x[1] = t * x[2] / ρ;
    x[0] = v[0] - ρ;
    Ok(())
}

// Root of f(t) = t(t+ẑ)/ρ² - ŷ/ρ + ln(t/ρ) + 1 on t > max(0,-ẑ).
// Returns t = -ẑ when f has no root on the open interval, which
// places the candidate point at the origin of the (y,z) plane.
fn _exp_newton_one_d<T>(
    ρ: T,
    ŷ: T,
    ẑ: T,
    settings: &ProjectionSettings<T>,
) -> Result<T, ProjectionError>
where
    T: FloatT,
{
    let ρ2 = ρ * ρ;
    let f = |t: T| {
        let f = t * (t + ẑ) / ρ2 - ŷ / ρ + T::ln(t / ρ) + T::one();
        let df = (t + t + ẑ) / ρ2 + T::recip(t);
        (f, df)
    };

    let lo = T::max(T::zero(), -ẑ);
    if lo > T::zero() && f(lo).0 >= T::zero() {
        return Ok(lo);
    }

    // f is increasing and unbounded above, so doubling finds an upper bracket
    let two: T = (2.).as_T();
    let mut hi = two * T::max(lo, T::one());
    let mut found = false;
    for _ in 0..settings.max_iter {
        if f(hi).0 > T::zero() {
            found = true;
            break;
        }
        hi *= two;
    }
    if !found {
        return Err(ProjectionError::DidNotConverge {
            cone: "exponential cone",
            iterations: settings.max_iter,
        });
    }

    let half: T = (0.5).as_T();
    newton_bracketed(f, (lo, hi), half * hi, settings, "exponential cone")
}

#[test]
fn test_exp_projection_labeled() {
    let K = ExponentialCone::<f64>::new(PrimalOrDualCone::PrimalCone);
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;

    // (0,1,1) is on the boundary with outward normal (1,1,-1)
    let mut v = vec![1., 2., 0.];
    K.project(&mut v, pd, &settings).unwrap();
    assert!(v.norm_inf_diff(&[0., 1., 1.]) < 1e-8);

    // analytical case x < 0, y < 0
    let mut v = vec![-1., -1., 2.];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![-1., 0., 2.]);

    // interior and polar points
    let mut v = vec![0., 1., 3.];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![0., 1., 3.]);

    let mut v = vec![-1., -1., -1.];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![-1., 0., 0.]);

    let mut v = vec![1., 0., -1.];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![0., 0., 0.]);
}

#[test]
fn test_exp_dual_projection_labeled() {
    // the dual of K_exp is {(u,v,w) : u < 0, -u exp(v/u) ≤ e w} ∪ {(0,v,w) : v,w ≥ 0}
    let K = ExponentialCone::<f64>::new(PrimalOrDualCone::DualCone);
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;

    let mut v = vec![-1., -2., 0.];
    K.project(&mut v, pd, &settings).unwrap();
    assert!(v.norm_inf_diff(&[-1., -1., 1.]) < 1e-8);

    // requesting the dual of the dual cone gives the primal projection
    let mut v = vec![1., 2., 0.];
    K.project(&mut v, PrimalOrDualCone::DualCone, &settings).unwrap();
    assert!(v.norm_inf_diff(&[0., 1., 1.]) < 1e-8);
}

#[test]
fn test_exp_projection_optimality() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let K = ExponentialCone::<f64>::new(PrimalOrDualCone::PrimalCone);
    let Kd = ExponentialCone::<f64>::new(PrimalOrDualCone::DualCone);
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;
    let mut rng = ChaCha8Rng::seed_from_u64(1234);

    for _ in 0..200 {
        let v: Vec<f64> = (0..3).map(|_| rng.gen_range(-5.0..5.0)).collect();
        let mut p = v.clone();
        K.project(&mut p, pd, &settings).unwrap();

        // p ∈ K, p - v ∈ K*, <p, p - v> = 0
        let mut pp = p.clone();
        K.project(&mut pp, pd, &settings).unwrap();
        assert!(pp.norm_inf_diff(&p) < 1e-7);
        let mut d = vec![0.; 3];
        d.waxpby(1., &p, -1., &v);
        let mut dd = d.clone();
        Kd.project(&mut dd, pd, &settings).unwrap();
        assert!(dd.norm_inf_diff(&d) < 1e-7);
        assert!(p.dot(&d).abs() < 1e-7);
    }
}
