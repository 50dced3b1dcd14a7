use super::rootfinding::newton_bracketed;
use super::*;
use crate::algebra::*;

// -------------------------------------
// Power Cone
// -------------------------------------

/// The power cone {(x,y,z) : x^α y^(1-α) ≥ |z|, x,y ≥ 0} with α ∈ [0,1),
/// or its dual cone when constructed with [`PrimalOrDualCone::DualCone`].
pub struct PowerCone<T: FloatT = f64> {
    // power defining the cone
    α: T,
    orientation: PrimalOrDualCone,
}

impl<T> PowerCone<T>
where
    T: FloatT,
{
    pub fn new(α: T, orientation: PrimalOrDualCone) -> Self {
        Self { α, orientation }
    }
}

impl<T> Cone<T> for PowerCone<T>
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
        let α = self.α;
        match self.orientation.compose(pd) {
            PrimalOrDualCone::PrimalCone => _project_pow_primal(x, α, settings),
            PrimalOrDualCone::DualCone => {
                project_dual_by_moreau(x, |w| _project_pow_primal(w, α, settings))
            }
        }
    }
}

// ---------------------------------------------
// internal operations for power cones
// ---------------------------------------------

fn _project_pow_primal<T>(v: &mut [T], α: T, settings: &ProjectionSettings<T>) -> Result<(), ProjectionError>
where
    T: FloatT,
{
    let (xh, yh, zh) = (v[0], v[1], v[2]);
    let rh = T::abs(zh);
    let thresh = settings.cone_threshold * v.norm_inf();
    let zero = T::zero();
    let one = T::one();

    // v in K_α
    if xh >= zero && yh >= zero && thresh + T::powf(xh, α) * T::powf(yh, one - α) >= rh {
        return Ok(());
    }

    // -v in K_α^*
    if xh <= zero
        && yh <= zero
        && thresh + T::powf(-xh, α) * T::powf(-yh, one - α)
            >= rh * T::powf(α, α) * T::powf(one - α, one - α)
    {
        v.fill(zero);
        return Ok(());
    }

    // the projection onto the (x,y) orthant is exact when z = 0
    if rh == zero {
        v[0] = T::max(xh, zero);
        v[1] = T::max(yh, zero);
        return Ok(());
    }

    // solve x(r)^α y(r)^(1-α) = r for r = |z| on (0,|ẑ|), written as an
    // increasing function of r
    let g = |r: T| {
        let x = _pow_calc_x(r, xh, rh, α);
        let y = _pow_calc_x(r, yh, rh, one - α);
        let dxdr = _pow_calc_dxdr(x, xh, rh, r, α);
        let dydr = _pow_calc_dxdr(y, yh, rh, r, one - α);
        let xy = T::powf(x, α) * T::powf(y, one - α);
        let f = xy - r;
        let df = xy * (α * dxdr / x + (one - α) * dydr / y) - one;
        (-f, -df)
    };

    let half: T = (0.5).as_T();
    let r = newton_bracketed(g, (zero, rh), half * rh, settings, "power cone")?;

    v[0] = _pow_calc_x(r, xh, rh, α);
    v[1] = _pow_calc_x(r, yh, rh, one - α);
    v[2] = if zh < zero { -r } else { r };

    Ok(())
}

fn _pow_calc_x<T>(r: T, xh: T, rh: T, α: T) -> T
where
    T: FloatT,
{
    let two: T = (2.).as_T();
    let four: T = (4.).as_T();
    let x = (xh + T::sqrt(xh * xh + four * α * (rh - r) * r)) / two;
    T::max(x, (1e-12).as_T())
}

fn _pow_calc_dxdr<T>(x: T, xh: T, rh: T, r: T, α: T) -> T
where
    T: FloatT,
{
    let two: T = (2.).as_T();
    α * (rh - two * r) / (two * x - xh)
}

#[test]
fn test_pow_projection_small_scale() {
    // outside K_α by 1e-9, which an absolute membership test would accept
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;
    let K = PowerCone::<f64>::new(0.5, PrimalOrDualCone::PrimalCone);

    let v0 = [1e-5, 1e-5, 1e-5 + 1e-9];
    let mut v = v0.to_vec();
    K.project(&mut v, pd, &settings).unwrap();

    assert!(v[2] < v0[2]);
    assert!(v[0] >= v0[0] && v[1] >= v0[1]);
    let xy = f64::powf(v[0], 0.5) * f64::powf(v[1], 0.5);
    assert!((xy - v[2]).abs() <= 1e-11);

    // points inside the cone at the same scale are kept
    let v0 = [1e-5, 1e-5, 1e-5 - 1e-9];
    let mut v = v0.to_vec();
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, v0);
}

#[test]
fn test_pow_projection_labeled() {
    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;

    // (1,1,1) is on the boundary of K_α with outward normal (-α,-(1-α),1)
    for α in [0.25, 0.5, 0.75] {
        let K = PowerCone::<f64>::new(α, PrimalOrDualCone::PrimalCone);
        let mut v = vec![1. - α, α, 2.];
        K.project(&mut v, pd, &settings).unwrap();
        assert!(v.norm_inf_diff(&[1., 1., 1.]) < 1e-8);

        let mut v = vec![1. - α, α, -2.];
        K.project(&mut v, pd, &settings).unwrap();
        assert!(v.norm_inf_diff(&[1., 1., -1.]) < 1e-8);
    }

    // (4,1,2) is on the boundary of K_0.5 with outward normal (-1/4,-1,1)
    let K = PowerCone::<f64>::new(0.5, PrimalOrDualCone::PrimalCone);
    let mut v = vec![3.75, 0., 3.];
    K.project(&mut v, pd, &settings).unwrap();
    assert!(v.norm_inf_diff(&[4., 1., 2.]) < 1e-8);

    // z = 0 clips x and y
    let mut v = vec![-1., 2., 0.];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![0., 2., 0.]);

    // polar point
    let mut v = vec![-1., -1., 0.5];
    K.project(&mut v, pd, &settings).unwrap();
    assert_eq!(v, vec![0., 0., 0.]);
}

#[test]
fn test_dual_pow_projection_labeled() {
    // K_α^* = {(u,v,w) : (u/α)^α (v/(1-α))^(1-α) ≥ |w|, u,v ≥ 0}
    let settings = ProjectionSettings::default();
    let K = PowerCone::<f64>::new(0.75, PrimalOrDualCone::DualCone);
    let pd = PrimalOrDualCone::PrimalCone;

    let mut v = vec![-0.25, -0.75, -2.];
    K.project(&mut v, pd, &settings).unwrap();
    assert!(v.norm_inf_diff(&[0.75, 0.25, -1.]) < 1e-8);

    // (α,1-α,1) is already in the dual cone
    let mut v = vec![0.75, 0.25, 1.];
    K.project(&mut v, pd, &settings).unwrap();
    assert!(v.norm_inf_diff(&[0.75, 0.25, 1.]) < 1e-8);
}

#[test]
fn test_pow_projection_optimality() {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    let settings = ProjectionSettings::default();
    let pd = PrimalOrDualCone::PrimalCone;
    let mut rng = ChaCha8Rng::seed_from_u64(4321);

    for α in [0.1, 0.33, 0.5, 0.9] {
        let K = PowerCone::<f64>::new(α, PrimalOrDualCone::PrimalCone);
        let Kd = PowerCone::<f64>::new(α, PrimalOrDualCone::DualCone);

        for _ in 0..100 {
            let v: Vec<f64> = (0..3).map(|_| rng.gen_range(-5.0..5.0)).collect();
            let mut p = v.clone();
            K.project(&mut p, pd, &settings).unwrap();

            // p ∈ K, p - v ∈ K*, <p, p - v> = 0
            assert!(p[0] >= 0. && p[1] >= 0.);
            assert!(p[0].powf(α) * p[1].powf(1. - α) - p[2].abs() > -1e-7);

            let mut d = vec![0.; 3];
            d.waxpby(1., &p, -1., &v);
            let mut dd = d.clone();
            Kd.project(&mut dd, pd, &settings).unwrap();
            assert!(dd.norm_inf_diff(&d) < 1e-7);
            assert!(p.dot(&d).abs() < 1e-7);
        }
    }
}
