use super::*;
use crate::algebra::{triangular_number, AsFloatT};
use derive_builder::Builder;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single named parameter of a cone description
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ConeParam {
    /// dimension or count, used for "z", "l", "ep" and "ed"
    Count(i64),
    /// list of sizes, used for "q" and "s"
    Sizes(Vec<i64>),
    /// list of exponents, used for "p"
    Exponents(Vec<f64>),
}

/// Description of a composite cone.
///
/// Blocks appear in the fixed order zero cone, nonnegative orthant,
/// second order cones, PSD cones, exponential cones, dual exponential
/// cones and power cones.  A power cone exponent `p` with a negative
/// sign denotes the dual power cone with power `-p`, so that negating an
/// exponent always gives the dual block.
///
/// __Example usage__ :
///
/// ```no_run
/// use conegen::cones::ConeSpecBuilder;
///
/// let spec = ConeSpecBuilder::default()
///     .z(10)
///     .l(15)
///     .q(vec![5, 10, 0, 1])
///     .p(vec![-0.25, 0.5])
///     .build()
///     .unwrap();
///
/// assert_eq!(spec.total_dimension(), 10 + 15 + 16 + 6);
/// ```
#[derive(Builder, Debug, Clone, PartialEq, Default)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "BTreeMap<String, ConeParam>")
)]
pub struct ConeSpec {
    /// zero cone dimension
    #[builder(default)]
    z: usize,
    /// nonnegative orthant dimension
    #[builder(default)]
    l: usize,
    /// second order cone dimensions
    #[builder(default)]
    q: Vec<usize>,
    /// PSD cone side lengths
    #[builder(default)]
    s: Vec<usize>,
    /// number of exponential cones
    #[builder(default)]
    ep: usize,
    /// number of dual exponential cones
    #[builder(default)]
    ed: usize,
    /// power cone exponents
    #[builder(default)]
    p: Vec<f64>,
}

impl ConeSpec {
    /// Builds a cone description from named parameters with keys
    /// `"z","l","q","s","ep","ed","p"`.  Missing keys are empty.
    pub fn from_mapping<I, K>(params: I) -> Result<Self, ConeSpecError>
    where
        I: IntoIterator<Item = (K, ConeParam)>,
        K: AsRef<str>,
    {
        let mut spec = ConeSpec::default();

        for (key, value) in params {
            let key = key.as_ref();
            match key {
                "z" => spec.z = _as_count(key, &value)?,
                "l" => spec.l = _as_count(key, &value)?,
                "ep" => spec.ep = _as_count(key, &value)?,
                "ed" => spec.ed = _as_count(key, &value)?,
                "q" => spec.q = _as_sizes(key, &value)?,
                "s" => spec.s = _as_sizes(key, &value)?,
                "p" => spec.p = _as_exponents(key, &value)?,
                _ => return Err(ConeSpecError::UnknownKey(key.to_string())),
            }
        }
        _validate_exponents(&spec.p)?;
        Ok(spec)
    }

    /// Parses a cone description from a JSON object such as
    /// `{"z":10,"l":15,"q":[5,10,0,1],"p":[-0.25,0.5]}`
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConeSpecError> {
        let params: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| ConeSpecError::Parse(e.to_string()))?;

        let mut mapping = Vec::with_capacity(params.len());
        for (key, value) in params {
            let param: ConeParam = serde_json::from_value(value).map_err(|_| {
                ConeSpecError::WrongKind {
                    key: key.clone(),
                    expected: "an integer or a list of numbers",
                }
            })?;
            mapping.push((key, param));
        }
        Self::from_mapping(mapping)
    }

    pub fn z(&self) -> usize {
        self.z
    }
    pub fn l(&self) -> usize {
        self.l
    }
    pub fn q(&self) -> &[usize] {
        &self.q
    }
    pub fn s(&self) -> &[usize] {
        &self.s
    }
    pub fn ep(&self) -> usize {
        self.ep
    }
    pub fn ed(&self) -> usize {
        self.ed
    }
    pub fn p(&self) -> &[f64] {
        &self.p
    }

    /// Total number of vector entries in the composite cone
    pub fn total_dimension(&self) -> usize {
        self.z
            + self.l
            + self.q.iter().sum::<usize>()
            + self.s.iter().map(|&k| triangular_number(k)).sum::<usize>()
            + 3 * (self.ep + self.ed + self.p.len())
    }

    /// Total number of vector entries in the dual cone, which is
    /// always the same as the primal.
    pub fn dual_total_dimension(&self) -> usize {
        self.total_dimension()
    }

    /// The ordered list of cone blocks.  Zero and nonnegative blocks
    /// appear only when non-empty, while every second order, PSD and
    /// power cone entry gives a block, including those of size zero.
    pub fn blocks<T: FloatT>(&self) -> Vec<SupportedConeT<T>> {
        let nblocks = 2 + self.q.len() + self.s.len() + self.ep + self.ed + self.p.len();
        let mut blocks = Vec::with_capacity(nblocks);

        if self.z > 0 {
            blocks.push(SupportedConeT::ZeroConeT(self.z));
        }
        if self.l > 0 {
            blocks.push(SupportedConeT::NonnegativeConeT(self.l));
        }
        blocks.extend(self.q.iter().map(|&q| SupportedConeT::SecondOrderConeT(q)));
        blocks.extend(self.s.iter().map(|&s| SupportedConeT::PSDTriangleConeT(s)));
        blocks.extend((0..self.ep).map(|_| SupportedConeT::ExponentialConeT()));
        blocks.extend((0..self.ed).map(|_| SupportedConeT::DualExponentialConeT()));
        for &p in self.p.iter() {
            if p.is_sign_negative() {
                blocks.push(SupportedConeT::DualPowerConeT((-p).as_T()));
            } else {
                blocks.push(SupportedConeT::PowerConeT(p.as_T()));
            }
        }
        blocks
    }

    /// Description of the dual cone, with the same block order.
    ///
    /// Exponential blocks always come before dual exponential blocks, so
    /// the dual has no description when both `ep` and `ed` are nonzero.
    pub fn dual(&self) -> Option<ConeSpec> {
        if self.ep > 0 && self.ed > 0 {
            return None;
        }
        Some(ConeSpec {
            z: self.z,
            l: self.l,
            q: self.q.clone(),
            s: self.s.clone(),
            ep: self.ed,
            ed: self.ep,
            p: self.p.iter().map(|&p| -p).collect(),
        })
    }
}

impl TryFrom<BTreeMap<String, ConeParam>> for ConeSpec {
    type Error = ConeSpecError;
    fn try_from(params: BTreeMap<String, ConeParam>) -> Result<Self, Self::Error> {
        ConeSpec::from_mapping(params)
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<ConeSpecError> for ConeSpecBuilderError {
    fn from(e: ConeSpecError) -> Self {
        ConeSpecBuilderError::ValidationError(e.to_string())
    }
}

impl ConeSpecBuilder {
    /// check that all power cone exponents lie in (-1,1)
    pub fn validate(&self) -> Result<(), ConeSpecError> {
        if let Some(ref p) = self.p {
            _validate_exponents(p)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual conversion and validation functions go here
// ---------------------------------------------------------

fn _as_dimension(key: &str, value: i64) -> Result<usize, ConeSpecError> {
    usize::try_from(value).map_err(|_| ConeSpecError::NegativeDimension {
        key: key.to_string(),
        value,
    })
}

fn _as_count(key: &str, value: &ConeParam) -> Result<usize, ConeSpecError> {
    match value {
        ConeParam::Count(v) => _as_dimension(key, *v),
        _ => Err(ConeSpecError::WrongKind {
            key: key.to_string(),
            expected: "an integer count",
        }),
    }
}

fn _as_sizes(key: &str, value: &ConeParam) -> Result<Vec<usize>, ConeSpecError> {
    match value {
        ConeParam::Sizes(v) => v.iter().map(|&v| _as_dimension(key, v)).collect(),
        ConeParam::Exponents(v) if v.is_empty() => Ok(vec![]),
        _ => Err(ConeSpecError::WrongKind {
            key: key.to_string(),
            expected: "a list of integer sizes",
        }),
    }
}

fn _as_exponents(key: &str, value: &ConeParam) -> Result<Vec<f64>, ConeSpecError> {
    match value {
        ConeParam::Exponents(v) => Ok(v.clone()),
        ConeParam::Sizes(v) => Ok(v.iter().map(|&v| v as f64).collect()),
        ConeParam::Count(_) => Err(ConeSpecError::WrongKind {
            key: key.to_string(),
            expected: "a list of exponents",
        }),
    }
}

fn _validate_exponents(p: &[f64]) -> Result<(), ConeSpecError> {
    match p.iter().find(|&&p| !(p.is_finite() && p > -1. && p < 1.)) {
        Some(&bad) => Err(ConeSpecError::InvalidExponent(bad)),
        None => Ok(()),
    }
}

#[cfg(test)]
fn _example_spec() -> ConeSpec {
    ConeSpec::from_mapping([
        ("z", ConeParam::Count(10)),
        ("l", ConeParam::Count(15)),
        ("q", ConeParam::Sizes(vec![5, 10, 0, 1])),
        ("s", ConeParam::Sizes(vec![3, 4, 0, 0, 1, 10])),
        ("ep", ConeParam::Count(10)),
        ("ed", ConeParam::Count(10)),
        ("p", ConeParam::Exponents(vec![-0.25, 0.5, 0.75, -0.33])),
    ])
    .unwrap()
}

#[test]
fn test_conespec_dimension() {
    let spec = _example_spec();
    assert_eq!(spec.total_dimension(), 185);
    assert_eq!(spec.dual_total_dimension(), 185);

    let blocks = spec.blocks::<f64>();
    assert_eq!(blocks.len(), 1 + 1 + 4 + 6 + 10 + 10 + 4);
    assert_eq!(blocks.iter().map(|b| b.nvars()).sum::<usize>(), 185);
    assert_eq!(blocks[0], SupportedConeT::ZeroConeT(10));
    assert_eq!(blocks[4], SupportedConeT::SecondOrderConeT(0));
    assert_eq!(blocks[11], SupportedConeT::PSDTriangleConeT(10));
    assert_eq!(blocks[12], SupportedConeT::ExponentialConeT());
    assert_eq!(blocks[22], SupportedConeT::DualExponentialConeT());
    assert_eq!(blocks[32], SupportedConeT::DualPowerConeT(0.25));
    assert_eq!(blocks[33], SupportedConeT::PowerConeT(0.5));
}

#[test]
fn test_conespec_empty_blocks() {
    let spec = ConeSpec::from_mapping([("l", ConeParam::Count(0)), ("q", ConeParam::Sizes(vec![0]))])
        .unwrap();
    assert_eq!(spec.total_dimension(), 0);
    assert_eq!(spec.blocks::<f64>(), vec![SupportedConeT::SecondOrderConeT(0)]);
}

#[test]
fn test_conespec_invalid() {
    let err = ConeSpec::from_mapping([("z", ConeParam::Count(-1))]);
    assert_eq!(
        err,
        Err(ConeSpecError::NegativeDimension {
            key: "z".to_string(),
            value: -1
        })
    );

    let err = ConeSpec::from_mapping([("s", ConeParam::Sizes(vec![3, -2]))]);
    assert!(matches!(err, Err(ConeSpecError::NegativeDimension { .. })));

    let err = ConeSpec::from_mapping([("p", ConeParam::Exponents(vec![0.5, 1.0]))]);
    assert_eq!(err, Err(ConeSpecError::InvalidExponent(1.0)));

    let err = ConeSpec::from_mapping([("p", ConeParam::Exponents(vec![f64::NAN]))]);
    assert!(matches!(err, Err(ConeSpecError::InvalidExponent(_))));

    let err = ConeSpec::from_mapping([("x", ConeParam::Count(1))]);
    assert_eq!(err, Err(ConeSpecError::UnknownKey("x".to_string())));

    let err = ConeSpec::from_mapping([("q", ConeParam::Count(1))]);
    assert!(matches!(err, Err(ConeSpecError::WrongKind { .. })));

    assert!(ConeSpecBuilder::default().p(vec![-1.0]).build().is_err());
}

#[test]
fn test_conespec_dual() {
    // mixed exponential orientations have no blockwise dual
    assert_eq!(_example_spec().dual(), None);

    let spec = ConeSpecBuilder::default()
        .l(3)
        .q(vec![4])
        .ed(2)
        .p(vec![-0.25, 0.5])
        .build()
        .unwrap();
    let dual = spec.dual().unwrap();

    assert_eq!(dual.ep(), 2);
    assert_eq!(dual.ed(), 0);
    assert_eq!(dual.p(), &[0.25, -0.5]);
    assert_eq!(dual.dual(), Some(spec));

    // the dual of a zero power stays distinct from the primal
    let spec = ConeSpecBuilder::default().p(vec![0.0]).build().unwrap();
    assert_eq!(spec.blocks::<f64>(), vec![SupportedConeT::PowerConeT(0.0)]);
    assert_eq!(
        spec.dual().unwrap().blocks::<f64>(),
        vec![SupportedConeT::DualPowerConeT(0.0)]
    );
}

#[cfg(feature = "serde")]
#[test]
fn test_conespec_from_json() {
    let json = r#"{"z":10,"l":15,"q":[5,10,0,1],"s":[3,4,0,0,1,10],
                   "ep":10,"ed":10,"p":[-0.25,0.5,0.75,-0.33]}"#;
    let spec = ConeSpec::from_json(json).unwrap();
    assert_eq!(spec, _example_spec());

    // serialization reads back through the same validation
    let out = serde_json::to_string(&spec).unwrap();
    let spec2: ConeSpec = serde_json::from_str(&out).unwrap();
    assert_eq!(spec, spec2);

    assert!(matches!(
        ConeSpec::from_json(r#"{"l":-3}"#),
        Err(ConeSpecError::NegativeDimension { .. })
    ));
    assert!(matches!(
        ConeSpec::from_json(r#"{"q":"five"}"#),
        Err(ConeSpecError::WrongKind { .. })
    ));
    assert!(matches!(
        ConeSpec::from_json("[1,2]"),
        Err(ConeSpecError::Parse(_))
    ));
}
