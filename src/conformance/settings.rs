use crate::algebra::*;
use crate::cones::SettingsError;
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Options passed through to the solver under test

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverOptions<T: FloatT> {
    ///verbose printing, including the conformance report
    #[builder(default = "false")]
    pub verbose: bool,

    ///absolute convergence tolerance
    #[builder(default = "(1e-5).as_T()")]
    pub eps_abs: T,

    ///relative convergence tolerance
    #[builder(default = "(1e-5).as_T()")]
    pub eps_rel: T,

    ///infeasibility detection tolerance
    #[builder(default = "(1e-5).as_T()")]
    pub eps_infeas: T,

    ///maximum number of solver iterations
    #[builder(default = "100000")]
    pub max_iter: u32,
}

impl<T> Default for SolverOptions<T>
where
    T: FloatT,
{
    fn default() -> SolverOptions<T> {
        SolverOptionsBuilder::<T>::default().build().unwrap()
    }
}

impl From<SettingsError> for SolverOptionsBuilderError {
    fn from(e: SettingsError) -> Self {
        SolverOptionsBuilderError::ValidationError(e.to_string())
    }
}

impl<T> SolverOptionsBuilder<T>
where
    T: FloatT,
{
    /// check that tolerances are strictly positive
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("eps_abs", self.eps_abs),
            ("eps_rel", self.eps_rel),
            ("eps_infeas", self.eps_infeas),
        ] {
            if let Some(v) = value {
                if !(v > T::zero()) {
                    return Err(SettingsError::BadFieldValue(name));
                }
            }
        }
        Ok(())
    }
}

/// Pass thresholds for conformance checks

#[derive(Builder, Debug, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConformanceTolerances<T: FloatT> {
    ///bound on |c'x - p*|
    #[builder(default = "(1.5e-3).as_T()")]
    pub objective: T,

    ///bound on the norms of the primal and dual residuals
    #[builder(default = "(1e-3).as_T()")]
    pub residual: T,

    ///bound on |s'y|
    #[builder(default = "(1.5e-7).as_T()")]
    pub complementarity: T,

    ///bound on the largest deviation of s or y from its cone projection
    #[builder(default = "(1.5e-4).as_T()")]
    pub membership: T,

    ///certificate rays must satisfy b'y < -margin or c'x < -margin
    #[builder(default = "(0.1).as_T()")]
    pub margin: T,
}

impl<T> Default for ConformanceTolerances<T>
where
    T: FloatT,
{
    fn default() -> ConformanceTolerances<T> {
        ConformanceTolerancesBuilder::<T>::default().build().unwrap()
    }
}

impl From<SettingsError> for ConformanceTolerancesBuilderError {
    fn from(e: SettingsError) -> Self {
        ConformanceTolerancesBuilderError::ValidationError(e.to_string())
    }
}

impl<T> ConformanceTolerancesBuilder<T>
where
    T: FloatT,
{
    /// check that tolerances are nonnegative
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("objective", self.objective),
            ("residual", self.residual),
            ("complementarity", self.complementarity),
            ("membership", self.membership),
            ("margin", self.margin),
        ] {
            if let Some(v) = value {
                if !(v >= T::zero()) {
                    return Err(SettingsError::BadFieldValue(name));
                }
            }
        }
        Ok(())
    }
}

#[test]
fn test_conformance_settings() {
    let tol = ConformanceTolerances::<f64>::default();
    assert_eq!(tol.objective, 1.5e-3);
    assert_eq!(tol.complementarity, 1.5e-7);
    assert_eq!(tol.margin, 0.1);

    let opts = SolverOptions::<f64>::default();
    assert!(!opts.verbose);
    assert_eq!(opts.max_iter, 100000);

    assert!(SolverOptionsBuilder::<f64>::default()
        .eps_abs(0.0)
        .build()
        .is_err());
    assert!(ConformanceTolerancesBuilder::<f64>::default()
        .margin(-1.0)
        .build()
        .is_err());
}
