use crate::algebra::*;
use derive_builder::Builder;
#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

/// Settings for the iterative cone projections.
///
/// The defaults give a fixed iteration budget and tolerance that are
/// sufficient for exponential and power cone projections in f64.

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProjectionSettings<T: FloatT> {
    ///maximum number of iterations in any scalar root search
    #[builder(default = "200")]
    pub max_iter: u32,

    ///residual tolerance for scalar root searches
    #[builder(default = "(1e-12).as_T()")]
    pub root_tol: T,

    ///relative tolerance for cone membership tests that short circuit a
    ///projection, scaled by the largest absolute entry of the block
    #[builder(default = "(1e-8).as_T()")]
    pub cone_threshold: T,
}

impl<T> Default for ProjectionSettings<T>
where
    T: FloatT,
{
    fn default() -> ProjectionSettings<T> {
        ProjectionSettingsBuilder::<T>::default().build().unwrap()
    }
}

#[derive(Error, Debug)]
/// Error type returned by settings validation
pub enum SettingsError {
    /// An error attributable to one of the fields
    #[error("Bad value for field \"{0}\"")]
    BadFieldValue(&'static str),
}

impl From<SettingsError> for ProjectionSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        ProjectionSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> ProjectionSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(max_iter) = self.max_iter {
            if max_iter == 0 {
                return Err(SettingsError::BadFieldValue("max_iter"));
            }
        }
        if let Some(root_tol) = self.root_tol {
            if !(root_tol > T::zero()) {
                return Err(SettingsError::BadFieldValue("root_tol"));
            }
        }
        if let Some(cone_threshold) = self.cone_threshold {
            if !(cone_threshold >= T::zero()) {
                return Err(SettingsError::BadFieldValue("cone_threshold"));
            }
        }
        Ok(())
    }
}

#[test]
fn test_projection_settings_validate() {
    let settings = ProjectionSettings::<f64>::default();
    assert_eq!(settings.max_iter, 200);
    assert_eq!(settings.root_tol, 1e-12);

    assert!(ProjectionSettingsBuilder::<f64>::default()
        .max_iter(0)
        .build()
        .is_err());
    assert!(ProjectionSettingsBuilder::<f64>::default()
        .root_tol(-1.)
        .build()
        .is_err());
    assert!(ProjectionSettingsBuilder::<f64>::default()
        .cone_threshold(0.)
        .build()
        .is_ok());
}
