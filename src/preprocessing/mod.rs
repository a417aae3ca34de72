//! Feature normalization for regime classification.
//!
//! The one correctness-critical contract in this crate lives here: the
//! classifier sees taxpayer data only as a [`FeatureVector`], a fixed-order
//! encoding of a [`TaxProfile`]. Both training and inference obtain their
//! vectors through [`FeatureNormalizer::normalize`], so the feature order
//! cannot diverge between the two phases.
//!
//! The fixed order is:
//!
//! ```text
//! [Income, 80C_Investments, Health_Insurance, HRA, Age, Std_Deduction, Total_Deductions]
//! ```
//!
//! # Example
//! ```
//! use taxregime_rs::preprocessing::{FeatureNormalizer, NUM_FEATURES};
//! use taxregime_rs::profile::TaxProfile;
//!
//! let profile = TaxProfile {
//!     income: 1_000_000.0,
//!     deduction_80c: 150_000.0,
//!     deduction_80d: 25_000.0,
//!     hra: 0.0,
//!     age: 30,
//!     std_deduction: 50_000.0,
//!     total_deductions: 225_000.0,
//! };
//!
//! let features = FeatureNormalizer::new().normalize(&profile).unwrap();
//! assert_eq!(features.as_slice().len(), NUM_FEATURES);
//! assert_eq!(features[0], 1_000_000.0); // Income comes first
//! ```

pub mod error;

pub use error::ValidationError;

use crate::profile::TaxProfile;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Width of every feature vector.
pub const NUM_FEATURES: usize = 7;

/// Feature names, in vector order.
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "Income",
    "80C_Investments",
    "Health_Insurance",
    "HRA",
    "Age",
    "Std_Deduction",
    "Total_Deductions",
];

/// Oldest age accepted by the normalizer.
pub const MAX_AGE: u32 = 120;

/// Fixed-order numeric encoding of a [`TaxProfile`].
///
/// Construction goes through [`FeatureNormalizer::normalize`] only, so a
/// value of this type is always 7 wide, finite, and in the documented order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    /// The components as a fixed-size array.
    pub fn as_array(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }

    /// The components as a slice, in the documented order.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl Index<usize> for FeatureVector {
    type Output = f64;

    fn index(&self, feature: usize) -> &f64 {
        &self.0[feature]
    }
}

/// Validates a [`TaxProfile`] and shapes it into a [`FeatureVector`].
///
/// Stateless and pure: nothing is learned from data, so there is no fitted
/// counterpart.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureNormalizer;

impl FeatureNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Validate `profile` and produce its feature vector.
    ///
    /// # Errors
    /// Returns [`ValidationError`] naming the offending field if any amount
    /// is negative or non-finite, or if `age` falls outside `[1, 120]`.
    pub fn normalize(&self, profile: &TaxProfile) -> Result<FeatureVector, ValidationError> {
        let income = check_amount("Income", profile.income)?;
        let deduction_80c = check_amount("80C_Investments", profile.deduction_80c)?;
        let deduction_80d = check_amount("Health_Insurance", profile.deduction_80d)?;
        let hra = check_amount("HRA", profile.hra)?;
        let std_deduction = check_amount("Std_Deduction", profile.std_deduction)?;
        let total_deductions = check_amount("Total_Deductions", profile.total_deductions)?;

        if profile.age < 1 || profile.age > MAX_AGE {
            return Err(ValidationError::AgeOutOfRange { age: profile.age });
        }

        Ok(FeatureVector([
            income,
            deduction_80c,
            deduction_80d,
            hra,
            f64::from(profile.age),
            std_deduction,
            total_deductions,
        ]))
    }
}

fn check_amount(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_profile() -> TaxProfile {
        TaxProfile {
            income: 1_000_000.0,
            deduction_80c: 150_000.0,
            deduction_80d: 25_000.0,
            hra: 0.0,
            age: 30,
            std_deduction: 50_000.0,
            total_deductions: 225_000.0,
        }
    }

    #[test]
    fn test_normalize_valid_profile_has_seven_components_in_order() {
        let features = FeatureNormalizer::new().normalize(&valid_profile()).unwrap();
        assert_eq!(
            features.as_slice(),
            &[1_000_000.0, 150_000.0, 25_000.0, 0.0, 30.0, 50_000.0, 225_000.0]
        );
    }

    #[test]
    fn test_normalize_is_pure() {
        let normalizer = FeatureNormalizer::new();
        let profile = valid_profile();
        assert_eq!(
            normalizer.normalize(&profile).unwrap(),
            normalizer.normalize(&profile).unwrap()
        );
    }

    #[test]
    fn test_normalize_rejects_negative_amount() {
        let mut profile = valid_profile();
        profile.hra = -10.0;
        let err = FeatureNormalizer::new().normalize(&profile).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NegativeAmount { field: "HRA", .. }
        ));
    }

    #[test]
    fn test_normalize_rejects_non_finite_amount() {
        let mut profile = valid_profile();
        profile.income = f64::NAN;
        let err = FeatureNormalizer::new().normalize(&profile).unwrap_err();
        assert!(matches!(err, ValidationError::NotFinite { field: "Income" }));
    }

    #[test]
    fn test_normalize_rejects_age_out_of_range() {
        let mut profile = valid_profile();
        profile.age = 0;
        assert!(matches!(
            FeatureNormalizer::new().normalize(&profile),
            Err(ValidationError::AgeOutOfRange { age: 0 })
        ));

        profile.age = 121;
        assert!(matches!(
            FeatureNormalizer::new().normalize(&profile),
            Err(ValidationError::AgeOutOfRange { age: 121 })
        ));
    }

    #[test]
    fn test_normalize_accepts_age_bounds() {
        let mut profile = valid_profile();
        for age in [1, MAX_AGE] {
            profile.age = age;
            let features = FeatureNormalizer::new().normalize(&profile).unwrap();
            assert_eq!(features[4], f64::from(age));
        }
    }

    #[test]
    fn test_feature_names_match_vector_width() {
        assert_eq!(FEATURE_NAMES.len(), NUM_FEATURES);
    }
}
