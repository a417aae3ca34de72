//! Domain records for taxpayer data.
//!
//! The original advisory tool passed taxpayer figures around as loosely typed
//! rows, which made the feature ordering between training and inference an
//! accident of column names. Here the taxpayer is a strongly-typed
//! [`TaxProfile`] and the labeled training unit is a [`TrainingRow`], so the
//! classifier can only ever see fields by name.
//!
//! [`RawTaxForm`] sits at the form boundary: seven optional text fields as a
//! UI would collect them. `parse()` coerces them into a `TaxProfile` or fails
//! with a [`ValidationError`] naming the offending field.

use crate::preprocessing::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two Indian income-tax computation schemes.
///
/// Class indices follow the original dataset's encoding: `New` = 0, `Old` = 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Regime {
    /// The post-2020 regime: lower slab rates, no deductions.
    New,
    /// The pre-2020 regime: higher slab rates, deductions allowed.
    Old,
}

impl Regime {
    /// Numeric class index used by the classifier (`New` = 0, `Old` = 1).
    pub const fn class_index(self) -> usize {
        match self {
            Regime::New => 0,
            Regime::Old => 1,
        }
    }

    /// Inverse of [`Regime::class_index`].
    pub const fn from_class_index(index: usize) -> Option<Regime> {
        match index {
            0 => Some(Regime::New),
            1 => Some(Regime::Old),
            _ => None,
        }
    }

    /// Human-readable regime name, as displayed to the taxpayer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Regime::New => "New Regime",
            Regime::Old => "Old Regime",
        }
    }
}

impl fmt::Display for Regime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A taxpayer's income and deduction figures for one assessment year.
///
/// Amounts are rupees as `f64` and must be non-negative; `age` must lie in
/// `[1, 120]`. Range checks are enforced by
/// [`FeatureNormalizer::normalize`](crate::preprocessing::FeatureNormalizer::normalize),
/// not by construction, so a profile built from trusted figures can skip the
/// text-parsing path entirely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Gross annual income.
    pub income: f64,
    /// Section 80C investments (PPF, ELSS, NSC, ...).
    pub deduction_80c: f64,
    /// Section 80D health-insurance premium.
    pub deduction_80d: f64,
    /// House Rent Allowance exemption.
    pub hra: f64,
    /// Taxpayer age in years.
    pub age: u32,
    /// Standard deduction claimed.
    pub std_deduction: f64,
    /// Sum of all deductions claimed under the old regime.
    pub total_deductions: f64,
}

impl TaxProfile {
    /// Taxable income under the old regime: income less total deductions,
    /// floored at zero.
    pub fn taxable_income_old(&self) -> f64 {
        (self.income - self.total_deductions).max(0.0)
    }
}

/// A labeled training example: a profile plus its known-correct regime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrainingRow {
    pub profile: TaxProfile,
    pub regime: Regime,
}

impl TrainingRow {
    pub fn new(profile: TaxProfile, regime: Regime) -> Self {
        Self { profile, regime }
    }
}

/// Untyped form input: the seven profile fields exactly as a UI collects
/// them, each possibly absent.
#[derive(Clone, Debug, Default)]
pub struct RawTaxForm {
    pub income: Option<String>,
    pub deduction_80c: Option<String>,
    pub deduction_80d: Option<String>,
    pub hra: Option<String>,
    pub age: Option<String>,
    pub std_deduction: Option<String>,
    pub total_deductions: Option<String>,
}

impl RawTaxForm {
    /// Coerce the form fields into a [`TaxProfile`].
    ///
    /// Grouping separators ("1,50,000") are accepted in amount fields. A
    /// missing, blank, or non-numeric field fails with a [`ValidationError`]
    /// naming that field; range checks (non-negativity, age bounds) are left
    /// to the normalizer.
    pub fn parse(&self) -> Result<TaxProfile, ValidationError> {
        Ok(TaxProfile {
            income: parse_amount("Income", &self.income)?,
            deduction_80c: parse_amount("80C_Investments", &self.deduction_80c)?,
            deduction_80d: parse_amount("Health_Insurance", &self.deduction_80d)?,
            hra: parse_amount("HRA", &self.hra)?,
            age: parse_age("Age", &self.age)?,
            std_deduction: parse_amount("Std_Deduction", &self.std_deduction)?,
            total_deductions: parse_amount("Total_Deductions", &self.total_deductions)?,
        })
    }
}

fn present<'a>(
    field: &'static str,
    raw: &'a Option<String>,
) -> Result<&'a str, ValidationError> {
    raw.as_deref()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .ok_or(ValidationError::MissingField { field })
}

fn parse_amount(field: &'static str, raw: &Option<String>) -> Result<f64, ValidationError> {
    let text = present(field, raw)?;
    text.replace(',', "")
        .parse::<f64>()
        .map_err(|_| ValidationError::NonNumeric {
            field,
            value: text.to_string(),
        })
}

fn parse_age(field: &'static str, raw: &Option<String>) -> Result<u32, ValidationError> {
    let text = present(field, raw)?;
    text.parse::<u32>().map_err(|_| ValidationError::NonNumeric {
        field,
        value: text.to_string(),
    })
}
