//! # taxregime-rs
//!
//! A decision-tree advisor that recommends whether the "Old" or "New" Indian
//! income-tax regime is the better choice for a taxpayer, given their income
//! and deduction figures.
//!
//! ## Core Design Principles
//!
//! - **Fit/Inference Separation**: an unfitted [`RegimeTree`] carries
//!   hyperparameters; the [`FittedRegimeTree`] it produces holds only
//!   decision boundaries, is immutable, and serializes cleanly.
//! - **One Feature Order**: training and inference both encode profiles
//!   through [`FeatureNormalizer`], so the 7-component feature order cannot
//!   diverge between the two phases.
//! - **Strong Typing at the Boundary**: taxpayer figures travel as a
//!   [`TaxProfile`], never as loose rows; the text boundary lives in
//!   [`RawTaxForm`].
//! - **Source-Agnostic Training**: anything implementing [`TrainingSource`]
//!   can feed the classifier, from in-memory rows to the seeded
//!   [`SyntheticDataset`].
//!
//! ## Quick Start
//!
//! ```rust
//! use taxregime_rs::{RegimeAdvisor, SyntheticDataset, TaxProfile};
//!
//! let mut advisor = RegimeAdvisor::new();
//! advisor.train_from(&SyntheticDataset::new()).unwrap();
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
//! let advice = advisor.advise(&profile).unwrap();
//! println!("{}", advice);
//! ```
//!
//! ## Module Structure
//!
//! - `profile` — `TaxProfile`, `TrainingRow`, `Regime`, and the raw form boundary
//! - `preprocessing` — feature validation and the fixed-order `FeatureVector`
//! - `model` — decision-tree training and inference
//! - `advisor` — the normalize-predict-explain composition
//! - `dataset` — training-data sources (in-memory, synthetic)
//! - `tax` — exact slab arithmetic for both regimes
//! - `serialization` — byte persistence for fitted-model parameters

/// The normalize-predict-explain session layer.
pub mod advisor;

/// Training-data sources and the loader abstraction.
pub mod dataset;

/// Decision-tree classifier.
pub mod model;

/// Input validation and feature encoding.
pub mod preprocessing;

/// Taxpayer domain records.
pub mod profile;

/// Model parameter persistence.
pub mod serialization;

/// Slab-based liability arithmetic.
pub mod tax;

pub use advisor::{AdvisorError, RegimeAdvice, RegimeAdvisor};
pub use dataset::{DatasetError, InMemoryDataset, SyntheticDataset, TrainingSource};
pub use model::{
    FittedRegimeTree, RegimeTree, RegimeTreeConfig, RegimeTreeParams, TrainingError,
};
pub use preprocessing::{
    FeatureNormalizer, FeatureVector, ValidationError, FEATURE_NAMES, NUM_FEATURES,
};
pub use profile::{RawTaxForm, Regime, TaxProfile, TrainingRow};
pub use tax::{
    better_regime, new_regime_tax, old_regime_tax, saving_tips, RegimeComparison, TaxBreakdown,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(income: f64, ded_80c: f64, ded_80d: f64, hra: f64, age: u32) -> TaxProfile {
        let std_deduction = 50_000.0;
        TaxProfile {
            income,
            deduction_80c: ded_80c,
            deduction_80d: ded_80d,
            hra,
            age,
            std_deduction,
            total_deductions: ded_80c + ded_80d + hra + std_deduction,
        }
    }

    /// High-deduction profiles labeled Old, low-deduction labeled New, with
    /// incomes interleaved across the classes so the tree must separate on
    /// deductions rather than income.
    fn deduction_labeled_rows() -> Vec<TrainingRow> {
        vec![
            TrainingRow::new(profile(800_000.0, 150_000.0, 25_000.0, 100_000.0, 35), Regime::Old),
            TrainingRow::new(profile(1_200_000.0, 150_000.0, 50_000.0, 150_000.0, 42), Regime::Old),
            TrainingRow::new(profile(600_000.0, 100_000.0, 20_000.0, 80_000.0, 29), Regime::Old),
            TrainingRow::new(profile(1_000_000.0, 120_000.0, 25_000.0, 60_000.0, 51), Regime::Old),
            TrainingRow::new(profile(900_000.0, 0.0, 0.0, 0.0, 27), Regime::New),
            TrainingRow::new(profile(1_500_000.0, 0.0, 0.0, 0.0, 33), Regime::New),
            TrainingRow::new(profile(700_000.0, 10_000.0, 0.0, 0.0, 24), Regime::New),
            TrainingRow::new(profile(2_000_000.0, 20_000.0, 0.0, 0.0, 45), Regime::New),
        ]
    }

    #[test]
    fn test_high_deduction_profile_predicts_old() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train(&deduction_labeled_rows()).unwrap();

        // income=10L, 80C=1.5L, 80D=25k, HRA=0, age=30, std=50k, total=2.25L
        let advice = advisor
            .advise(&profile(1_000_000.0, 150_000.0, 25_000.0, 0.0, 30))
            .unwrap();
        assert_eq!(advice.regime, Regime::Old);
        assert!(advice.rationale.contains("Old Regime"));
    }

    #[test]
    fn test_low_deduction_high_income_profile_predicts_new() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train(&deduction_labeled_rows()).unwrap();

        // income=15L, no deductions beyond the standard one
        let advice = advisor
            .advise(&profile(1_500_000.0, 0.0, 0.0, 0.0, 28))
            .unwrap();
        assert_eq!(advice.regime, Regime::New);
    }

    #[test]
    fn test_retraining_replaces_predictions_in_process() {
        // Initial set: label keyed purely on income, boundary near 7L.
        let initial = vec![
            TrainingRow::new(profile(400_000.0, 0.0, 0.0, 0.0, 30), Regime::Old),
            TrainingRow::new(profile(500_000.0, 0.0, 0.0, 0.0, 30), Regime::Old),
            TrainingRow::new(profile(900_000.0, 0.0, 0.0, 0.0, 30), Regime::New),
            TrainingRow::new(profile(1_000_000.0, 0.0, 0.0, 0.0, 30), Regime::New),
        ];

        let mut advisor = RegimeAdvisor::new();
        advisor.train(&initial).unwrap();
        let probe = profile(1_200_000.0, 0.0, 0.0, 0.0, 30);
        assert_eq!(advisor.advise(&probe).unwrap().regime, Regime::New);

        // Expanded set adds higher-income Old examples past the probe.
        let mut expanded = initial;
        expanded.push(TrainingRow::new(
            profile(1_100_000.0, 0.0, 0.0, 0.0, 30),
            Regime::Old,
        ));
        expanded.push(TrainingRow::new(
            profile(1_300_000.0, 0.0, 0.0, 0.0, 30),
            Regime::Old,
        ));

        advisor.train(&expanded).unwrap();
        assert_eq!(advisor.advise(&probe).unwrap().regime, Regime::Old);
    }

    #[test]
    fn test_synthetic_pipeline_end_to_end() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train_from(&SyntheticDataset::new()).unwrap();

        // Deductions at 32.5% of income: comfortably an Old-regime profile
        // under the generator's 12% labeling rule.
        let heavy = advisor
            .advise(&profile(1_000_000.0, 150_000.0, 25_000.0, 100_000.0, 30))
            .unwrap();
        assert_eq!(heavy.regime, Regime::Old);

        // Deductions at 2.4% of income: a New-regime profile.
        let lean = advisor
            .advise(&profile(2_400_000.0, 0.0, 5_000.0, 0.0, 28))
            .unwrap();
        assert_eq!(lean.regime, Regime::New);
    }

    #[test]
    fn test_form_to_advice_flow() {
        let form = RawTaxForm {
            income: Some("1000000".to_string()),
            deduction_80c: Some("150000".to_string()),
            deduction_80d: Some("25000".to_string()),
            hra: Some("0".to_string()),
            age: Some("30".to_string()),
            std_deduction: Some("50000".to_string()),
            total_deductions: Some("225000".to_string()),
        };
        let profile = form.parse().unwrap();

        let mut advisor = RegimeAdvisor::new();
        advisor.train(&deduction_labeled_rows()).unwrap();
        let advice = advisor.advise(&profile).unwrap();
        assert_eq!(advice.regime, Regime::Old);
        assert!(advice.confidence > 0.5);
    }

    #[test]
    fn test_prediction_agrees_with_exact_slab_math_on_clear_cases() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train_from(&SyntheticDataset::new()).unwrap();

        // 8L income with 3.05L deductions: the slab arithmetic strongly
        // favors the old regime, and the model should agree.
        let p = profile(800_000.0, 150_000.0, 25_000.0, 80_000.0, 40);
        let advice = advisor.advise(&p).unwrap();

        let old = old_regime_tax(p.taxable_income_old());
        let new = new_regime_tax(p.income);
        let exact = better_regime(&old, &new);

        assert_eq!(exact.regime, Regime::Old);
        assert_eq!(advice.regime, exact.regime);
    }
}
