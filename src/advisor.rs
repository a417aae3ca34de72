//! One-shot regime advice: normalize, predict, explain.
//!
//! [`RegimeAdvisor`] wires the normalizer and the classifier together the way
//! a UI session uses them: collect a [`TaxProfile`], call
//! [`advise`](RegimeAdvisor::advise), display the [`RegimeAdvice`]. The
//! advisor owns the fitted model; retraining replaces it wholesale, and only
//! after the new fit succeeds, so a failed retrain leaves the previous model
//! serving.

use crate::dataset::{DatasetError, TrainingSource};
use crate::model::{FittedRegimeTree, RegimeTree, RegimeTreeConfig, TrainingError};
use crate::preprocessing::{FeatureNormalizer, ValidationError};
use crate::profile::{Regime, TaxProfile, TrainingRow};
use std::fmt;

/// Error raised when advice cannot be produced.
#[derive(Debug)]
pub enum AdvisorError {
    /// `advise` was called before any successful training run.
    ModelNotReady,
    /// The queried profile failed validation.
    InvalidProfile(ValidationError),
    /// Training failed; the previous model (if any) is still in place.
    Training(TrainingError),
    /// The training source could not be loaded.
    Dataset(DatasetError),
}

impl fmt::Display for AdvisorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdvisorError::ModelNotReady => {
                write!(f, "No trained model available; call train first")
            }
            AdvisorError::InvalidProfile(err) => write!(f, "Invalid profile: {}", err),
            AdvisorError::Training(err) => write!(f, "Training failed: {}", err),
            AdvisorError::Dataset(err) => write!(f, "Could not load training data: {}", err),
        }
    }
}

impl std::error::Error for AdvisorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdvisorError::ModelNotReady => None,
            AdvisorError::InvalidProfile(err) => Some(err),
            AdvisorError::Training(err) => Some(err),
            AdvisorError::Dataset(err) => Some(err),
        }
    }
}

impl From<ValidationError> for AdvisorError {
    fn from(err: ValidationError) -> Self {
        AdvisorError::InvalidProfile(err)
    }
}

impl From<TrainingError> for AdvisorError {
    fn from(err: TrainingError) -> Self {
        AdvisorError::Training(err)
    }
}

impl From<DatasetError> for AdvisorError {
    fn from(err: DatasetError) -> Self {
        AdvisorError::Dataset(err)
    }
}

/// The recommendation returned to the display layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RegimeAdvice {
    /// Predicted better regime.
    pub regime: Regime,
    /// Leaf class fraction in `[0, 1]`.
    pub confidence: f64,
    /// Natural-language rationale for the prediction.
    pub rationale: String,
}

impl fmt::Display for RegimeAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.1}% confidence): {}",
            self.regime,
            self.confidence * 100.0,
            self.rationale
        )
    }
}

/// Stateful session object pairing a normalizer with an optional fitted tree.
#[derive(Clone, Debug, Default)]
pub struct RegimeAdvisor {
    tree: RegimeTree,
    normalizer: FeatureNormalizer,
    model: Option<FittedRegimeTree>,
}

impl RegimeAdvisor {
    /// An advisor with default tree hyperparameters and no model yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// An advisor with custom tree hyperparameters.
    pub fn with_config(config: RegimeTreeConfig) -> Self {
        Self {
            tree: RegimeTree::with_config(config),
            normalizer: FeatureNormalizer::new(),
            model: None,
        }
    }

    /// Whether a model is in place and `advise` can succeed.
    pub fn is_ready(&self) -> bool {
        self.model.is_some()
    }

    /// The current fitted model, if any.
    pub fn model(&self) -> Option<&FittedRegimeTree> {
        self.model.as_ref()
    }

    /// Train (or retrain) on the given rows.
    ///
    /// The new model is swapped in only after a successful fit; on error the
    /// previous model keeps serving.
    pub fn train(&mut self, rows: &[TrainingRow]) -> Result<(), TrainingError> {
        let fitted = self.tree.fit(rows)?;
        self.model = Some(fitted);
        Ok(())
    }

    /// Load rows from a [`TrainingSource`] and train on them.
    pub fn train_from<S: TrainingSource>(&mut self, source: &S) -> Result<(), AdvisorError> {
        let rows = source.load()?;
        self.train(&rows)?;
        Ok(())
    }

    /// Recommend a regime for the profile.
    ///
    /// # Errors
    /// - [`AdvisorError::ModelNotReady`] before the first successful train.
    /// - [`AdvisorError::InvalidProfile`] if the profile fails validation;
    ///   the classifier is never consulted in that case.
    pub fn advise(&self, profile: &TaxProfile) -> Result<RegimeAdvice, AdvisorError> {
        let model = self.model.as_ref().ok_or(AdvisorError::ModelNotReady)?;
        let features = self.normalizer.normalize(profile)?;
        let (regime, confidence) = model.predict_proba(&features);
        Ok(RegimeAdvice {
            regime,
            confidence,
            rationale: rationale_for(regime, profile),
        })
    }
}

/// Explanation thresholds carried over from the original advisor: ₹1,50,000
/// of deductions marks a "high deduction" profile, ₹50,000 a "low" one.
fn rationale_for(regime: Regime, profile: &TaxProfile) -> String {
    match regime {
        Regime::Old => {
            if profile.total_deductions > 150_000.0 {
                "Your high deduction amount makes the Old Regime more beneficial.".to_string()
            } else {
                "Based on your profile, the Old Regime provides better tax benefits.".to_string()
            }
        }
        Regime::New => {
            if profile.total_deductions < 50_000.0 {
                "With low deductions, the New Regime's reduced tax rates are more beneficial."
                    .to_string()
            } else {
                "Based on your overall profile, the New Regime appears to be more advantageous."
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::InMemoryDataset;

    fn profile(income: f64, ded_80c: f64, ded_80d: f64, hra: f64) -> TaxProfile {
        let std_deduction = 50_000.0;
        TaxProfile {
            income,
            deduction_80c: ded_80c,
            deduction_80d: ded_80d,
            hra,
            age: 30,
            std_deduction,
            total_deductions: ded_80c + ded_80d + hra + std_deduction,
        }
    }

    fn labeled_rows() -> Vec<TrainingRow> {
        vec![
            TrainingRow::new(profile(800_000.0, 150_000.0, 25_000.0, 100_000.0), Regime::Old),
            TrainingRow::new(profile(600_000.0, 100_000.0, 20_000.0, 80_000.0), Regime::Old),
            TrainingRow::new(profile(900_000.0, 0.0, 0.0, 0.0), Regime::New),
            TrainingRow::new(profile(1_500_000.0, 0.0, 0.0, 0.0), Regime::New),
        ]
    }

    #[test]
    fn test_advise_before_train_is_model_not_ready() {
        let advisor = RegimeAdvisor::new();
        assert!(!advisor.is_ready());
        assert!(matches!(
            advisor.advise(&profile(500_000.0, 0.0, 0.0, 0.0)),
            Err(AdvisorError::ModelNotReady)
        ));
    }

    #[test]
    fn test_advise_invalid_profile_never_reaches_model() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train(&labeled_rows()).unwrap();

        let mut bad = profile(500_000.0, 0.0, 0.0, 0.0);
        bad.income = -1.0;
        assert!(matches!(
            advisor.advise(&bad),
            Err(AdvisorError::InvalidProfile(
                ValidationError::NegativeAmount { field: "Income", .. }
            ))
        ));
    }

    #[test]
    fn test_failed_retrain_keeps_previous_model() {
        let mut advisor = RegimeAdvisor::new();
        advisor.train(&labeled_rows()).unwrap();

        let only_old: Vec<TrainingRow> = labeled_rows()
            .into_iter()
            .filter(|r| r.regime == Regime::Old)
            .collect();
        assert!(advisor.train(&only_old).is_err());

        // Still serving the original model.
        assert!(advisor.is_ready());
        let advice = advisor
            .advise(&profile(1_200_000.0, 0.0, 0.0, 0.0))
            .unwrap();
        assert_eq!(advice.regime, Regime::New);
    }

    #[test]
    fn test_train_from_source() {
        let dataset = InMemoryDataset::new(labeled_rows()).unwrap();
        let mut advisor = RegimeAdvisor::new();
        advisor.train_from(&dataset).unwrap();
        assert!(advisor.is_ready());
    }

    #[test]
    fn test_rationale_thresholds() {
        let high = profile(1_000_000.0, 150_000.0, 25_000.0, 0.0);
        assert!(rationale_for(Regime::Old, &high).contains("high deduction"));

        let modest = profile(1_000_000.0, 50_000.0, 0.0, 0.0);
        assert!(rationale_for(Regime::Old, &modest).contains("better tax benefits"));

        let mut lean = profile(1_500_000.0, 0.0, 0.0, 0.0);
        lean.std_deduction = 0.0;
        lean.total_deductions = 0.0;
        assert!(rationale_for(Regime::New, &lean).contains("low deductions"));

        let mixed = profile(1_500_000.0, 20_000.0, 0.0, 0.0);
        assert!(rationale_for(Regime::New, &mixed).contains("more advantageous"));
    }

    #[test]
    fn test_advice_display_formats_percentage() {
        let advice = RegimeAdvice {
            regime: Regime::Old,
            confidence: 0.875,
            rationale: "test".to_string(),
        };
        let rendered = advice.to_string();
        assert!(rendered.contains("Old Regime"));
        assert!(rendered.contains("87.5%"));
    }
}
