//! Slab-based tax liability under both regimes (FY 2023-24).
//!
//! Pure arithmetic companions to the classifier: where the model *predicts*
//! the better regime from patterns, these functions *compute* the liability
//! exactly, so a caller can show the taxpayer the actual numbers behind the
//! recommendation.

use crate::profile::{Regime, TaxProfile};
use serde::{Deserialize, Serialize};

/// Health and education cess applied on top of base tax.
pub const CESS_RATE: f64 = 0.04;

/// Flat standard deduction.
pub const STANDARD_DEDUCTION: f64 = 50_000.0;

/// Section 80C investment cap.
pub const MAX_80C: f64 = 150_000.0;

/// Section 80D cap for self and family.
pub const MAX_80D_SELF: f64 = 25_000.0;

/// Tax liability split into its components.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// Slab tax before cess.
    pub base_tax: f64,
    /// 4% health and education cess.
    pub cess: f64,
    /// Base tax plus cess.
    pub total_tax: f64,
}

impl TaxBreakdown {
    fn from_base(base_tax: f64) -> Self {
        let cess = base_tax * CESS_RATE;
        Self {
            base_tax,
            cess,
            total_tax: base_tax + cess,
        }
    }
}

/// Old-regime liability on income after deductions.
///
/// Slabs: nil to ₹2.5L, 5% to ₹5L, 20% to ₹10L, 30% above.
pub fn old_regime_tax(taxable_income: f64) -> TaxBreakdown {
    let income = taxable_income.max(0.0);
    let base = if income <= 250_000.0 {
        0.0
    } else if income <= 500_000.0 {
        (income - 250_000.0) * 0.05
    } else if income <= 1_000_000.0 {
        12_500.0 + (income - 500_000.0) * 0.20
    } else {
        112_500.0 + (income - 1_000_000.0) * 0.30
    };
    TaxBreakdown::from_base(base)
}

/// New-regime liability on gross income (no deductions allowed).
///
/// Slabs: nil to ₹3L, then 5%/10%/15%/20% in ₹3L steps, 30% above ₹15L.
pub fn new_regime_tax(income: f64) -> TaxBreakdown {
    let income = income.max(0.0);
    let base = if income <= 300_000.0 {
        0.0
    } else if income <= 600_000.0 {
        (income - 300_000.0) * 0.05
    } else if income <= 900_000.0 {
        15_000.0 + (income - 600_000.0) * 0.10
    } else if income <= 1_200_000.0 {
        45_000.0 + (income - 900_000.0) * 0.15
    } else if income <= 1_500_000.0 {
        90_000.0 + (income - 1_200_000.0) * 0.20
    } else {
        150_000.0 + (income - 1_500_000.0) * 0.30
    };
    TaxBreakdown::from_base(base)
}

/// Outcome of comparing both regimes' computed liability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    /// The regime with the lower total liability.
    pub regime: Regime,
    /// Rupees saved by choosing it over the alternative.
    pub savings: f64,
}

/// Pick the regime with the lower total liability. Ties favor the new
/// regime, which needs no deduction paperwork.
pub fn better_regime(old: &TaxBreakdown, new: &TaxBreakdown) -> RegimeComparison {
    if old.total_tax < new.total_tax {
        RegimeComparison {
            regime: Regime::Old,
            savings: new.total_tax - old.total_tax,
        }
    } else {
        RegimeComparison {
            regime: Regime::New,
            savings: old.total_tax - new.total_tax,
        }
    }
}

/// Personalized saving suggestions for the old regime's deduction headroom.
pub fn saving_tips(profile: &TaxProfile) -> Vec<String> {
    let mut tips = Vec::new();

    if profile.deduction_80c < MAX_80C {
        let remaining = MAX_80C - profile.deduction_80c;
        tips.push(format!(
            "You can invest Rs. {:.0} more under section 80C (PPF, ELSS, NSC, etc.) \
             to maximize your tax benefits.",
            remaining
        ));
    }

    if profile.deduction_80d < MAX_80D_SELF {
        tips.push(
            "Consider buying health insurance for yourself and family \
             (up to Rs. 25,000 deduction under 80D)."
                .to_string(),
        );
    }

    tips.push(
        "Consider investing in NPS (National Pension Scheme) for additional \
         deduction of up to Rs. 50,000 under Section 80CCD(1B)."
            .to_string(),
    );

    if profile.income > 1_000_000.0 {
        tips.push(
            "Consider splitting income with family members (income splitting) \
             to reduce tax burden."
                .to_string(),
        );
    }

    tips
}
