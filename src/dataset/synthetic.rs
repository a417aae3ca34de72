//! Seeded synthetic training data.
//!
//! Generates taxpayer profiles following typical Indian income-tax patterns:
//! incomes between ₹3L and ₹25L, 80C investments proportional to income and
//! capped at the statutory ₹1,50,000 limit, and the flat ₹50,000 standard
//! deduction. A profile is labeled [`Regime::Old`] when its total deductions
//! exceed 12% of income, a simplification of the real slab arithmetic that
//! is good enough to train the advisory model.
//!
//! The generator is seeded, so a given `(seed, n_samples)` pair always
//! produces the same rows.

use crate::dataset::{DatasetError, TrainingSource};
use crate::profile::{Regime, TaxProfile, TrainingRow};
use crate::tax::STANDARD_DEDUCTION;
use rand::prelude::*;

/// Deductions/income ratio above which the old regime wins the label.
const OLD_REGIME_RATIO: f64 = 0.12;

/// Seeded generator of labeled taxpayer profiles.
#[derive(Clone, Debug)]
pub struct SyntheticDataset {
    n_samples: usize,
    seed: u64,
}

impl Default for SyntheticDataset {
    fn default() -> Self {
        Self {
            n_samples: 100,
            seed: 42,
        }
    }
}

impl SyntheticDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_samples(mut self, n_samples: usize) -> Self {
        self.n_samples = n_samples;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl TrainingSource for SyntheticDataset {
    fn load(&self) -> Result<Vec<TrainingRow>, DatasetError> {
        if self.n_samples == 0 {
            return Err(DatasetError::Empty(
                "SyntheticDataset configured with zero samples".to_string(),
            ));
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut rows = Vec::with_capacity(self.n_samples);

        for _ in 0..self.n_samples {
            let income = rng.random_range(300_000..2_500_000) as f64;
            let deduction_80c = (income * rng.random_range(0.05..0.15)).min(150_000.0);
            let deduction_80d = rng.random_range(0..50_000) as f64;
            let hra = rng.random_range(0..200_000) as f64;
            let age = rng.random_range(22..70);
            let std_deduction = STANDARD_DEDUCTION;
            let total_deductions = deduction_80c + deduction_80d + hra + std_deduction;

            let regime = if total_deductions / income > OLD_REGIME_RATIO {
                Regime::Old
            } else {
                Regime::New
            };

            rows.push(TrainingRow::new(
                TaxProfile {
                    income,
                    deduction_80c,
                    deduction_80d,
                    hra,
                    age,
                    std_deduction,
                    total_deductions,
                },
                regime,
            ));
        }

        Ok(rows)
    }
}
