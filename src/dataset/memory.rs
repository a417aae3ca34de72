//! In-memory training data.

use crate::dataset::{DatasetError, TrainingSource};
use crate::profile::TrainingRow;

/// Training rows already resident in memory.
///
/// The simplest [`TrainingSource`]: useful in tests and for callers that
/// assemble rows themselves (e.g. from an external fetcher).
#[derive(Clone, Debug)]
pub struct InMemoryDataset {
    rows: Vec<TrainingRow>,
}

impl InMemoryDataset {
    /// Wrap a non-empty set of rows.
    ///
    /// # Errors
    /// Returns [`DatasetError::Empty`] for an empty `rows`.
    pub fn new(rows: Vec<TrainingRow>) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::Empty(
                "InMemoryDataset requires at least one row".to_string(),
            ));
        }
        Ok(Self { rows })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TrainingRow] {
        &self.rows
    }
}

impl TrainingSource for InMemoryDataset {
    fn load(&self) -> Result<Vec<TrainingRow>, DatasetError> {
        Ok(self.rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{Regime, TaxProfile};

    fn sample_row() -> TrainingRow {
        TrainingRow::new(
            TaxProfile {
                income: 500_000.0,
                deduction_80c: 50_000.0,
                deduction_80d: 0.0,
                hra: 0.0,
                age: 30,
                std_deduction: 50_000.0,
                total_deductions: 100_000.0,
            },
            Regime::Old,
        )
    }

    #[test]
    fn test_new_rejects_empty_rows() {
        assert!(matches!(
            InMemoryDataset::new(vec![]),
            Err(DatasetError::Empty(_))
        ));
    }

    #[test]
    fn test_load_returns_rows() {
        let dataset = InMemoryDataset::new(vec![sample_row()]).unwrap();
        assert_eq!(dataset.len(), 1);
        let loaded = dataset.load().unwrap();
        assert_eq!(loaded, vec![sample_row()]);
    }
}
