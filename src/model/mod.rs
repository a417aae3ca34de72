//! Regime classification models.
//!
//! Follows the fit/inference split used throughout this crate: an unfitted
//! [`RegimeTree`] carries hyperparameters and learns from labeled rows; the
//! resulting [`FittedRegimeTree`] contains only the decision boundaries and
//! is immutable, serializable, and safe to share across sessions.

pub mod decision_tree;

pub use decision_tree::{
    FittedRegimeTree, RegimeTree, RegimeTreeConfig, RegimeTreeParams, TreeNode,
};

use crate::preprocessing::ValidationError;
use crate::profile::Regime;
use std::fmt;

/// Error raised during training or model reconstruction.
#[derive(Debug)]
pub enum TrainingError {
    /// The training set was empty.
    EmptyData,
    /// The training set lacked at least one example of the named label.
    InsufficientData { missing: Regime },
    /// A training row failed feature normalization.
    InvalidRow {
        index: usize,
        source: ValidationError,
    },
    /// A persisted or reconstructed model was structurally invalid.
    InvalidModel(String),
    /// Serialization or deserialization of model parameters failed.
    Serialization(String),
    /// I/O failure while saving or loading a model.
    Io(String),
}

impl fmt::Display for TrainingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainingError::EmptyData => {
                write!(f, "Training set is empty")
            }
            TrainingError::InsufficientData { missing } => {
                write!(
                    f,
                    "Training set has no '{}' examples; both labels are required",
                    missing
                )
            }
            TrainingError::InvalidRow { index, source } => {
                write!(f, "Training row {} is invalid: {}", index, source)
            }
            TrainingError::InvalidModel(msg) => {
                write!(f, "Invalid model: {}", msg)
            }
            TrainingError::Serialization(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            TrainingError::Io(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for TrainingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrainingError::InvalidRow { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrainingError {
    fn from(err: std::io::Error) -> Self {
        TrainingError::Io(err.to_string())
    }
}

impl From<bincode::Error> for TrainingError {
    fn from(err: bincode::Error) -> Self {
        TrainingError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_data_display_names_label() {
        let err = TrainingError::InsufficientData {
            missing: Regime::Old,
        };
        assert!(err.to_string().contains("Old Regime"));
    }

    #[test]
    fn test_invalid_row_carries_source() {
        use std::error::Error;
        let err = TrainingError::InvalidRow {
            index: 3,
            source: ValidationError::MissingField { field: "Income" },
        };
        assert!(err.to_string().contains("row 3"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: TrainingError = io_err.into();
        assert!(matches!(err, TrainingError::Io(_)));
    }
}
