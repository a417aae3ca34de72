//! Error type for input validation.

use std::fmt;

/// Error raised when a taxpayer's figures cannot be shaped into a feature
/// vector.
///
/// Every variant names the offending field (see [`ValidationError::field`]);
/// the caller is expected to surface a field-specific message and reprompt
/// rather than call the classifier.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    MissingField { field: &'static str },
    /// A field's text could not be parsed as a number.
    NonNumeric { field: &'static str, value: String },
    /// An amount field was negative.
    NegativeAmount { field: &'static str, value: f64 },
    /// An amount field was NaN or infinite.
    NotFinite { field: &'static str },
    /// Age fell outside the plausible `[1, 120]` range.
    AgeOutOfRange { age: u32 },
}

impl ValidationError {
    /// The name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::NonNumeric { field, .. }
            | ValidationError::NegativeAmount { field, .. }
            | ValidationError::NotFinite { field } => field,
            ValidationError::AgeOutOfRange { .. } => "Age",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingField { field } => {
                write!(f, "Field '{}' is missing", field)
            }
            ValidationError::NonNumeric { field, value } => {
                write!(f, "Field '{}' is not numeric: '{}'", field, value)
            }
            ValidationError::NegativeAmount { field, value } => {
                write!(f, "Field '{}' must be non-negative, got {}", field, value)
            }
            ValidationError::NotFinite { field } => {
                write!(f, "Field '{}' must be a finite number", field)
            }
            ValidationError::AgeOutOfRange { age } => {
                write!(f, "Field 'Age' must lie in [1, 120], got {}", age)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
