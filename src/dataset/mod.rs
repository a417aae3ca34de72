//! Training-data sources.
//!
//! The classifier never knows where its rows came from: anything that can
//! produce a `Vec<TrainingRow>` implements [`TrainingSource`], whether the
//! rows live in memory, come from a file, or are generated on the fly. This
//! replaces the original tool's hard dependency on a single spreadsheet.

pub mod memory;
pub mod synthetic;

pub use memory::InMemoryDataset;
pub use synthetic::SyntheticDataset;

use crate::profile::TrainingRow;
use std::fmt;

/// A source of labeled training rows.
pub trait TrainingSource {
    /// Load every row the source holds.
    ///
    /// # Errors
    /// Returns [`DatasetError`] if the underlying storage is unreadable or
    /// holds no rows.
    fn load(&self) -> Result<Vec<TrainingRow>, DatasetError>;
}

/// Error raised while loading training data.
#[derive(Debug)]
pub enum DatasetError {
    /// The source held no rows.
    Empty(String),
    /// The source's contents could not be interpreted as training rows.
    Malformed(String),
    /// I/O failure reading the source.
    Io(String),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Empty(msg) => write!(f, "Empty dataset: {}", msg),
            DatasetError::Malformed(msg) => write!(f, "Malformed dataset: {}", msg),
            DatasetError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        DatasetError::Io(err.to_string())
    }
}
