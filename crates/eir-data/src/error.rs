//! Error types for the data crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in data preparation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DataError {
    /// I/O error reading a dataset or archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The dataset archive has not been produced yet.
    #[error("archive not found at {path}; run 'eir prepare' first")]
    ArchiveNotFound {
        /// The path that was probed.
        path: PathBuf,
    },

    /// Dataset has no rows.
    #[error("dataset is empty")]
    EmptyDataset,

    /// A CSV field could not be interpreted.
    #[error("invalid dataset record at line {line}: {message}")]
    InvalidRecord {
        /// 1-based record number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// More PCA components requested than features available.
    #[error("requested {requested} PCA components but only {available} features are available")]
    InvalidComponents {
        /// Requested component count.
        requested: usize,
        /// Available feature count.
        available: usize,
    },

    /// Test fraction outside (0, 1).
    #[error("test size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),

    /// Matrix dimensions don't line up.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch {
        /// What went wrong.
        message: String,
    },

    /// A class is too small to split.
    #[error("class {label} has only {count} samples, too few for a stratified split")]
    ClassTooSmall {
        /// The class label.
        label: u8,
        /// Number of samples observed.
        count: usize,
    },
}

/// Result type for data operations.
pub type DataResult<T> = Result<T, DataError>;
