//! Error types for the ML crate.

use thiserror::Error;

/// Errors that can occur in classifier training and evaluation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MlError {
    /// Predict called before fit.
    #[error("model has not been trained; call fit() first")]
    NotTrained,

    /// Training set is empty.
    #[error("training set is empty")]
    EmptyTrainingSet,

    /// Inputs don't line up.
    #[error("dimension mismatch: {message}")]
    DimensionMismatch {
        /// What went wrong.
        message: String,
    },

    /// A label outside {0, 1}.
    #[error("invalid label {0}: expected 0 (malignant) or 1 (benign)")]
    InvalidLabel(u8),

    /// A metric has no defined value on this input.
    #[error("metric undefined: {0}")]
    UndefinedMetric(String),

    /// Circuit construction failed.
    #[error("circuit error: {0}")]
    Circuit(#[from] eir_ir::IrError),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error persisting results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ML operations.
pub type MlResult<T> = Result<T, MlError>;
