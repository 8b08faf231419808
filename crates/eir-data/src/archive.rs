//! The dataset split archive.
//!
//! A single JSON document is the interchange format between data
//! preparation and every downstream stage. Its keys are the training and
//! testing feature matrices and label vectors.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// A persisted train/test split of angle-encoded features.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSplit {
    /// Training feature matrix, one row per sample.
    pub x_train: Vec<Vec<f64>>,
    /// Testing feature matrix.
    pub x_test: Vec<Vec<f64>>,
    /// Training labels (0 = malignant, 1 = benign).
    pub y_train: Vec<u8>,
    /// Testing labels.
    pub y_test: Vec<u8>,
    /// Width of the feature rows.
    pub n_features: usize,
    /// Variance retained by the PCA reduction, if one was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retained_variance: Option<f64>,
    /// When the archive was produced.
    pub created_at: DateTime<Utc>,
}

impl DatasetSplit {
    /// Number of training samples.
    pub fn num_train(&self) -> usize {
        self.x_train.len()
    }

    /// Number of testing samples.
    pub fn num_test(&self) -> usize {
        self.x_test.len()
    }

    /// Persist the split to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> DataResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        tracing::info!(
            "saved split ({} train / {} test) to {}",
            self.num_train(),
            self.num_test(),
            path.display()
        );
        Ok(())
    }

    /// Load a split previously produced by the prepare stage.
    ///
    /// A missing file is reported as [`DataError::ArchiveNotFound`] so the
    /// caller can point the user at `eir prepare`.
    pub fn load(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DataError::ArchiveNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let split: Self = serde_json::from_str(&content)?;
        Ok(split)
    }
}
