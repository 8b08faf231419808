//! The end-to-end prepare stage.
//!
//! Standardize → PCA → angle scaling → stratified split, in the same
//! order the classifier expects its inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::archive::DatasetSplit;
use crate::dataset::Dataset;
use crate::error::DataResult;
use crate::pca::Pca;
use crate::scale::{AngleScaler, StandardScaler};
use crate::split::stratified_split;

/// Configuration for the prepare stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Number of PCA components to keep (qubit count downstream).
    pub n_components: usize,
    /// Fraction of samples held out for testing.
    pub test_size: f64,
    /// Seed for the stratified split.
    pub seed: u64,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            n_components: 8,
            test_size: 0.2,
            seed: 42,
        }
    }
}

/// Summary of a prepare run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepareReport {
    /// Total samples processed.
    pub n_samples: usize,
    /// Feature count before reduction.
    pub n_features_original: usize,
    /// Components kept by PCA.
    pub n_components: usize,
    /// Variance retained by the kept components.
    pub retained_variance: f64,
    /// Samples per class label.
    pub class_counts: BTreeMap<u8, usize>,
    /// Training set size.
    pub n_train: usize,
    /// Testing set size.
    pub n_test: usize,
}

/// Run the full preparation pipeline over a dataset.
pub fn prepare(dataset: &Dataset, config: &PrepareConfig) -> DataResult<(DatasetSplit, PrepareReport)> {
    tracing::info!(
        "preparing {} samples × {} features",
        dataset.num_samples(),
        dataset.num_features()
    );

    let (_, standardized) = StandardScaler::fit_transform(&dataset.features)?;

    let (pca, reduced) = Pca::fit_transform(&standardized, config.n_components)?;
    let retained = pca.retained_variance();
    tracing::info!(
        "reduced to {} components, retained variance {:.3}",
        config.n_components,
        retained
    );

    let (_, angles) = AngleScaler::fit_transform(&reduced)?;

    let mut split = stratified_split(&angles, &dataset.labels, config.test_size, config.seed)?;
    split.retained_variance = Some(retained);

    let report = PrepareReport {
        n_samples: dataset.num_samples(),
        n_features_original: dataset.num_features(),
        n_components: config.n_components,
        retained_variance: retained,
        class_counts: dataset.class_counts(),
        n_train: split.num_train(),
        n_test: split.num_test(),
    };

    tracing::info!(
        "split: {} training / {} testing samples",
        report.n_train,
        report.n_test
    );

    Ok((split, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::AngleScaler;

    #[test]
    fn test_prepare_end_to_end() {
        let dataset = Dataset::synthetic(200, 42);
        let (split, report) = prepare(&dataset, &PrepareConfig::default()).unwrap();

        assert_eq!(report.n_samples, 200);
        assert_eq!(report.n_features_original, 30);
        assert_eq!(report.n_components, 8);
        assert_eq!(split.n_features, 8);
        assert_eq!(split.num_train() + split.num_test(), 200);
        assert!(report.retained_variance > 0.5);

        // All features are rotation angles
        for row in split.x_train.iter().chain(&split.x_test) {
            assert_eq!(row.len(), 8);
            for &v in row {
                assert!((0.0..=AngleScaler::RANGE_MAX + 1e-9).contains(&v));
            }
        }
    }

    #[test]
    fn test_prepare_respects_component_count() {
        let dataset = Dataset::synthetic(100, 1);
        let config = PrepareConfig {
            n_components: 4,
            ..PrepareConfig::default()
        };
        let (split, report) = prepare(&dataset, &config).unwrap();
        assert_eq!(split.n_features, 4);
        assert_eq!(report.n_components, 4);
    }

    #[test]
    fn test_prepare_too_many_components() {
        let dataset = Dataset::synthetic(50, 1);
        let config = PrepareConfig {
            n_components: 64,
            ..PrepareConfig::default()
        };
        assert!(prepare(&dataset, &config).is_err());
    }
}
