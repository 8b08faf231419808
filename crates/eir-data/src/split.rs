//! Stratified train/test splitting.

use chrono::Utc;
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

use crate::archive::DatasetSplit;
use crate::error::{DataError, DataResult};

/// Split features and labels into train/test sets, preserving the class
/// proportions to within one sample. Deterministic for a fixed seed.
pub fn stratified_split(
    features: &Array2<f64>,
    labels: &[u8],
    test_size: f64,
    seed: u64,
) -> DataResult<DatasetSplit> {
    if !(0.0..1.0).contains(&test_size) || test_size == 0.0 {
        return Err(DataError::InvalidTestSize(test_size));
    }
    if features.nrows() != labels.len() {
        return Err(DataError::DimensionMismatch {
            message: format!(
                "{} feature rows but {} labels",
                features.nrows(),
                labels.len()
            ),
        });
    }
    if labels.is_empty() {
        return Err(DataError::EmptyDataset);
    }

    // Group sample indices by class
    let mut by_class: BTreeMap<u8, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train_indices = vec![];
    let mut test_indices = vec![];

    for (&label, indices) in &mut by_class {
        if indices.len() < 2 {
            return Err(DataError::ClassTooSmall {
                label,
                count: indices.len(),
            });
        }
        indices.shuffle(&mut rng);

        // At least one sample on each side of the split
        let n_test = ((indices.len() as f64 * test_size).round() as usize)
            .clamp(1, indices.len() - 1);

        test_indices.extend_from_slice(&indices[..n_test]);
        train_indices.extend_from_slice(&indices[n_test..]);
    }

    // Interleave classes
    train_indices.shuffle(&mut rng);
    test_indices.shuffle(&mut rng);

    let take = |indices: &[usize]| -> (Vec<Vec<f64>>, Vec<u8>) {
        let rows = indices
            .iter()
            .map(|&i| features.row(i).to_vec())
            .collect();
        let y = indices.iter().map(|&i| labels[i]).collect();
        (rows, y)
    };

    let (x_train, y_train) = take(&train_indices);
    let (x_test, y_test) = take(&test_indices);

    Ok(DatasetSplit {
        n_features: features.ncols(),
        x_train,
        x_test,
        y_train,
        y_test,
        retained_variance: None,
        created_at: Utc::now(),
    })
}
