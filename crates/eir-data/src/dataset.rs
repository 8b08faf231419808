//! Dataset loading.
//!
//! The reference corpus is the Breast Cancer Wisconsin (Diagnostic)
//! dataset: 569 samples, 30 numeric tumor-cell features, binary diagnosis.
//! Labels follow the source encoding: 0 = malignant, 1 = benign.
//!
//! [`Dataset::from_csv`] reads the standard UCI `wdbc.data` layout
//! (id, diagnosis, 30 features). [`Dataset::synthetic`] generates a
//! statistically similar corpus so the pipeline runs without any
//! external download.

use std::collections::BTreeMap;
use std::path::Path;

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{DataError, DataResult};

/// Number of features in the reference dataset.
pub const NUM_FEATURES: usize = 30;

/// The ten base cell-nucleus measurements; the 30 features are their
/// mean / standard-error / worst-case variants.
const BASE_MEASUREMENTS: [&str; 10] = [
    "radius",
    "texture",
    "perimeter",
    "area",
    "smoothness",
    "compactness",
    "concavity",
    "concave points",
    "symmetry",
    "fractal dimension",
];

/// A loaded tabular dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Feature matrix, one row per sample.
    pub features: Array2<f64>,
    /// Labels: 0 = malignant, 1 = benign.
    pub labels: Vec<u8>,
    /// Feature column names.
    pub feature_names: Vec<String>,
}

impl Dataset {
    /// Names of the 30 reference features.
    pub fn reference_feature_names() -> Vec<String> {
        let mut names = Vec::with_capacity(NUM_FEATURES);
        for prefix in ["mean", "", "worst"] {
            for base in BASE_MEASUREMENTS {
                let name = match prefix {
                    "" => format!("{base} error"),
                    p => format!("{p} {base}"),
                };
                names.push(name);
            }
        }
        names
    }

    /// Number of samples.
    pub fn num_samples(&self) -> usize {
        self.features.nrows()
    }

    /// Number of features.
    pub fn num_features(&self) -> usize {
        self.features.ncols()
    }

    /// Count samples per label.
    pub fn class_counts(&self) -> BTreeMap<u8, usize> {
        let mut counts = BTreeMap::new();
        for &label in &self.labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        counts
    }

    /// Load a dataset from a CSV file in the UCI `wdbc.data` layout:
    /// `id, diagnosis (M/B), 30 numeric features`, with or without a
    /// header row.
    pub fn from_csv(path: impl AsRef<Path>) -> DataResult<Self> {
        let path = path.as_ref();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut rows: Vec<Vec<f64>> = vec![];
        let mut labels: Vec<u8> = vec![];

        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = idx + 1;

            if record.len() < NUM_FEATURES + 2 {
                // Tolerate a header row in first position only
                if idx == 0 {
                    continue;
                }
                return Err(DataError::InvalidRecord {
                    line,
                    message: format!(
                        "expected {} fields, got {}",
                        NUM_FEATURES + 2,
                        record.len()
                    ),
                });
            }

            let diagnosis = record.get(1).unwrap_or_default().trim();
            let label = match diagnosis {
                "M" | "m" => 0u8,
                "B" | "b" => 1u8,
                other => {
                    // A non-M/B second column in the first row is a header
                    if idx == 0 {
                        continue;
                    }
                    return Err(DataError::InvalidRecord {
                        line,
                        message: format!("unknown diagnosis '{other}' (expected M or B)"),
                    });
                }
            };

            let mut row = Vec::with_capacity(NUM_FEATURES);
            for field_idx in 2..(NUM_FEATURES + 2) {
                let raw = record.get(field_idx).unwrap_or_default().trim();
                let value: f64 = raw.parse().map_err(|_| DataError::InvalidRecord {
                    line,
                    message: format!("non-numeric feature value '{raw}'"),
                })?;
                row.push(value);
            }

            rows.push(row);
            labels.push(label);
        }

        if rows.is_empty() {
            return Err(DataError::EmptyDataset);
        }

        let n = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let features = Array2::from_shape_vec((n, NUM_FEATURES), flat).map_err(|e| {
            DataError::DimensionMismatch {
                message: e.to_string(),
            }
        })?;

        tracing::info!(
            "loaded {} samples with {} features from {}",
            n,
            NUM_FEATURES,
            path.display()
        );

        Ok(Self {
            features,
            labels,
            feature_names: Self::reference_feature_names(),
        })
    }

    /// Generate a deterministic synthetic corpus shaped like the reference
    /// dataset.
    ///
    /// Malignant samples are shifted upward in radius, texture, area and
    /// the shape-irregularity measures, matching the published class
    /// statistics closely enough for the pipeline to learn a separation.
    pub fn synthetic(n_samples: usize, seed: u64) -> Self {
        // (benign mean, benign sd, malignant mean, malignant sd) for the
        // base measurements; perimeter and area are derived from radius.
        const BASE_STATS: [(f64, f64, f64, f64); 8] = [
            (12.15, 1.78, 17.46, 3.20),     // radius
            (17.91, 3.99, 21.60, 3.78),     // texture
            (0.0925, 0.0134, 0.1029, 0.0126), // smoothness
            (0.0800, 0.0337, 0.1452, 0.0540), // compactness
            (0.0461, 0.0434, 0.1608, 0.0750), // concavity
            (0.0257, 0.0159, 0.0880, 0.0344), // concave points
            (0.1742, 0.0248, 0.1929, 0.0276), // symmetry
            (0.0629, 0.0068, 0.0627, 0.0075), // fractal dimension
        ];
        // Share of benign samples in the reference dataset (357/569).
        const BENIGN_SHARE: f64 = 0.627;

        let mut rng = StdRng::seed_from_u64(seed);
        let mut rows: Vec<f64> = Vec::with_capacity(n_samples * NUM_FEATURES);
        let mut labels = Vec::with_capacity(n_samples);

        for _ in 0..n_samples {
            let benign = rng.r#gen::<f64>() < BENIGN_SHARE;
            labels.push(u8::from(benign));

            let sample = |rng: &mut StdRng, stats: (f64, f64, f64, f64)| -> f64 {
                let (mean, sd) = if benign {
                    (stats.0, stats.1)
                } else {
                    (stats.2, stats.3)
                };
                (mean + sd * normal(rng)).max(mean * 0.2)
            };

            let radius = sample(&mut rng, BASE_STATS[0]);
            let texture = sample(&mut rng, BASE_STATS[1]);
            let perimeter = radius * 6.55 * (1.0 + 0.02 * normal(&mut rng));
            let area = 3.4 * radius * radius * (1.0 + 0.04 * normal(&mut rng));

            let means = [
                radius,
                texture,
                perimeter,
                area,
                sample(&mut rng, BASE_STATS[2]),
                sample(&mut rng, BASE_STATS[3]),
                sample(&mut rng, BASE_STATS[4]),
                sample(&mut rng, BASE_STATS[5]),
                sample(&mut rng, BASE_STATS[6]),
                sample(&mut rng, BASE_STATS[7]),
            ];

            // mean block
            rows.extend_from_slice(&means);
            // standard-error block: a few percent of the mean
            for &m in &means {
                rows.push((m * (0.03 + 0.015 * normal(&mut rng).abs())).max(0.0));
            }
            // worst block: inflated mean
            for &m in &means {
                rows.push(m * (1.25 + 0.15 * normal(&mut rng).abs()));
            }
        }

        let features = Array2::from_shape_vec((n_samples, NUM_FEATURES), rows)
            .expect("synthetic shape is consistent by construction");

        Self {
            features,
            labels,
            feature_names: Self::reference_feature_names(),
        }
    }
}

/// Standard normal sample via Box-Muller.
fn normal(rng: &mut StdRng) -> f64 {
    let u1: f64 = rng.r#gen::<f64>().max(f64::MIN_POSITIVE);
    let u2: f64 = rng.r#gen();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_reference_feature_names() {
        let names = Dataset::reference_feature_names();
        assert_eq!(names.len(), 30);
        assert_eq!(names[0], "mean radius");
        assert_eq!(names[10], "radius error");
        assert_eq!(names[20], "worst radius");
        assert_eq!(names[29], "worst fractal dimension");
    }

    #[test]
    fn test_synthetic_shape_and_determinism() {
        let a = Dataset::synthetic(100, 42);
        let b = Dataset::synthetic(100, 42);

        assert_eq!(a.num_samples(), 100);
        assert_eq!(a.num_features(), 30);
        assert_eq!(a.features, b.features);
        assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn test_synthetic_has_both_classes() {
        let dataset = Dataset::synthetic(200, 7);
        let counts = dataset.class_counts();
        assert!(counts.get(&0).copied().unwrap_or(0) > 20);
        assert!(counts.get(&1).copied().unwrap_or(0) > 20);
    }

    #[test]
    fn test_synthetic_class_shift() {
        // Mean radius (column 0) should be clearly higher for malignant
        let dataset = Dataset::synthetic(500, 3);
        let mut sums = [0.0f64; 2];
        let mut counts = [0usize; 2];
        for (row, &label) in dataset.features.outer_iter().zip(&dataset.labels) {
            sums[label as usize] += row[0];
            counts[label as usize] += 1;
        }
        let malignant_mean = sums[0] / counts[0] as f64;
        let benign_mean = sums[1] / counts[1] as f64;
        assert!(malignant_mean > benign_mean + 2.0);
    }

    #[test]
    fn test_from_csv_uci_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wdbc.csv");
        let mut file = std::fs::File::create(&path).unwrap();

        let features: Vec<String> = (0..30).map(|i| format!("{}", i as f64 * 0.5)).collect();
        writeln!(file, "842302,M,{}", features.join(",")).unwrap();
        writeln!(file, "842517,B,{}", features.join(",")).unwrap();
        drop(file);

        let dataset = Dataset::from_csv(&path).unwrap();
        assert_eq!(dataset.num_samples(), 2);
        assert_eq!(dataset.labels, vec![0, 1]);
        assert!((dataset.features[[0, 2]] - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_from_csv_skips_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wdbc.csv");
        let mut file = std::fs::File::create(&path).unwrap();

        let header: Vec<String> = (0..32).map(|i| format!("col{i}")).collect();
        writeln!(file, "{}", header.join(",")).unwrap();
        let features: Vec<String> = (0..30).map(|_| "1.0".to_string()).collect();
        writeln!(file, "1,B,{}", features.join(",")).unwrap();
        drop(file);

        let dataset = Dataset::from_csv(&path).unwrap();
        assert_eq!(dataset.num_samples(), 1);
    }

    #[test]
    fn test_from_csv_bad_diagnosis() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wdbc.csv");
        let mut file = std::fs::File::create(&path).unwrap();

        let features: Vec<String> = (0..30).map(|_| "1.0".to_string()).collect();
        writeln!(file, "1,B,{}", features.join(",")).unwrap();
        writeln!(file, "2,X,{}", features.join(",")).unwrap();
        drop(file);

        let err = Dataset::from_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::InvalidRecord { line: 2, .. }));
    }

    #[test]
    fn test_empty_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::File::create(&path).unwrap();

        let err = Dataset::from_csv(&path).unwrap_err();
        assert!(matches!(err, DataError::EmptyDataset));
    }
}
