//! Principal component analysis.
//!
//! Covariance-based PCA with a cyclic Jacobi eigensolver. The feature
//! matrices here are small (hundreds of rows, tens of columns), so the
//! dense symmetric solver is more than fast enough.

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Maximum Jacobi sweeps before giving up on convergence.
const MAX_SWEEPS: usize = 100;

/// Off-diagonal magnitude at which the rotation loop stops.
const CONVERGENCE_EPS: f64 = 1e-12;

/// A fitted PCA model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pca {
    /// Principal axes, one row per component (k × d).
    pub components: Array2<f64>,
    /// Fraction of total variance captured by each kept component.
    pub explained_variance_ratio: Vec<f64>,
    /// Per-column means of the training data.
    pub mean: Vec<f64>,
}

impl Pca {
    /// Fit a PCA model keeping `n_components` components.
    pub fn fit(data: &Array2<f64>, n_components: usize) -> DataResult<Self> {
        let (n, d) = data.dim();
        if n == 0 {
            return Err(DataError::EmptyDataset);
        }
        if n_components == 0 || n_components > d {
            return Err(DataError::InvalidComponents {
                requested: n_components,
                available: d,
            });
        }

        // Center the data
        let mean: Vec<f64> = (0..d)
            .map(|c| data.column(c).iter().sum::<f64>() / n as f64)
            .collect();
        let mut centered = data.clone();
        for mut row in centered.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v -= mean[c];
            }
        }

        // Covariance matrix (d × d)
        let denom = if n > 1 { (n - 1) as f64 } else { 1.0 };
        let cov = centered.t().dot(&centered) / denom;

        // Symmetric eigendecomposition
        let (eigenvalues, eigenvectors) = jacobi_eigen(&cov);

        // Sort by eigenvalue, descending; clamp numerical negatives
        let mut order: Vec<usize> = (0..d).collect();
        order.sort_by(|&a, &b| {
            eigenvalues[b]
                .partial_cmp(&eigenvalues[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let total: f64 = eigenvalues.iter().map(|&l| l.max(0.0)).sum();

        let mut components = Array2::zeros((n_components, d));
        let mut explained_variance_ratio = Vec::with_capacity(n_components);
        for (row, &col) in order.iter().take(n_components).enumerate() {
            let mut axis: Vec<f64> = eigenvectors.column(col).to_vec();

            // Deterministic sign: largest-magnitude element is positive
            if let Some(&dominant) = axis
                .iter()
                .max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(std::cmp::Ordering::Equal))
            {
                if dominant < 0.0 {
                    for v in &mut axis {
                        *v = -*v;
                    }
                }
            }

            for (c, &v) in axis.iter().enumerate() {
                components[[row, c]] = v;
            }
            let ratio = if total > 0.0 {
                eigenvalues[col].max(0.0) / total
            } else {
                0.0
            };
            explained_variance_ratio.push(ratio);
        }

        Ok(Self {
            components,
            explained_variance_ratio,
            mean,
        })
    }

    /// Project data onto the principal axes (n × k).
    pub fn transform(&self, data: &Array2<f64>) -> DataResult<Array2<f64>> {
        let d = self.mean.len();
        if data.ncols() != d {
            return Err(DataError::DimensionMismatch {
                message: format!("PCA fitted on {} columns, data has {}", d, data.ncols()),
            });
        }

        let mut centered = data.clone();
        for mut row in centered.rows_mut() {
            for (c, v) in row.iter_mut().enumerate() {
                *v -= self.mean[c];
            }
        }
        Ok(centered.dot(&self.components.t()))
    }

    /// Fit and transform in one step.
    pub fn fit_transform(
        data: &Array2<f64>,
        n_components: usize,
    ) -> DataResult<(Self, Array2<f64>)> {
        let pca = Self::fit(data, n_components)?;
        let transformed = pca.transform(data)?;
        Ok((pca, transformed))
    }

    /// Total variance retained by the kept components.
    pub fn retained_variance(&self) -> f64 {
        self.explained_variance_ratio.iter().sum()
    }
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns (eigenvalues, eigenvector matrix with eigenvectors as columns).
fn jacobi_eigen(matrix: &Array2<f64>) -> (Array1<f64>, Array2<f64>) {
    let d = matrix.nrows();
    let mut a = matrix.clone();
    let mut v: Array2<f64> = Array2::eye(d);

    for _ in 0..MAX_SWEEPS {
        let off_diagonal: f64 = (0..d)
            .flat_map(|i| ((i + 1)..d).map(move |j| (i, j)))
            .map(|(i, j)| a[[i, j]] * a[[i, j]])
            .sum();
        if off_diagonal < CONVERGENCE_EPS {
            break;
        }

        for p in 0..d {
            for q in (p + 1)..d {
                if a[[p, q]].abs() < CONVERGENCE_EPS {
                    continue;
                }

                // Rotation angle zeroing a[p][q]
                let theta = (a[[q, q]] - a[[p, p]]) / (2.0 * a[[p, q]]);
                let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
                let c = 1.0 / (t * t + 1.0).sqrt();
                let s = t * c;

                for k in 0..d {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..d {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..d {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues = Array1::from_iter((0..d).map(|i| a[[i, i]]));
    (eigenvalues, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_pca_line_captures_all_variance() {
        // Points on the line y = 2x: one direction of variance
        let data = array![
            [1.0, 2.0],
            [2.0, 4.0],
            [3.0, 6.0],
            [4.0, 8.0],
            [5.0, 10.0]
        ];
        let pca = Pca::fit(&data, 2).unwrap();

        assert!(pca.explained_variance_ratio[0] > 0.999);
        assert!(pca.explained_variance_ratio[1] < 1e-6);
    }

    #[test]
    fn test_pca_transform_shape() {
        let data = Array2::from_shape_fn((50, 6), |(i, j)| (i * 7 + j * 3) as f64 % 11.0);
        let (pca, reduced) = Pca::fit_transform(&data, 3).unwrap();

        assert_eq!(reduced.dim(), (50, 3));
        assert_eq!(pca.components.dim(), (3, 6));
    }

    #[test]
    fn test_pca_components_orthonormal() {
        let data = Array2::from_shape_fn((40, 5), |(i, j)| ((i + 1) * (j + 2)) as f64 % 7.0);
        let pca = Pca::fit(&data, 5).unwrap();

        for i in 0..5 {
            for j in 0..5 {
                let dot: f64 = (0..5)
                    .map(|k| pca.components[[i, k]] * pca.components[[j, k]])
                    .sum();
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!(
                    (dot - expected).abs() < 1e-8,
                    "components {i},{j} dot = {dot}"
                );
            }
        }
    }

    #[test]
    fn test_pca_too_many_components() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let err = Pca::fit(&data, 3).unwrap_err();
        assert!(matches!(
            err,
            DataError::InvalidComponents {
                requested: 3,
                available: 2
            }
        ));
    }

    #[test]
    fn test_retained_variance_bounded() {
        let data = Array2::from_shape_fn((30, 8), |(i, j)| ((i * j) as f64).sin());
        let pca = Pca::fit(&data, 4).unwrap();
        let retained = pca.retained_variance();
        assert!(retained > 0.0 && retained <= 1.0 + 1e-9);
    }

    #[test]
    fn test_transform_width_mismatch() {
        let data = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.5]];
        let pca = Pca::fit(&data, 1).unwrap();
        let narrow = array![[1.0], [2.0]];
        assert!(matches!(
            pca.transform(&narrow),
            Err(DataError::DimensionMismatch { .. })
        ));
    }
}
