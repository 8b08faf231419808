//! Classical RBF-kernel SVM baseline.
//!
//! A compact sequential minimal optimization (SMO) loop in its simplified
//! form: working pairs are a KKT violator plus a random partner. That is
//! enough to separate this dataset and keeps the baseline self-contained;
//! a production system would use a dedicated SVM library.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{MlError, MlResult};

/// Configuration for the SVM baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvmConfig {
    /// Regularization strength.
    pub c: f64,
    /// Kernel width; `None` uses the scale heuristic
    /// `1 / (n_features · var(X))`.
    pub gamma: Option<f64>,
    /// KKT violation tolerance.
    pub tol: f64,
    /// Consecutive sweeps without updates before stopping.
    pub max_passes: usize,
    /// Hard cap on total sweeps.
    pub max_sweeps: usize,
    /// Seed for working-pair selection.
    pub seed: u64,
}

impl Default for SvmConfig {
    fn default() -> Self {
        Self {
            c: 1.0,
            gamma: None,
            tol: 1e-3,
            max_passes: 5,
            max_sweeps: 200,
            seed: 42,
        }
    }
}

/// An RBF-kernel support vector machine.
#[derive(Debug, Clone)]
pub struct RbfSvm {
    config: SvmConfig,
    /// Training samples (kept for kernel evaluation at predict time).
    support_x: Vec<Vec<f64>>,
    /// Training targets in ±1 form.
    support_y: Vec<f64>,
    /// Lagrange multipliers.
    alphas: Vec<f64>,
    /// Bias term.
    bias: f64,
    /// Resolved kernel width.
    gamma: f64,
    trained: bool,
}

impl RbfSvm {
    /// Create an untrained SVM.
    pub fn new(config: SvmConfig) -> Self {
        Self {
            config,
            support_x: vec![],
            support_y: vec![],
            alphas: vec![],
            bias: 0.0,
            gamma: 1.0,
            trained: false,
        }
    }

    /// Resolved kernel width (after fit).
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Number of support vectors (non-zero multipliers).
    pub fn num_support_vectors(&self) -> usize {
        self.alphas.iter().filter(|&&a| a > 1e-8).count()
    }

    fn rbf(&self, a: &[f64], b: &[f64]) -> f64 {
        let dist_sq: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        (-self.gamma * dist_sq).exp()
    }

    fn resolve_gamma(config: &SvmConfig, samples: &[Vec<f64>]) -> f64 {
        if let Some(gamma) = config.gamma {
            return gamma;
        }
        let d = samples[0].len();
        let n = samples.len();
        let total = (n * d) as f64;
        let mean: f64 = samples.iter().flatten().sum::<f64>() / total;
        let var: f64 = samples
            .iter()
            .flatten()
            .map(|&v| (v - mean) * (v - mean))
            .sum::<f64>()
            / total;
        if var > 0.0 { 1.0 / (d as f64 * var) } else { 1.0 }
    }

    /// Train with simplified SMO.
    pub fn fit(&mut self, samples: &[Vec<f64>], labels: &[u8]) -> MlResult<()> {
        if samples.is_empty() {
            return Err(MlError::EmptyTrainingSet);
        }
        if samples.len() < 2 {
            return Err(MlError::DimensionMismatch {
                message: "SMO needs at least 2 training samples".to_string(),
            });
        }
        if samples.len() != labels.len() {
            return Err(MlError::DimensionMismatch {
                message: format!("{} samples but {} labels", samples.len(), labels.len()),
            });
        }
        let width = samples[0].len();
        if samples.iter().any(|row| row.len() != width) {
            return Err(MlError::DimensionMismatch {
                message: "ragged sample matrix".to_string(),
            });
        }
        if let Some(&bad) = labels.iter().find(|&&l| l > 1) {
            return Err(MlError::InvalidLabel(bad));
        }

        let n = samples.len();
        self.gamma = Self::resolve_gamma(&self.config, samples);
        let y: Vec<f64> = labels.iter().map(|&l| if l == 1 { 1.0 } else { -1.0 }).collect();
        let mut alphas = vec![0.0f64; n];
        let mut bias = 0.0f64;

        // Precomputed kernel matrix; the corpus is small
        let mut kernel = vec![vec![0.0; n]; n];
        for i in 0..n {
            for j in i..n {
                let k = self.rbf(&samples[i], &samples[j]);
                kernel[i][j] = k;
                kernel[j][i] = k;
            }
        }

        let c = self.config.c;
        let tol = self.config.tol;
        let mut rng = StdRng::seed_from_u64(self.config.seed);

        let decision = |alphas: &[f64], bias: f64, i: usize| -> f64 {
            let mut f = bias;
            for j in 0..n {
                if alphas[j] > 0.0 {
                    f += alphas[j] * y[j] * kernel[i][j];
                }
            }
            f
        };

        let mut passes = 0usize;
        let mut sweeps = 0usize;
        while passes < self.config.max_passes && sweeps < self.config.max_sweeps {
            sweeps += 1;
            let mut num_changed = 0usize;

            for i in 0..n {
                let y_i = y[i];
                let e_i = decision(&alphas, bias, i) - y_i;

                let violates = (y_i * e_i < -tol && alphas[i] < c)
                    || (y_i * e_i > tol && alphas[i] > 0.0);
                if !violates {
                    continue;
                }

                // Random partner distinct from i
                let mut j = rng.gen_range(0..n - 1);
                if j >= i {
                    j += 1;
                }
                let y_j = y[j];
                let e_j = decision(&alphas, bias, j) - y_j;

                let alpha_i_old = alphas[i];
                let alpha_j_old = alphas[j];

                let (low, high) = if (y_i - y_j).abs() > f64::EPSILON {
                    let diff = alpha_j_old - alpha_i_old;
                    (diff.max(0.0), (c + diff).min(c))
                } else {
                    let sum = alpha_i_old + alpha_j_old;
                    ((sum - c).max(0.0), sum.min(c))
                };
                if (high - low).abs() < f64::EPSILON {
                    continue;
                }

                let eta = 2.0 * kernel[i][j] - kernel[i][i] - kernel[j][j];
                if eta >= 0.0 {
                    continue;
                }

                let mut alpha_j = alpha_j_old - y_j * (e_i - e_j) / eta;
                alpha_j = alpha_j.clamp(low, high);
                if (alpha_j - alpha_j_old).abs() < 1e-5 {
                    continue;
                }

                let alpha_i = alpha_i_old + y_i * y_j * (alpha_j_old - alpha_j);

                let b1 = bias
                    - e_i
                    - y_i * (alpha_i - alpha_i_old) * kernel[i][i]
                    - y_j * (alpha_j - alpha_j_old) * kernel[i][j];
                let b2 = bias
                    - e_j
                    - y_i * (alpha_i - alpha_i_old) * kernel[i][j]
                    - y_j * (alpha_j - alpha_j_old) * kernel[j][j];

                bias = if alpha_i > 0.0 && alpha_i < c {
                    b1
                } else if alpha_j > 0.0 && alpha_j < c {
                    b2
                } else {
                    (b1 + b2) / 2.0
                };

                alphas[i] = alpha_i;
                alphas[j] = alpha_j;
                num_changed += 1;
            }

            if num_changed == 0 {
                passes += 1;
            } else {
                passes = 0;
            }
        }

        self.support_x = samples.to_vec();
        self.support_y = y;
        self.alphas = alphas;
        self.bias = bias;

        tracing::info!(
            "SVM trained: {} support vectors of {} samples, {} sweeps",
            self.num_support_vectors(),
            n,
            sweeps
        );

        self.trained = true;
        Ok(())
    }

    /// Signed decision value for one sample.
    pub fn decision_function(&self, sample: &[f64]) -> MlResult<f64> {
        if !self.trained {
            return Err(MlError::NotTrained);
        }
        if sample.len() != self.support_x[0].len() {
            return Err(MlError::DimensionMismatch {
                message: format!(
                    "model trained on {} features, sample has {}",
                    self.support_x[0].len(),
                    sample.len()
                ),
            });
        }

        let mut f = self.bias;
        for ((alpha, y), sv) in self
            .alphas
            .iter()
            .zip(&self.support_y)
            .zip(&self.support_x)
        {
            if *alpha > 1e-8 {
                f += alpha * y * self.rbf(sv, sample);
            }
        }
        Ok(f)
    }

    /// Predicted labels for a batch of samples.
    pub fn predict(&self, samples: &[Vec<f64>]) -> MlResult<Vec<u8>> {
        samples
            .iter()
            .map(|s| Ok(u8::from(self.decision_function(s)? > 0.0)))
            .collect()
    }
}
