//! Variational quantum classifier.
//!
//! Each sample is encoded by a ZZ feature map and processed by a
//! hardware-efficient ansatz; the class-1 probability is read out as the
//! total probability of odd-parity basis states. Training minimizes
//! cross-entropy over the training set with a derivative-free optimizer.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use eir_adapter_sim::Statevector;
use eir_ir::{Entanglement, efficient_su2, num_su2_parameters, zz_feature_map};

use crate::error::{MlError, MlResult};
use crate::optimizer::{Cobyla, Optimizer};

/// Floor for probabilities inside the log-loss.
const PROB_EPS: f64 = 1e-10;

/// Configuration of the quantum classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VqcConfig {
    /// Number of qubits (must equal the sample width).
    pub num_qubits: usize,
    /// Feature map repetitions.
    pub feature_map_reps: usize,
    /// Ansatz repetitions.
    pub ansatz_reps: usize,
    /// Maximum optimizer iterations.
    pub maxiter: usize,
    /// Seed for the initial parameter draw.
    pub seed: u64,
}

impl VqcConfig {
    /// Defaults matching the reference pipeline: 2 feature-map reps with
    /// full entanglement, 2 ansatz reps with linear entanglement, 100
    /// optimizer iterations.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            feature_map_reps: 2,
            ansatz_reps: 2,
            maxiter: 100,
            seed: 42,
        }
    }
}

/// Entanglement used by the feature map.
const FEATURE_MAP_ENTANGLEMENT: Entanglement = Entanglement::Full;
/// Entanglement used by the ansatz.
const ANSATZ_ENTANGLEMENT: Entanglement = Entanglement::Linear;

/// Summary of a training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSummary {
    /// Final training loss.
    pub optimal_loss: f64,
    /// Accepted optimizer improvements.
    pub iterations: usize,
    /// Circuit evaluations (simulated executions) performed.
    pub circuit_evaluations: usize,
    /// Whether the optimizer converged before its iteration budget.
    pub converged: bool,
    /// Best-loss history over the run.
    pub loss_history: Vec<f64>,
}

/// A variational quantum classifier.
#[derive(Debug, Clone)]
pub struct VqcClassifier {
    config: VqcConfig,
    weights: Option<Vec<f64>>,
}

impl VqcClassifier {
    /// Create an untrained classifier.
    pub fn new(config: VqcConfig) -> Self {
        Self {
            config,
            weights: None,
        }
    }

    /// The classifier configuration.
    pub fn config(&self) -> &VqcConfig {
        &self.config
    }

    /// Number of trainable ansatz parameters.
    pub fn num_parameters(&self) -> usize {
        num_su2_parameters(self.config.num_qubits, self.config.ansatz_reps)
    }

    /// Trained weights, if fit has run.
    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    /// Class-1 probability for one sample under the given weights.
    fn class_probability(&self, sample: &[f64], weights: &[f64]) -> MlResult<f64> {
        let n = self.config.num_qubits;
        let encoder = zz_feature_map(sample, self.config.feature_map_reps, FEATURE_MAP_ENTANGLEMENT)?;
        let ansatz = efficient_su2(n, self.config.ansatz_reps, ANSATZ_ENTANGLEMENT, weights)?;

        let mut sv = Statevector::new(n);
        for inst in encoder.instructions() {
            sv.apply(inst);
        }
        for inst in ansatz.instructions() {
            sv.apply(inst);
        }

        // Parity readout: odd-parity basis states vote for class 1
        let p1 = sv
            .probabilities()
            .iter()
            .enumerate()
            .filter(|(idx, _)| idx.count_ones() % 2 == 1)
            .map(|(_, p)| p)
            .sum();
        Ok(p1)
    }

    fn validate_inputs(&self, samples: &[Vec<f64>], labels: Option<&[u8]>) -> MlResult<()> {
        if samples.is_empty() {
            return Err(MlError::EmptyTrainingSet);
        }
        for row in samples {
            if row.len() != self.config.num_qubits {
                return Err(MlError::DimensionMismatch {
                    message: format!(
                        "classifier configured for {} features, sample has {}",
                        self.config.num_qubits,
                        row.len()
                    ),
                });
            }
        }
        if let Some(labels) = labels {
            if labels.len() != samples.len() {
                return Err(MlError::DimensionMismatch {
                    message: format!("{} samples but {} labels", samples.len(), labels.len()),
                });
            }
            if let Some(&bad) = labels.iter().find(|&&l| l > 1) {
                return Err(MlError::InvalidLabel(bad));
            }
        }
        Ok(())
    }

    /// Train the classifier.
    pub fn fit(&mut self, samples: &[Vec<f64>], labels: &[u8]) -> MlResult<TrainSummary> {
        self.validate_inputs(samples, Some(labels))?;

        let num_params = self.num_parameters();
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        let initial: Vec<f64> = (0..num_params)
            .map(|_| (rng.r#gen::<f64>() - 0.5) * std::f64::consts::PI)
            .collect();

        tracing::info!(
            "training VQC: {} qubits, {} parameters, {} samples",
            self.config.num_qubits,
            num_params,
            samples.len()
        );

        let mut circuit_evaluations = 0usize;
        let mut failed: Option<MlError> = None;
        let objective = |weights: &[f64]| -> f64 {
            let mut loss = 0.0;
            for (sample, &label) in samples.iter().zip(labels) {
                circuit_evaluations += 1;
                let p1 = match self.class_probability(sample, weights) {
                    Ok(p) => p.clamp(PROB_EPS, 1.0 - PROB_EPS),
                    Err(e) => {
                        // Template errors are deterministic: surface the first
                        if failed.is_none() {
                            failed = Some(e);
                        }
                        return f64::INFINITY;
                    }
                };
                loss -= if label == 1 {
                    p1.ln()
                } else {
                    (1.0 - p1).ln()
                };
            }
            loss / samples.len() as f64
        };

        let optimizer = Cobyla::new().with_maxiter(self.config.maxiter);
        let result = optimizer.minimize(objective, initial);

        if let Some(e) = failed {
            return Err(e);
        }

        tracing::info!(
            "VQC training finished: loss {:.4}, {} evaluations, converged: {}",
            result.optimal_value,
            result.num_evaluations,
            result.converged
        );

        self.weights = Some(result.optimal_params);

        Ok(TrainSummary {
            optimal_loss: result.optimal_value,
            iterations: result.num_iterations,
            circuit_evaluations,
            converged: result.converged,
            loss_history: result.history,
        })
    }

    /// Class-1 probabilities for a batch of samples.
    pub fn predict_proba(&self, samples: &[Vec<f64>]) -> MlResult<Vec<f64>> {
        let weights = self.weights.as_ref().ok_or(MlError::NotTrained)?;
        self.validate_inputs(samples, None)?;

        samples
            .iter()
            .map(|sample| self.class_probability(sample, weights))
            .collect()
    }

    /// Predicted labels (0.5 threshold on the class-1 probability).
    pub fn predict(&self, samples: &[Vec<f64>]) -> MlResult<Vec<u8>> {
        Ok(self
            .predict_proba(samples)?
            .into_iter()
            .map(|p| u8::from(p > 0.5))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A tiny two-class problem: class 0 near angle 0, class 1 near π.
    fn toy_problem(n_samples: usize) -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut samples = vec![];
        let mut labels = vec![];
        for i in 0..n_samples {
            let jitter = (i as f64 * 0.37).sin() * 0.3;
            if i % 2 == 0 {
                samples.push(vec![0.4 + jitter, 0.5 - jitter]);
                labels.push(0);
            } else {
                samples.push(vec![2.8 + jitter, 2.7 - jitter]);
                labels.push(1);
            }
        }
        (samples, labels)
    }

    fn small_config() -> VqcConfig {
        VqcConfig {
            num_qubits: 2,
            feature_map_reps: 1,
            ansatz_reps: 1,
            maxiter: 15,
            seed: 42,
        }
    }

    #[test]
    fn test_num_parameters() {
        let vqc = VqcClassifier::new(VqcConfig::new(8));
        // 2 * 8 * (2 + 1)
        assert_eq!(vqc.num_parameters(), 48);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let vqc = VqcClassifier::new(small_config());
        let err = vqc.predict(&[vec![0.1, 0.2]]).unwrap_err();
        assert!(matches!(err, MlError::NotTrained));
    }

    #[test]
    fn test_fit_rejects_wrong_width() {
        let mut vqc = VqcClassifier::new(small_config());
        let err = vqc.fit(&[vec![0.1, 0.2, 0.3]], &[0]).unwrap_err();
        assert!(matches!(err, MlError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_fit_rejects_bad_labels() {
        let mut vqc = VqcClassifier::new(small_config());
        let err = vqc.fit(&[vec![0.1, 0.2]], &[3]).unwrap_err();
        assert!(matches!(err, MlError::InvalidLabel(3)));
    }

    #[test]
    fn test_fit_rejects_empty() {
        let mut vqc = VqcClassifier::new(small_config());
        let err = vqc.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, MlError::EmptyTrainingSet));
    }

    #[test]
    fn test_fit_improves_loss() {
        let (samples, labels) = toy_problem(24);
        let mut vqc = VqcClassifier::new(small_config());
        let summary = vqc.fit(&samples, &labels).unwrap();

        assert!(!summary.loss_history.is_empty());
        let first = summary.loss_history[0];
        let last = *summary.loss_history.last().unwrap();
        assert!(last <= first, "loss should not get worse: {first} -> {last}");
        assert!(summary.circuit_evaluations > 0);
    }

    #[test]
    fn test_probabilities_are_valid() {
        let (samples, labels) = toy_problem(16);
        let mut vqc = VqcClassifier::new(small_config());
        vqc.fit(&samples, &labels).unwrap();

        let probs = vqc.predict_proba(&samples).unwrap();
        assert_eq!(probs.len(), samples.len());
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));

        let preds = vqc.predict(&samples).unwrap();
        assert!(preds.iter().all(|&p| p <= 1));
    }

    #[test]
    fn test_fit_deterministic() {
        let (samples, labels) = toy_problem(16);

        let mut a = VqcClassifier::new(small_config());
        let mut b = VqcClassifier::new(small_config());
        a.fit(&samples, &labels).unwrap();
        b.fit(&samples, &labels).unwrap();

        assert_eq!(a.weights(), b.weights());
    }
}
