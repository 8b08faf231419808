//! Training results: evaluation, comparison and persistence.
//!
//! The train stage writes a JSON document consumed by the dashboard and a
//! human-readable text report mirroring the reference system's results
//! file.

use std::fmt::Write as _;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MlResult;
use crate::metrics::{accuracy, classification_report, confusion_matrix, roc_auc};

/// Evaluation of one model on the test set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReport {
    /// Test accuracy.
    pub accuracy: f64,
    /// ROC AUC of the hard predictions.
    pub auc: f64,
    /// Confusion matrix `[[tn, fp], [fn, tp]]`.
    pub confusion: [[u64; 2]; 2],
    /// Formatted classification report.
    pub classification_report: String,
    /// Training wall-clock seconds.
    pub training_seconds: f64,
}

/// Evaluate hard predictions against the test labels.
pub fn evaluate_predictions(
    y_true: &[u8],
    y_pred: &[u8],
    training_seconds: f64,
) -> MlResult<ModelReport> {
    let scores: Vec<f64> = y_pred.iter().map(|&p| f64::from(p)).collect();
    Ok(ModelReport {
        accuracy: accuracy(y_true, y_pred)?,
        auc: roc_auc(y_true, &scores)?,
        confusion: confusion_matrix(y_true, y_pred)?,
        classification_report: classification_report(y_true, y_pred)?,
        training_seconds,
    })
}

/// Combined quantum-vs-classical comparison, the artifact of the train
/// stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResults {
    /// Quantum classifier evaluation, if training succeeded.
    pub quantum: Option<ModelReport>,
    /// Classical baseline evaluation, if training succeeded.
    pub classical: Option<ModelReport>,
    /// Training set size.
    pub n_train: usize,
    /// Testing set size.
    pub n_test: usize,
    /// Encoded feature count (qubits).
    pub n_features: usize,
    /// When the comparison was produced.
    pub created_at: DateTime<Utc>,
}

impl ComparisonResults {
    /// Create an empty comparison for a split of the given shape.
    pub fn new(n_train: usize, n_test: usize, n_features: usize) -> Self {
        Self {
            quantum: None,
            classical: None,
            n_train,
            n_test,
            n_features,
            created_at: Utc::now(),
        }
    }

    /// Accuracy improvement of quantum over classical, in percentage
    /// points. `None` unless both models were evaluated.
    pub fn improvement_pct(&self) -> Option<f64> {
        match (&self.quantum, &self.classical) {
            (Some(q), Some(c)) => Some((q.accuracy - c.accuracy) * 100.0),
            _ => None,
        }
    }

    /// Persist as JSON.
    pub fn save_json(&self, path: impl AsRef<Path>) -> MlResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        Ok(())
    }

    /// Load a previously saved comparison.
    pub fn load_json(path: impl AsRef<Path>) -> MlResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Render the text report.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("QUANTUM-ASSISTED DIAGNOSIS RESULTS\n");
        out.push_str(&"=".repeat(50));
        out.push_str("\n\n");

        if let Some(q) = &self.quantum {
            out.push_str("QUANTUM MODEL PERFORMANCE:\n");
            let _ = writeln!(
                out,
                "Accuracy: {:.4} ({:.1}%)",
                q.accuracy,
                q.accuracy * 100.0
            );
            let _ = writeln!(out, "AUC: {:.4}", q.auc);
            out.push_str("\nDetailed Classification Report:\n");
            out.push_str(&q.classification_report);
            out.push_str("\n\n");
        }

        if let Some(c) = &self.classical {
            out.push_str("CLASSICAL MODEL PERFORMANCE:\n");
            let _ = writeln!(
                out,
                "Accuracy: {:.4} ({:.1}%)",
                c.accuracy,
                c.accuracy * 100.0
            );
            let _ = writeln!(out, "AUC: {:.4}", c.auc);
            out.push_str("\nDetailed Classification Report:\n");
            out.push_str(&c.classification_report);
            out.push_str("\n\n");
        }

        if let Some(improvement) = self.improvement_pct() {
            out.push_str("MODEL COMPARISON:\n");
            let _ = writeln!(
                out,
                "Quantum vs classical: {improvement:+.2}% accuracy difference"
            );
            let _ = writeln!(out, "Total Training Samples: {}", self.n_train);
            let _ = writeln!(out, "Total Testing Samples: {}", self.n_test);
            let _ = writeln!(
                out,
                "Quantum Features: {} (reduced from 30 via PCA)",
                self.n_features
            );
        }

        out
    }

    /// Persist the text report.
    pub fn save_text(&self, path: impl AsRef<Path>) -> MlResult<()> {
        std::fs::write(path.as_ref(), self.to_text())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_results() -> ComparisonResults {
        let mut results = ComparisonResults::new(80, 20, 4);
        results.quantum =
            Some(evaluate_predictions(&[0, 0, 1, 1], &[0, 0, 1, 1], 12.5).unwrap());
        results.classical =
            Some(evaluate_predictions(&[0, 0, 1, 1], &[0, 1, 1, 1], 0.2).unwrap());
        results
    }

    #[test]
    fn test_evaluate_predictions() {
        let report = evaluate_predictions(&[0, 0, 1, 1], &[0, 1, 1, 1], 1.0).unwrap();
        assert!((report.accuracy - 0.75).abs() < 1e-12);
        assert_eq!(report.confusion, [[1, 1], [0, 2]]);
    }

    #[test]
    fn test_improvement_pct() {
        let results = sample_results();
        let improvement = results.improvement_pct().unwrap();
        // quantum 100%, classical 75%
        assert!((improvement - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_improvement_requires_both() {
        let mut results = sample_results();
        results.classical = None;
        assert!(results.improvement_pct().is_none());
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("results.json");

        let results = sample_results();
        results.save_json(&path).unwrap();
        let loaded = ComparisonResults::load_json(&path).unwrap();

        assert_eq!(loaded.n_train, 80);
        assert!(loaded.quantum.is_some());
        assert!(
            (loaded.quantum.unwrap().accuracy - 1.0).abs() < 1e-12
        );
    }

    #[test]
    fn test_text_report_sections() {
        let text = sample_results().to_text();
        assert!(text.contains("QUANTUM MODEL PERFORMANCE"));
        assert!(text.contains("CLASSICAL MODEL PERFORMANCE"));
        assert!(text.contains("MODEL COMPARISON"));
        assert!(text.contains("reduced from 30 via PCA"));
    }
}
