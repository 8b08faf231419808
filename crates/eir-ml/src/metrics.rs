//! Evaluation metrics for binary classifiers.
//!
//! Labels are 0 (malignant) / 1 (benign); class 1 is the positive class
//! for ranking metrics.

use crate::error::{MlError, MlResult};

fn check_lengths(a: usize, b: usize) -> MlResult<()> {
    if a != b {
        return Err(MlError::DimensionMismatch {
            message: format!("{a} labels vs {b} predictions"),
        });
    }
    if a == 0 {
        return Err(MlError::UndefinedMetric("empty input".to_string()));
    }
    Ok(())
}

fn check_labels(labels: &[u8]) -> MlResult<()> {
    if let Some(&bad) = labels.iter().find(|&&l| l > 1) {
        return Err(MlError::InvalidLabel(bad));
    }
    Ok(())
}

/// Fraction of predictions matching the labels.
pub fn accuracy(y_true: &[u8], y_pred: &[u8]) -> MlResult<f64> {
    check_lengths(y_true.len(), y_pred.len())?;
    check_labels(y_true)?;
    check_labels(y_pred)?;

    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Confusion matrix `[[tn, fp], [fn, tp]]`, rows = actual, columns = predicted.
pub fn confusion_matrix(y_true: &[u8], y_pred: &[u8]) -> MlResult<[[u64; 2]; 2]> {
    check_lengths(y_true.len(), y_pred.len())?;
    check_labels(y_true)?;
    check_labels(y_pred)?;

    let mut matrix = [[0u64; 2]; 2];
    for (&t, &p) in y_true.iter().zip(y_pred) {
        matrix[t as usize][p as usize] += 1;
    }
    Ok(matrix)
}

/// Area under the ROC curve via the rank statistic (Mann–Whitney U),
/// with average ranks for tied scores.
pub fn roc_auc(y_true: &[u8], scores: &[f64]) -> MlResult<f64> {
    check_lengths(y_true.len(), scores.len())?;
    check_labels(y_true)?;

    let n_pos = y_true.iter().filter(|&&l| l == 1).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return Err(MlError::UndefinedMetric(
            "ROC AUC needs both classes present".to_string(),
        ));
    }

    // Rank scores ascending, averaging ranks across ties
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0; scores.len()];
    let mut i = 0;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && scores[order[j + 1]] == scores[order[i]] {
            j += 1;
        }
        let avg_rank = (i + j) as f64 / 2.0 + 1.0;
        for &idx in &order[i..=j] {
            ranks[idx] = avg_rank;
        }
        i = j + 1;
    }

    let rank_sum_pos: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|&(&l, _)| l == 1)
        .map(|(_, &r)| r)
        .sum();

    let u = rank_sum_pos - (n_pos * (n_pos + 1)) as f64 / 2.0;
    Ok(u / (n_pos * n_neg) as f64)
}

/// Per-class precision, recall and F1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassMetrics {
    /// Precision: tp / (tp + fp).
    pub precision: f64,
    /// Recall: tp / (tp + fn).
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Number of true samples of this class.
    pub support: u64,
}

fn class_metrics(matrix: &[[u64; 2]; 2], class: usize) -> ClassMetrics {
    let tp = matrix[class][class];
    let fp = matrix[1 - class][class];
    let fn_ = matrix[class][1 - class];
    let support = matrix[class][0] + matrix[class][1];

    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };
    let recall = if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassMetrics {
        precision,
        recall,
        f1,
        support,
    }
}

/// Formatted per-class precision/recall/F1 table.
pub fn classification_report(y_true: &[u8], y_pred: &[u8]) -> MlResult<String> {
    let matrix = confusion_matrix(y_true, y_pred)?;
    let acc = accuracy(y_true, y_pred)?;

    let mut out = String::new();
    out.push_str("              precision    recall  f1-score   support\n\n");
    for (class, name) in [(0usize, "malignant"), (1usize, "benign")] {
        let m = class_metrics(&matrix, class);
        out.push_str(&format!(
            "{name:>12}       {:.2}      {:.2}      {:.2}      {:>4}\n",
            m.precision, m.recall, m.f1, m.support
        ));
    }
    out.push_str(&format!(
        "\n    accuracy                           {:.2}      {:>4}\n",
        acc,
        y_true.len()
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let acc = accuracy(&[0, 1, 1, 0], &[0, 1, 0, 0]).unwrap();
        assert!((acc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_accuracy_length_mismatch() {
        assert!(matches!(
            accuracy(&[0, 1], &[0]),
            Err(MlError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_confusion_matrix() {
        let matrix = confusion_matrix(&[0, 0, 1, 1, 1], &[0, 1, 1, 1, 0]).unwrap();
        assert_eq!(matrix, [[1, 1], [1, 2]]);
    }

    #[test]
    fn test_roc_auc_perfect() {
        let auc = roc_auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]).unwrap();
        assert!((auc - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_inverted() {
        let auc = roc_auc(&[0, 0, 1, 1], &[0.9, 0.8, 0.2, 0.1]).unwrap();
        assert!(auc.abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_random_ties() {
        // All scores equal: AUC is exactly 0.5
        let auc = roc_auc(&[0, 1, 0, 1], &[0.5, 0.5, 0.5, 0.5]).unwrap();
        assert!((auc - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_on_hard_predictions() {
        // The reference pipeline computes AUC on 0/1 predictions; with one
        // error in each class of 4, AUC = 0.75
        let auc = roc_auc(
            &[0, 0, 0, 0, 1, 1, 1, 1],
            &[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0],
        )
        .unwrap();
        assert!((auc - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_roc_auc_single_class() {
        assert!(matches!(
            roc_auc(&[1, 1], &[0.3, 0.4]),
            Err(MlError::UndefinedMetric(_))
        ));
    }

    #[test]
    fn test_classification_report_format() {
        let report = classification_report(&[0, 1, 1, 0], &[0, 1, 1, 1]).unwrap();
        assert!(report.contains("malignant"));
        assert!(report.contains("benign"));
        assert!(report.contains("precision"));
        assert!(report.contains("accuracy"));
    }

    #[test]
    fn test_invalid_label_rejected() {
        assert!(matches!(
            accuracy(&[0, 2], &[0, 1]),
            Err(MlError::InvalidLabel(2))
        ));
    }
}
