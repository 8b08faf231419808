//! Eir hybrid classifier.
//!
//! The training stage of the diagnosis pipeline:
//!
//! - [`VqcClassifier`] — a variational quantum classifier composing a ZZ
//!   feature map with a hardware-efficient ansatz, trained by a
//!   derivative-free optimizer against a cross-entropy objective.
//! - [`RbfSvm`] — the classical RBF-kernel baseline it is compared with.
//! - [`metrics`] — accuracy, ROC AUC, confusion matrix and a formatted
//!   classification report.
//! - [`report`] — persisted comparison results in JSON and text form.

pub mod error;
pub mod metrics;
pub mod optimizer;
pub mod report;
pub mod svm;
pub mod vqc;

pub use error::{MlError, MlResult};
pub use metrics::{accuracy, classification_report, confusion_matrix, roc_auc};
pub use optimizer::{Cobyla, OptimizationResult, Optimizer, Spsa};
pub use report::{ComparisonResults, ModelReport, evaluate_predictions};
pub use svm::{RbfSvm, SvmConfig};
pub use vqc::{TrainSummary, VqcClassifier, VqcConfig};
