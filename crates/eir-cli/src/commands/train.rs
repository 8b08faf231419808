//! Train command implementation.

use std::time::Instant;

use anyhow::{Context, Result};

use eir_data::DatasetSplit;
use eir_ml::{
    ComparisonResults, RbfSvm, SvmConfig, VqcClassifier, VqcConfig, evaluate_predictions,
};

use crate::ui::{print_result, print_section, print_success, print_warning};

/// Execute the train stage.
pub fn execute(data_path: &str, maxiter: usize, output: &str, report_path: &str) -> Result<()> {
    print_section("Loading prepared data");

    let split = DatasetSplit::load(data_path)?;
    print_result(
        "Training set",
        format!("{} × {}", split.num_train(), split.n_features),
    );
    print_result(
        "Test set",
        format!("{} × {}", split.num_test(), split.n_features),
    );
    if let Some(variance) = split.retained_variance {
        print_result("Retained variance", format!("{variance:.3}"));
    }

    let mut results = ComparisonResults::new(split.num_train(), split.num_test(), split.n_features);

    // Quantum classifier; a failure here leaves the classical baseline
    print_section("Training quantum classifier");
    let mut vqc = VqcClassifier::new(VqcConfig {
        maxiter,
        ..VqcConfig::new(split.n_features)
    });
    print_result("Qubits", split.n_features);
    print_result("Trainable parameters", vqc.num_parameters());
    print_result("Optimizer", format!("COBYLA ({maxiter} iterations)"));

    let spinner = crate::ui::create_spinner("optimizing variational parameters…");
    let started = Instant::now();
    let fit_result = vqc.fit(&split.x_train, &split.y_train);
    spinner.finish_and_clear();
    match fit_result {
        Ok(summary) => {
            let seconds = started.elapsed().as_secs_f64();
            print_result("Training time", format!("{seconds:.1}s"));
            print_result("Final loss", format!("{:.4}", summary.optimal_loss));
            print_result("Circuit evaluations", summary.circuit_evaluations);

            let predictions = vqc.predict(&split.x_test)?;
            let report = evaluate_predictions(&split.y_test, &predictions, seconds)?;
            print_result(
                "Quantum accuracy",
                format!("{:.4} ({:.1}%)", report.accuracy, report.accuracy * 100.0),
            );
            print_result("Quantum AUC", format!("{:.4}", report.auc));
            results.quantum = Some(report);
        }
        Err(e) => {
            print_warning(&format!("quantum training failed: {e}"));
            print_warning("continuing with the classical baseline only");
        }
    }

    // Classical baseline
    print_section("Training classical baseline");
    let started = Instant::now();
    let mut svm = RbfSvm::new(SvmConfig::default());
    svm.fit(&split.x_train, &split.y_train)
        .context("SVM training failed")?;
    let seconds = started.elapsed().as_secs_f64();

    print_result("Kernel", "RBF (scale gamma)");
    print_result("Support vectors", svm.num_support_vectors());
    print_result("Training time", format!("{seconds:.1}s"));

    let predictions = svm.predict(&split.x_test)?;
    let report = evaluate_predictions(&split.y_test, &predictions, seconds)?;
    print_result(
        "Classical accuracy",
        format!("{:.4} ({:.1}%)", report.accuracy, report.accuracy * 100.0),
    );
    print_result("Classical AUC", format!("{:.4}", report.auc));
    results.classical = Some(report);

    // Comparison and persistence
    if let Some(improvement) = results.improvement_pct() {
        print_section("Model comparison");
        print_result(
            "Quantum vs classical",
            format!("{improvement:+.2}% accuracy difference"),
        );
    }

    results
        .save_json(output)
        .with_context(|| format!("failed to write {output}"))?;
    results
        .save_text(report_path)
        .with_context(|| format!("failed to write {report_path}"))?;

    print_success(&format!("Results saved to '{output}' and '{report_path}'"));
    Ok(())
}
