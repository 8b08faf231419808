//! Prepare command implementation.

use anyhow::{Context, Result};

use eir_data::{Dataset, PrepareConfig, prepare};

use crate::ui::{print_info, print_result, print_section, print_success, print_warning};

/// Execute the prepare stage.
pub fn execute(
    input: Option<&str>,
    features: usize,
    test_size: f64,
    seed: u64,
    output: &str,
) -> Result<()> {
    print_section("Preparing medical data");

    let dataset = load_dataset(input, seed)?;

    print_result(
        "Dataset shape",
        format!("{} × {}", dataset.num_samples(), dataset.num_features()),
    );
    let counts = dataset.class_counts();
    print_result(
        "Class distribution",
        format!(
            "{} malignant / {} benign",
            counts.get(&0).copied().unwrap_or(0),
            counts.get(&1).copied().unwrap_or(0)
        ),
    );

    let config = PrepareConfig {
        n_components: features,
        test_size,
        seed,
    };
    let (split, report) = prepare(&dataset, &config).context("data preparation failed")?;

    print_result("Reduced to", format!("{} features", report.n_components));
    print_result(
        "Retained variance",
        format!("{:.3}", report.retained_variance),
    );
    print_result("Training samples", report.n_train);
    print_result("Testing samples", report.n_test);

    split
        .save(output)
        .with_context(|| format!("failed to write archive to {output}"))?;

    print_success(&format!("Processed data saved to '{output}'"));
    Ok(())
}

/// Load the input CSV, falling back to the synthetic corpus.
pub fn load_dataset(input: Option<&str>, seed: u64) -> Result<Dataset> {
    match input {
        Some(path) => {
            print_info(&format!("loading dataset from {path}"));
            Dataset::from_csv(path).with_context(|| format!("failed to load dataset from {path}"))
        }
        None => {
            print_warning("no dataset file given, generating the synthetic reference corpus");
            Ok(Dataset::synthetic(569, seed))
        }
    }
}
