//! Pipeline command: every stage in sequence.

use anyhow::Result;

use crate::commands::{circuits, prepare, train};
use crate::ui::{create_progress_bar, print_header, print_result, print_section, print_success};

/// Execute the complete pipeline.
pub async fn execute(input: Option<&str>, features: usize, quick: bool) -> Result<()> {
    let start = std::time::Instant::now();

    print_header("EIR Quantum-Assisted Medical Diagnosis");

    println!("  This pipeline runs every stage in sequence:");
    println!("  1. Data preparation (standardize → PCA → angle encoding → split)");
    println!("  2. Quantum circuit construction");
    println!("  3. Hybrid classifier training and comparison");
    println!();

    let maxiter = if quick { 25 } else { 100 };
    let progress = create_progress_bar(3, "pipeline stages");

    // Stage 1: data preparation
    print_section("Step 1: Preparing medical data");
    prepare::execute(input, features, 0.2, 42, "processed_data.json")?;
    progress.inc(1);

    // Stage 2: circuit construction (display-sized)
    print_section("Step 2: Designing quantum circuits");
    circuits::execute(4, 2).await?;
    progress.inc(1);

    // Stage 3: training
    print_section("Step 3: Training classifiers");
    train::execute(
        "processed_data.json",
        maxiter,
        "quantum_results.json",
        "quantum_results.txt",
    )?;
    progress.inc(1);
    progress.finish_and_clear();

    // Summary
    print_section("Pipeline summary");
    print_result("Total time", format!("{:.2?}", start.elapsed()));
    println!();
    println!("  Generated files:");
    println!("    processed_data.json    — encoded train/test split");
    println!("    quantum_results.json   — model comparison (read by the dashboard)");
    println!("    quantum_results.txt    — text report");
    println!();
    println!("  Next steps:");
    println!("    eir-dashboard          — browse results interactively");
    println!("    eir hw-test            — run the Bell test on cloud hardware");

    print_success("Pipeline completed");
    Ok(())
}
