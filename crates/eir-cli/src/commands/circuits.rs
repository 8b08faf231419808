//! Circuits command implementation.
//!
//! Builds the encoder and ansatz on demo values, prints their diagrams
//! and runs the Bell sanity circuit on the local simulator.

use std::f64::consts::PI;

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use eir_adapter_sim::SimulatorBackend;
use eir_hal::Backend;
use eir_ir::{Circuit, Entanglement, draw, efficient_su2, num_su2_parameters, zz_feature_map};

use crate::ui::{print_result, print_section, print_success};

/// Maximum qubits the terminal rendering stays readable at.
const MAX_DISPLAY_QUBITS: usize = 12;

/// Execute the circuits stage.
pub async fn execute(qubits: usize, reps: usize) -> Result<()> {
    if !(2..=MAX_DISPLAY_QUBITS).contains(&qubits) {
        bail!("qubits must be between 2 and {MAX_DISPLAY_QUBITS}");
    }

    print_section("Quantum feature encoding");

    // Evenly spaced demo angles across the encoding range
    let data: Vec<f64> = (0..qubits)
        .map(|i| (i as f64 + 1.0) * 2.0 * PI / (qubits as f64 + 1.0))
        .collect();
    let feature_map = zz_feature_map(&data, reps, Entanglement::Full)?;

    print_result("Qubits", feature_map.num_qubits());
    print_result("Repetitions", reps);
    print_result("Entanglement", Entanglement::Full);
    print_result("Depth", feature_map.depth());
    println!("\n{}\n", draw::draw(&feature_map));

    print_section("Variational ansatz");

    let n_params = num_su2_parameters(qubits, reps);
    let mut rng = StdRng::seed_from_u64(42);
    let params: Vec<f64> = (0..n_params)
        .map(|_| (rng.r#gen::<f64>() - 0.5) * PI)
        .collect();
    let ansatz = efficient_su2(qubits, reps, Entanglement::Linear, &params)?;

    print_result("Qubits", ansatz.num_qubits());
    print_result("Parameters", n_params);
    print_result("Entanglement", Entanglement::Linear);
    print_result("Depth", ansatz.depth());
    println!("\n{}\n", draw::draw(&ansatz));

    print_section("Simulator sanity check (Bell state)");

    let backend = SimulatorBackend::new();
    let circuit = Circuit::bell()?;
    let job_id = backend.submit(&circuit, 1000).await?;
    let result = backend.wait(&job_id).await?;

    for (bitstring, count) in result.counts.iter() {
        let pct = 100.0 * count as f64 / f64::from(result.shots);
        let bar = "█".repeat((pct / 2.0).round() as usize);
        println!("  |{bitstring}⟩ {bar} {count} ({pct:.1}%)");
    }

    print_success("Quantum circuit construction completed");
    Ok(())
}
