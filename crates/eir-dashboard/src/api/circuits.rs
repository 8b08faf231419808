//! Circuit visualization endpoints.

use std::f64::consts::PI;
use std::sync::Arc;

use axum::{Json, extract::Query, extract::State};
use serde::Deserialize;

use eir_ir::{Entanglement, efficient_su2, num_su2_parameters, zz_feature_map};

use crate::dto::CircuitVisualization;
use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters for circuit endpoints.
#[derive(Debug, Deserialize)]
pub struct CircuitQuery {
    /// Number of qubits.
    #[serde(default = "default_qubits")]
    pub qubits: usize,
    /// Repetitions of the template.
    #[serde(default = "default_reps")]
    pub reps: usize,
}

fn default_qubits() -> usize {
    4
}

fn default_reps() -> usize {
    2
}

fn check_size(state: &AppState, qubits: usize) -> Result<(), ApiError> {
    if qubits < 2 || qubits > state.config.max_circuit_qubits {
        return Err(ApiError::BadRequest(format!(
            "qubits must be between 2 and {}",
            state.config.max_circuit_qubits
        )));
    }
    Ok(())
}

/// GET /api/circuits/feature-map - Render the ZZ feature map on demo angles.
pub async fn feature_map(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CircuitQuery>,
) -> Result<Json<CircuitVisualization>, ApiError> {
    check_size(&state, query.qubits)?;

    // Evenly spaced demo angles across the encoding range
    let data: Vec<f64> = (0..query.qubits)
        .map(|i| (i as f64 + 1.0) * 2.0 * PI / (query.qubits as f64 + 1.0))
        .collect();

    let circuit = zz_feature_map(&data, query.reps, Entanglement::Full)?;
    Ok(Json(CircuitVisualization::from_circuit(&circuit)))
}

/// GET /api/circuits/ansatz - Render the variational ansatz on demo weights.
pub async fn ansatz(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CircuitQuery>,
) -> Result<Json<CircuitVisualization>, ApiError> {
    check_size(&state, query.qubits)?;

    // Deterministic demo weights spread over (-π/2, π/2)
    let n_params = num_su2_parameters(query.qubits, query.reps);
    let params: Vec<f64> = (0..n_params)
        .map(|i| ((i * 37 % 100) as f64 / 100.0 - 0.5) * PI)
        .collect();

    let circuit = efficient_su2(query.qubits, query.reps, Entanglement::Linear, &params)?;
    Ok(Json(CircuitVisualization::from_circuit(&circuit)))
}
