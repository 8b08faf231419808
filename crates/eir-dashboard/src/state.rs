//! Application state for the dashboard server.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Address to bind the server to.
    pub bind_address: SocketAddr,
    /// Path of the training results document produced by the train stage.
    pub results_path: PathBuf,
    /// Maximum qubits for circuit visualization (rendering limit).
    pub max_circuit_qubits: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 3000).into(),
            results_path: PathBuf::from("quantum_results.json"),
            max_circuit_qubits: 12,
        }
    }
}

/// Shared application state.
pub struct AppState {
    /// Dashboard configuration.
    pub config: DashboardConfig,
}

impl AppState {
    /// Create application state with default configuration.
    pub fn new() -> Self {
        Self {
            config: DashboardConfig::default(),
        }
    }

    /// Create application state with custom configuration.
    pub fn with_config(config: DashboardConfig) -> Self {
        Self { config }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
