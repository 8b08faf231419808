//! Eir Dashboard — local web interface for the quantum diagnosis demo.
//!
//! Serves an embedded single-page UI with three tabs:
//!
//! - **Diagnosis**: sliders for six tumor measurements and a button that
//!   runs the simulated inference and renders styled result panels
//! - **Quantum architecture**: feature-map and ansatz circuit diagrams
//!   rendered from live IR
//! - **Technical details**: pipeline and model information, including the
//!   latest training results when available
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use eir_dashboard::{AppState, DashboardConfig, create_router};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = DashboardConfig::default();
//!     let bind = config.bind_address;
//!     let state = Arc::new(AppState::with_config(config));
//!
//!     let app = create_router(state);
//!     let listener = tokio::net::TcpListener::bind(bind).await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod api;
pub mod dto;
pub mod error;
pub mod server;
pub mod state;

pub use dto::{
    CircuitVisualization, DiagnoseRequest, DiagnoseResponse, FeatureConfig, HealthResponse,
};
pub use error::ApiError;
pub use server::create_router;
pub use state::{AppState, DashboardConfig};
