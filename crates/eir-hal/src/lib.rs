//! Eir Hardware Abstraction Layer
//!
//! A unified interface for executing circuits on quantum backends, local or
//! remote:
//!
//! - The [`Backend`] trait covers the job lifecycle: submit → status →
//!   result → cancel, with a bounded polling [`Backend::wait`].
//! - [`Counts`] and [`ExecutionResult`] carry measurement outcomes.
//! - [`CredentialStore`] persists cloud API tokens under the user
//!   configuration directory with restrictive permissions.
//!
//! # Example: Running a Circuit
//!
//! ```ignore
//! use eir_hal::Backend;
//! use eir_adapter_sim::SimulatorBackend;
//! use eir_ir::Circuit;
//!
//! let circuit = Circuit::bell()?;
//! let backend = SimulatorBackend::new();
//!
//! let job_id = backend.submit(&circuit, 1000).await?;
//! let result = backend.wait(&job_id).await?;
//!
//! if let Some((bitstring, count)) = result.counts.most_frequent() {
//!     println!("Most frequent: {bitstring} ({count} times)");
//! }
//! ```

pub mod auth;
pub mod backend;
pub mod error;
pub mod job;
pub mod result;

pub use auth::{CredentialStore, Credentials};
pub use backend::{Backend, BackendConfig, Capabilities};
pub use error::{HalError, HalResult};
pub use job::{Job, JobId, JobStatus};
pub use result::{Counts, ExecutionResult};
