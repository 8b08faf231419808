//! Eir IBM Quantum adapter.
//!
//! A thin client for the IBM Quantum REST API plus the hardware smoke
//! test: submit the fixed two-qubit Bell circuit to the least-busy
//! operational device, poll the queue to a terminal state and report the
//! measured distribution.

pub mod api;
pub mod error;
pub mod hardware_test;

pub use api::{BackendInfo, BackendStatus, IbmClient, JobStatusResponse, least_busy};
pub use error::{IbmError, IbmResult};
pub use hardware_test::{HardwareTest, HardwareTestReport};
