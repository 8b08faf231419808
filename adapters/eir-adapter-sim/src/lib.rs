//! Eir local simulator backend.
//!
//! Statevector simulation of the gate set used by the diagnosis pipeline.
//! The [`SimulatorBackend`] implements the HAL [`eir_hal::Backend`] trait
//! for shot-based execution; the underlying [`Statevector`] is also used
//! directly by the classifier for exact probability readout.

pub mod simulator;
pub mod statevector;

pub use simulator::SimulatorBackend;
pub use statevector::Statevector;
