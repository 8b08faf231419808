//! Eir circuit intermediate representation.
//!
//! This crate provides the circuit types shared by every stage of the
//! diagnosis pipeline:
//!
//! - A bounds-checked [`Circuit`] builder with the standard gate vocabulary
//! - Prebuilt data encoders ([`library::zz_feature_map`]) and variational
//!   forms ([`library::efficient_su2`]) used by the hybrid classifier
//! - ASCII rendering for terminal display ([`draw::draw`])
//! - OpenQASM 3.0 emission for cloud submission ([`qasm::emit`])
//!
//! Circuits here are always bound: gate angles are concrete `f64` values.
//! The classifier rebuilds its circuit per sample and per parameter vector,
//! so no symbolic parameter machinery is needed.

pub mod circuit;
pub mod draw;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod library;
pub mod qasm;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use library::{
    Entanglement, efficient_su2, num_real_amplitudes_parameters, num_su2_parameters,
    real_amplitudes, z_feature_map, zz_feature_map,
};
pub use qubit::{Clbit, ClbitId, Qubit, QubitId};
