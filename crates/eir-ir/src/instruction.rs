//! Circuit instructions.

use serde::{Deserialize, Serialize};

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of operation an instruction performs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Apply a gate.
    Gate(StandardGate),
    /// Measure a qubit into a classical bit.
    Measure,
    /// Barrier across qubits (no-op in simulation, rendering hint).
    Barrier,
}

/// A single operation in a circuit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The operation kind.
    pub kind: InstructionKind,
    /// Qubits the operation acts on.
    pub qubits: Vec<QubitId>,
    /// Classical bits the operation writes (measurements only).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: vec![qubit],
            clbits: vec![],
        }
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q0: QubitId, q1: QubitId) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: vec![q0, q1],
            clbits: vec![],
        }
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Create a barrier instruction.
    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Barrier,
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Name of the operation (gate name, "measure", or "barrier").
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Barrier => "barrier",
        }
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Check if this is a barrier.
    pub fn is_barrier(&self) -> bool {
        matches!(self.kind, InstructionKind::Barrier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_constructors() {
        let h = Instruction::single_qubit_gate(StandardGate::H, QubitId(0));
        assert_eq!(h.name(), "h");
        assert_eq!(h.qubits, vec![QubitId(0)]);
        assert!(!h.is_measure());

        let cx = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        assert_eq!(cx.qubits.len(), 2);

        let m = Instruction::measure(QubitId(1), ClbitId(1));
        assert!(m.is_measure());
        assert_eq!(m.clbits, vec![ClbitId(1)]);

        let b = Instruction::barrier([QubitId(0), QubitId(1)]);
        assert!(b.is_barrier());
    }
}
