//! OpenQASM 3.0 emission.
//!
//! Produces the textual circuit format submitted to cloud sampler jobs.
//! Only emission is supported; the pipeline never parses QASM.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::gate::StandardGate;
use crate::instruction::InstructionKind;

/// Emit a circuit as an OpenQASM 3.0 program.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();
    out.push_str("OPENQASM 3.0;\n");
    out.push_str("include \"stdgates.inc\";\n");

    let nq = circuit.num_qubits();
    let nc = circuit.num_clbits();
    if nq > 0 {
        let _ = writeln!(out, "qubit[{nq}] q;");
    }
    if nc > 0 {
        let _ = writeln!(out, "bit[{nc}] c;");
    }

    for inst in circuit.instructions() {
        match &inst.kind {
            InstructionKind::Gate(gate) => {
                let operands = inst
                    .qubits
                    .iter()
                    .map(|q| format!("q[{}]", q.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                match gate.angle() {
                    Some(theta) => {
                        let _ = writeln!(out, "{}({}) {};", qasm_name(gate), theta, operands);
                    }
                    None => {
                        let _ = writeln!(out, "{} {};", qasm_name(gate), operands);
                    }
                }
            }
            InstructionKind::Measure => {
                let _ = writeln!(
                    out,
                    "c[{}] = measure q[{}];",
                    inst.clbits[0].0, inst.qubits[0].0
                );
            }
            InstructionKind::Barrier => {
                let operands = inst
                    .qubits
                    .iter()
                    .map(|q| format!("q[{}]", q.0))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "barrier {operands};");
            }
        }
    }

    out
}

/// Gate name in `stdgates.inc` vocabulary.
fn qasm_name(gate: &StandardGate) -> &'static str {
    // stdgates.inc names match StandardGate::name() for this gate set.
    gate.name()
}
