//! Quantum gate types.
//!
//! All rotation angles are concrete `f64` radians. Circuits in this
//! workspace are built with data and parameters already bound.

use serde::{Deserialize, Serialize};

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    // Single-qubit Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sdg,

    // Single-qubit rotation gates
    /// Rotation around X axis.
    Rx(f64),
    /// Rotation around Y axis.
    Ry(f64),
    /// Rotation around Z axis.
    Rz(f64),
    /// Phase gate.
    P(f64),

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Y gate.
    CY,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// Controlled rotation around Z.
    CRz(f64),
    /// Controlled phase gate.
    CP(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::I => "id",
            StandardGate::X => "x",
            StandardGate::Y => "y",
            StandardGate::Z => "z",
            StandardGate::H => "h",
            StandardGate::S => "s",
            StandardGate::Sdg => "sdg",
            StandardGate::Rx(_) => "rx",
            StandardGate::Ry(_) => "ry",
            StandardGate::Rz(_) => "rz",
            StandardGate::P(_) => "p",
            StandardGate::CX => "cx",
            StandardGate::CY => "cy",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::CRz(_) => "crz",
            StandardGate::CP(_) => "cp",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::I
            | StandardGate::X
            | StandardGate::Y
            | StandardGate::Z
            | StandardGate::H
            | StandardGate::S
            | StandardGate::Sdg
            | StandardGate::Rx(_)
            | StandardGate::Ry(_)
            | StandardGate::Rz(_)
            | StandardGate::P(_) => 1,

            StandardGate::CX
            | StandardGate::CY
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::CRz(_)
            | StandardGate::CP(_) => 2,
        }
    }

    /// Get the rotation angle, if this gate carries one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Rx(t)
            | StandardGate::Ry(t)
            | StandardGate::Rz(t)
            | StandardGate::P(t)
            | StandardGate::CRz(t)
            | StandardGate::CP(t) => Some(*t),
            _ => None,
        }
    }

    /// Display label for circuit rendering (e.g. "H", "RY(0.79)").
    pub fn label(&self) -> String {
        match self {
            StandardGate::I => "I".to_string(),
            StandardGate::X => "X".to_string(),
            StandardGate::Y => "Y".to_string(),
            StandardGate::Z => "Z".to_string(),
            StandardGate::H => "H".to_string(),
            StandardGate::S => "S".to_string(),
            StandardGate::Sdg => "S†".to_string(),
            StandardGate::Rx(t) => format!("RX({})", format_angle(*t)),
            StandardGate::Ry(t) => format!("RY({})", format_angle(*t)),
            StandardGate::Rz(t) => format!("RZ({})", format_angle(*t)),
            StandardGate::P(t) => format!("P({})", format_angle(*t)),
            StandardGate::CX => "CX".to_string(),
            StandardGate::CY => "CY".to_string(),
            StandardGate::CZ => "CZ".to_string(),
            StandardGate::Swap => "SWAP".to_string(),
            StandardGate::CRz(t) => format!("CRZ({})", format_angle(*t)),
            StandardGate::CP(t) => format!("CP({})", format_angle(*t)),
        }
    }
}

/// Format an angle for display: special-case multiples of π, else 2 decimals.
pub(crate) fn format_angle(value: f64) -> String {
    let pi = std::f64::consts::PI;
    if (value - pi).abs() < 1e-10 {
        "π".to_string()
    } else if (value - pi / 2.0).abs() < 1e-10 {
        "π/2".to_string()
    } else if (value - pi / 4.0).abs() < 1e-10 {
        "π/4".to_string()
    } else if (value + pi).abs() < 1e-10 {
        "-π".to_string()
    } else if (value + pi / 2.0).abs() < 1e-10 {
        "-π/2".to_string()
    } else {
        format!("{value:.2}")
    }
}
