//! Prebuilt circuit templates.
//!
//! Data encoders and variational forms for the hybrid classifier. Circuits
//! are constructed with data and parameters already bound, so each call
//! yields a concrete, simulatable circuit.

use std::f64::consts::PI;

use crate::circuit::Circuit;
use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Entanglement pattern for multi-qubit templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entanglement {
    /// Every qubit pair (i < j).
    Full,
    /// Nearest neighbours only (i, i+1).
    Linear,
}

impl Entanglement {
    /// Enumerate the entangled qubit pairs for `n` qubits.
    pub fn pairs(self, n: usize) -> Vec<(u32, u32)> {
        match self {
            Entanglement::Full => {
                let mut pairs = vec![];
                for i in 0..n {
                    for j in (i + 1)..n {
                        pairs.push((i as u32, j as u32));
                    }
                }
                pairs
            }
            Entanglement::Linear => (0..n.saturating_sub(1))
                .map(|i| (i as u32, (i + 1) as u32))
                .collect(),
        }
    }
}

impl std::fmt::Display for Entanglement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entanglement::Full => write!(f, "full"),
            Entanglement::Linear => write!(f, "linear"),
        }
    }
}

/// Build a ZZ feature map encoding `data` into rotation phases.
///
/// One qubit per feature. Each repetition applies a Hadamard layer, a
/// single-feature phase `P(2·x_i)` per qubit, and for every entangled pair
/// (i, j) the two-feature interaction `CX · P(2·(π−x_i)(π−x_j)) · CX`.
pub fn zz_feature_map(data: &[f64], reps: usize, entanglement: Entanglement) -> IrResult<Circuit> {
    let n = data.len();
    if n < 2 {
        return Err(IrError::TooFewQubits {
            template: "zz_feature_map",
            min: 2,
            got: n,
        });
    }

    let mut circuit = Circuit::with_size("zz_feature_map", n as u32, 0);
    let pairs = entanglement.pairs(n);

    for _ in 0..reps {
        for q in 0..n {
            circuit.h(QubitId(q as u32))?;
        }
        for (q, &x) in data.iter().enumerate() {
            circuit.p(2.0 * x, QubitId(q as u32))?;
        }
        for &(i, j) in &pairs {
            let phi = 2.0 * (PI - data[i as usize]) * (PI - data[j as usize]);
            circuit.cx(QubitId(i), QubitId(j))?;
            circuit.p(phi, QubitId(j))?;
            circuit.cx(QubitId(i), QubitId(j))?;
        }
    }

    Ok(circuit)
}

/// Build a plain Pauli-Z feature map (no entangling interactions).
pub fn z_feature_map(data: &[f64], reps: usize) -> IrResult<Circuit> {
    let n = data.len();
    if n == 0 {
        return Err(IrError::TooFewQubits {
            template: "z_feature_map",
            min: 1,
            got: 0,
        });
    }

    let mut circuit = Circuit::with_size("z_feature_map", n as u32, 0);
    for _ in 0..reps {
        for (q, &x) in data.iter().enumerate() {
            circuit.h(QubitId(q as u32))?;
            circuit.p(2.0 * x, QubitId(q as u32))?;
        }
    }
    Ok(circuit)
}

/// Number of parameters for [`efficient_su2`]: `2 · n · (reps + 1)`.
pub fn num_su2_parameters(n_qubits: usize, reps: usize) -> usize {
    2 * n_qubits * (reps + 1)
}

/// Number of parameters for [`real_amplitudes`]: `n · (reps + 1)`.
pub fn num_real_amplitudes_parameters(n_qubits: usize, reps: usize) -> usize {
    n_qubits * (reps + 1)
}

/// Build a hardware-efficient SU(2) variational form.
///
/// Each repetition applies an Ry layer, an Rz layer and the entangling CX
/// pattern; a final Ry+Rz rotation layer closes the circuit. Parameters are
/// consumed layer by layer, `2 · n · (reps + 1)` in total.
pub fn efficient_su2(
    n_qubits: usize,
    reps: usize,
    entanglement: Entanglement,
    params: &[f64],
) -> IrResult<Circuit> {
    if n_qubits < 2 {
        return Err(IrError::TooFewQubits {
            template: "efficient_su2",
            min: 2,
            got: n_qubits,
        });
    }
    let expected = num_su2_parameters(n_qubits, reps);
    if params.len() != expected {
        return Err(IrError::ParameterCount {
            template: "efficient_su2",
            expected,
            got: params.len(),
        });
    }

    let mut circuit = Circuit::with_size("efficient_su2", n_qubits as u32, 0);
    let pairs = entanglement.pairs(n_qubits);
    let mut idx = 0;

    let rotation_layer = |circuit: &mut Circuit, idx: &mut usize| -> IrResult<()> {
        for q in 0..n_qubits {
            circuit.ry(params[*idx], QubitId(q as u32))?;
            *idx += 1;
        }
        for q in 0..n_qubits {
            circuit.rz(params[*idx], QubitId(q as u32))?;
            *idx += 1;
        }
        Ok(())
    };

    for _ in 0..reps {
        rotation_layer(&mut circuit, &mut idx)?;
        circuit.barrier_all()?;
        for &(i, j) in &pairs {
            circuit.cx(QubitId(i), QubitId(j))?;
        }
        circuit.barrier_all()?;
    }
    rotation_layer(&mut circuit, &mut idx)?;

    Ok(circuit)
}

/// Build a real-amplitudes variational form (Ry rotations only).
pub fn real_amplitudes(n_qubits: usize, reps: usize, params: &[f64]) -> IrResult<Circuit> {
    if n_qubits < 2 {
        return Err(IrError::TooFewQubits {
            template: "real_amplitudes",
            min: 2,
            got: n_qubits,
        });
    }
    let expected = num_real_amplitudes_parameters(n_qubits, reps);
    if params.len() != expected {
        return Err(IrError::ParameterCount {
            template: "real_amplitudes",
            expected,
            got: params.len(),
        });
    }

    let mut circuit = Circuit::with_size("real_amplitudes", n_qubits as u32, 0);
    let pairs = Entanglement::Full.pairs(n_qubits);
    let mut idx = 0;

    for rep in 0..=reps {
        for q in 0..n_qubits {
            circuit.ry(params[idx], QubitId(q as u32))?;
            idx += 1;
        }
        if rep < reps {
            for &(i, j) in &pairs {
                circuit.cx(QubitId(i), QubitId(j))?;
            }
        }
    }

    Ok(circuit)
}
