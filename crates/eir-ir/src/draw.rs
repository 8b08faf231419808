//! ASCII circuit rendering for terminal display.

use crate::circuit::Circuit;
use crate::instruction::{Instruction, InstructionKind};

/// Render a circuit as an ASCII diagram, one row per qubit.
///
/// Controls are drawn as `●`, swap endpoints as `✕`, measurements as `M`.
/// Qubits crossed by a two-qubit gate get a `┼` connector.
pub fn draw(circuit: &Circuit) -> String {
    let n = circuit.num_qubits();
    if n == 0 {
        return String::new();
    }

    let layers = circuit.layers();
    let label_width = (n.saturating_sub(1)).to_string().len();

    let mut rows: Vec<String> = (0..n)
        .map(|q| format!("q{q:<label_width$}: ─"))
        .collect();

    for layer in &layers {
        let width = layer
            .iter()
            .flat_map(|inst| cell_labels(inst))
            .map(|(_, label)| label.chars().count())
            .max()
            .unwrap_or(1);

        let mut cells: Vec<Option<String>> = vec![None; n];
        for inst in layer {
            for (q, label) in cell_labels(inst) {
                cells[q] = Some(label);
            }
            // Connector for qubits strictly between the endpoints
            if inst.qubits.len() == 2 {
                let a = inst.qubits[0].0.min(inst.qubits[1].0) as usize;
                let b = inst.qubits[0].0.max(inst.qubits[1].0) as usize;
                for q in (a + 1)..b {
                    if cells[q].is_none() {
                        cells[q] = Some("┼".to_string());
                    }
                }
            }
        }

        for (q, row) in rows.iter_mut().enumerate() {
            match &cells[q] {
                Some(label) => row.push_str(&pad_cell(label, width)),
                None => row.push_str(&"─".repeat(width + 2)),
            }
            row.push('─');
        }
    }

    rows.join("\n")
}

/// Labels per qubit for one instruction.
fn cell_labels(inst: &Instruction) -> Vec<(usize, String)> {
    match &inst.kind {
        InstructionKind::Gate(gate) => {
            if inst.qubits.len() == 2 {
                let control = inst.qubits[0].0 as usize;
                let target = inst.qubits[1].0 as usize;
                match gate.name() {
                    "swap" => vec![(control, "✕".to_string()), (target, "✕".to_string())],
                    "cx" => vec![(control, "●".to_string()), (target, "X".to_string())],
                    "cy" => vec![(control, "●".to_string()), (target, "Y".to_string())],
                    "cz" => vec![(control, "●".to_string()), (target, "●".to_string())],
                    _ => vec![(control, "●".to_string()), (target, gate.label())],
                }
            } else {
                vec![(inst.qubits[0].0 as usize, gate.label())]
            }
        }
        InstructionKind::Measure => vec![(inst.qubits[0].0 as usize, "M".to_string())],
        InstructionKind::Barrier => vec![],
    }
}

/// Center a label in a cell of `width` characters, padded with `─`.
fn pad_cell(label: &str, width: usize) -> String {
    let len = label.chars().count();
    let total = width + 2 - len;
    let left = total / 2;
    let right = total - left;
    format!("{}{}{}", "─".repeat(left), label, "─".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_bell() {
        let circuit = Circuit::bell().unwrap();
        let drawing = draw(&circuit);

        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('H'));
        assert!(lines[0].contains('●'));
        assert!(lines[1].contains('X'));
        assert!(lines[0].contains('M'));
        assert!(lines[1].contains('M'));
    }

    #[test]
    fn test_draw_empty() {
        let circuit = Circuit::new("empty");
        assert_eq!(draw(&circuit), "");
    }

    #[test]
    fn test_rows_align() {
        let data = vec![0.3, 1.1, 2.0];
        let circuit = crate::library::zz_feature_map(&data, 1, crate::Entanglement::Linear)
            .unwrap();
        let drawing = draw(&circuit);
        let widths: Vec<usize> = drawing.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }
}
