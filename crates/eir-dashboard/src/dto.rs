//! Data Transfer Objects for the dashboard API.
//!
//! These types bridge internal Eir structures to JSON-serializable API
//! responses.

use serde::{Deserialize, Serialize};

use eir_ir::{Circuit, Instruction, InstructionKind, draw};

// ============================================================================
// Health
// ============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status (always "ok" if responding).
    pub status: String,
    /// Dashboard version.
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// ============================================================================
// Patient features
// ============================================================================

/// Slider configuration for one input measurement.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureConfig {
    /// JSON field name in [`DiagnoseRequest`].
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Slider minimum.
    pub min: f64,
    /// Slider maximum.
    pub max: f64,
    /// Slider default.
    pub default: f64,
    /// Slider step.
    pub step: f64,
    /// What the measurement means, for the medical context panel.
    pub description: &'static str,
}

/// The six adjustable measurements with their realistic ranges.
pub fn feature_configs() -> Vec<FeatureConfig> {
    vec![
        FeatureConfig {
            key: "mean_radius",
            name: "Mean Radius",
            min: 6.0,
            max: 28.0,
            default: 14.0,
            step: 0.01,
            description: "Average size of cell nuclei. Larger values often indicate malignant cells.",
        },
        FeatureConfig {
            key: "mean_texture",
            name: "Mean Texture",
            min: 9.0,
            max: 39.0,
            default: 19.0,
            step: 0.01,
            description: "Standard deviation of gray-scale values. Higher values suggest irregular, cancerous tissue.",
        },
        FeatureConfig {
            key: "mean_perimeter",
            name: "Mean Perimeter",
            min: 43.0,
            max: 189.0,
            default: 92.0,
            step: 0.01,
            description: "Average perimeter of cell nuclei. Correlates with cell size and potential malignancy.",
        },
        FeatureConfig {
            key: "mean_area",
            name: "Mean Area",
            min: 143.0,
            max: 2501.0,
            default: 655.0,
            step: 0.01,
            description: "Average area of cell nuclei. Enlarged nuclei are suspicious for cancer.",
        },
        FeatureConfig {
            key: "mean_smoothness",
            name: "Mean Smoothness",
            min: 0.05,
            max: 0.16,
            default: 0.10,
            step: 0.01,
            description: "Local variation in radius. Irregular boundaries suggest malignancy.",
        },
        FeatureConfig {
            key: "mean_compactness",
            name: "Mean Compactness",
            min: 0.02,
            max: 0.35,
            default: 0.10,
            step: 0.01,
            description: "Shape complexity measure. Higher values indicate more irregular cell shapes.",
        },
    ]
}

/// Response for the features metadata endpoint.
#[derive(Debug, Serialize)]
pub struct FeaturesResponse {
    /// Slider configurations.
    pub features: Vec<FeatureConfig>,
    /// Dataset background for the context panel.
    pub dataset: DatasetInfo,
}

/// Dataset background information.
#[derive(Debug, Serialize)]
pub struct DatasetInfo {
    /// Dataset name.
    pub name: &'static str,
    /// Total samples.
    pub samples: usize,
    /// Raw feature count.
    pub features: usize,
    /// Encoded feature count after PCA.
    pub encoded_features: usize,
    /// Class names, index = label.
    pub classes: [&'static str; 2],
}

impl Default for DatasetInfo {
    fn default() -> Self {
        Self {
            name: "Breast Cancer Wisconsin (Diagnostic)",
            samples: 569,
            features: 30,
            encoded_features: 8,
            classes: ["malignant", "benign"],
        }
    }
}

// ============================================================================
// Diagnosis
// ============================================================================

/// Patient measurements submitted for diagnosis.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagnoseRequest {
    /// Mean radius of cell nuclei.
    pub mean_radius: f64,
    /// Mean gray-scale texture.
    pub mean_texture: f64,
    /// Mean nucleus perimeter.
    pub mean_perimeter: f64,
    /// Mean nucleus area.
    pub mean_area: f64,
    /// Mean boundary smoothness.
    pub mean_smoothness: f64,
    /// Mean shape compactness.
    pub mean_compactness: f64,
}

impl DiagnoseRequest {
    /// Values in slider order.
    pub fn values(&self) -> [f64; 6] {
        [
            self.mean_radius,
            self.mean_texture,
            self.mean_perimeter,
            self.mean_area,
            self.mean_smoothness,
            self.mean_compactness,
        ]
    }
}

/// One row of the per-feature assessment table.
#[derive(Debug, Serialize)]
pub struct FeatureAssessment {
    /// Display name.
    pub parameter: &'static str,
    /// Submitted value.
    pub value: f64,
    /// Normal range shown to the user.
    pub normal_range: String,
    /// Coarse per-value risk bucket.
    pub risk_factor: &'static str,
}

/// Diagnosis result panel data.
#[derive(Debug, Serialize)]
pub struct DiagnoseResponse {
    /// "Malignant" or "Benign".
    pub diagnosis: String,
    /// Display confidence in [0, 1].
    pub confidence: f64,
    /// "High" or "Low".
    pub risk_level: String,
    /// The underlying risk score.
    pub risk_score: f64,
    /// Per-feature assessment table.
    pub features: Vec<FeatureAssessment>,
    /// Medical recommendation copy.
    pub recommendation: String,
}

// ============================================================================
// Circuit visualization
// ============================================================================

/// Circuit visualization data for frontend rendering.
#[derive(Debug, Serialize)]
pub struct CircuitVisualization {
    /// Circuit name.
    pub name: String,
    /// Number of qubits.
    pub num_qubits: usize,
    /// Number of classical bits.
    pub num_clbits: usize,
    /// Circuit depth.
    pub depth: usize,
    /// Total number of operations.
    pub num_ops: usize,
    /// Operations organized by time layer.
    pub layers: Vec<CircuitLayer>,
    /// ASCII rendering for the terminal-style panel.
    pub ascii: String,
}

/// A single time layer in the circuit.
#[derive(Debug, Serialize)]
pub struct CircuitLayer {
    /// Depth index (0-based).
    pub depth: usize,
    /// Operations at this depth.
    pub operations: Vec<OperationView>,
}

/// A single operation for visualization.
#[derive(Debug, Serialize)]
pub struct OperationView {
    /// Gate name (e.g., "h", "cx", "ry").
    pub gate: String,
    /// Display label (e.g., "H", "RY(0.79)").
    pub label: String,
    /// Qubit indices this operation acts on.
    pub qubits: Vec<u32>,
    /// Whether this is a measurement operation.
    pub is_measurement: bool,
}

impl CircuitVisualization {
    /// Create a visualization from a circuit.
    pub fn from_circuit(circuit: &Circuit) -> Self {
        let layers = circuit
            .layers()
            .into_iter()
            .enumerate()
            .map(|(depth, ops)| CircuitLayer {
                depth,
                operations: ops.iter().map(|inst| instruction_to_view(inst)).collect(),
            })
            .collect();

        Self {
            name: circuit.name().to_string(),
            num_qubits: circuit.num_qubits(),
            num_clbits: circuit.num_clbits(),
            depth: circuit.depth(),
            num_ops: circuit.num_ops(),
            layers,
            ascii: draw::draw(circuit),
        }
    }
}

/// Convert an instruction to an `OperationView`.
fn instruction_to_view(instruction: &Instruction) -> OperationView {
    let (gate, label) = match &instruction.kind {
        InstructionKind::Gate(g) => (g.name().to_string(), g.label()),
        InstructionKind::Measure => ("measure".to_string(), "M".to_string()),
        InstructionKind::Barrier => ("barrier".to_string(), "║".to_string()),
    };

    OperationView {
        gate,
        label,
        qubits: instruction.qubits.iter().map(|q| q.0).collect(),
        is_measurement: instruction.is_measure(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_configs_cover_request_fields() {
        let configs = feature_configs();
        assert_eq!(configs.len(), 6);
        assert!(configs.iter().all(|c| c.min < c.max));
        assert!(configs.iter().all(|c| c.min <= c.default && c.default <= c.max));
    }

    #[test]
    fn test_visualization_from_bell() {
        let circuit = Circuit::bell().unwrap();
        let viz = CircuitVisualization::from_circuit(&circuit);

        assert_eq!(viz.num_qubits, 2);
        assert_eq!(viz.depth, 3);
        assert_eq!(viz.layers.len(), 3);
        assert!(viz.layers[2].operations.iter().all(|op| op.is_measurement));
        assert!(viz.ascii.contains('H'));
    }
}
