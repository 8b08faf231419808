//! Integration tests for the Eir Dashboard API.

use std::sync::Arc;

use axum_test::TestServer;
use serde_json::{Value, json};

use eir_dashboard::{AppState, DashboardConfig, create_router};

// ============================================================================
// Test helpers
// ============================================================================

fn test_state() -> Arc<AppState> {
    Arc::new(AppState::with_config(DashboardConfig::default()))
}

fn test_server(state: Arc<AppState>) -> TestServer {
    let router = create_router(state);
    TestServer::new(router).expect("test server")
}

fn valid_patient() -> Value {
    json!({
        "mean_radius": 14.0,
        "mean_texture": 19.0,
        "mean_perimeter": 92.0,
        "mean_area": 655.0,
        "mean_smoothness": 0.10,
        "mean_compactness": 0.10
    })
}

// ============================================================================
// Health endpoint
// ============================================================================

#[tokio::test]
async fn test_health_returns_ok() {
    let server = test_server(test_state());
    let response = server.get("/api/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().is_some());
}

// ============================================================================
// Feature metadata
// ============================================================================

#[tokio::test]
async fn test_features_lists_six_sliders() {
    let server = test_server(test_state());
    let response = server.get("/api/features").await;
    response.assert_status_ok();

    let body: Value = response.json();
    let features = body["features"].as_array().unwrap();
    assert_eq!(features.len(), 6);
    assert_eq!(features[0]["key"], "mean_radius");
    assert!(features[0]["min"].as_f64().unwrap() < features[0]["max"].as_f64().unwrap());
    assert_eq!(body["dataset"]["samples"], 569);
}

// ============================================================================
// Diagnosis
// ============================================================================

#[tokio::test]
async fn test_diagnose_default_patient_is_benign() {
    let server = test_server(test_state());
    let response = server.post("/api/diagnose").json(&valid_patient()).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["diagnosis"], "Benign");
    assert_eq!(body["risk_level"], "Low");
    assert_eq!(body["features"].as_array().unwrap().len(), 6);
    let confidence = body["confidence"].as_f64().unwrap();
    assert!((0.0..=0.95).contains(&confidence));
}

#[tokio::test]
async fn test_diagnose_elevated_patient_is_malignant() {
    let server = test_server(test_state());
    let mut patient = valid_patient();
    patient["mean_radius"] = json!(26.0);
    patient["mean_texture"] = json!(36.0);
    patient["mean_area"] = json!(2200.0);

    let response = server.post("/api/diagnose").json(&patient).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["diagnosis"], "Malignant");
    assert_eq!(body["risk_level"], "High");
    assert!(
        body["recommendation"]
            .as_str()
            .unwrap()
            .contains("oncologist")
    );
}

#[tokio::test]
async fn test_diagnose_rejects_out_of_range() {
    let server = test_server(test_state());
    let mut patient = valid_patient();
    patient["mean_radius"] = json!(500.0);

    let response = server.post("/api/diagnose").json(&patient).await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

#[tokio::test]
async fn test_diagnose_rejects_missing_field() {
    let server = test_server(test_state());
    let response = server
        .post("/api/diagnose")
        .json(&json!({ "mean_radius": 14.0 }))
        .await;
    assert!(response.status_code().is_client_error());
}

// ============================================================================
// Circuit visualization
// ============================================================================

#[tokio::test]
async fn test_feature_map_visualization() {
    let server = test_server(test_state());
    let response = server.get("/api/circuits/feature-map?qubits=4&reps=2").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["num_qubits"], 4);
    assert!(body["depth"].as_u64().unwrap() > 0);
    assert!(body["layers"].as_array().is_some());
    assert!(body["ascii"].as_str().unwrap().contains('H'));
}

#[tokio::test]
async fn test_ansatz_visualization() {
    let server = test_server(test_state());
    let response = server.get("/api/circuits/ansatz?qubits=4&reps=1").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["num_qubits"], 4);
    let has_ry = body["layers"].as_array().unwrap().iter().any(|layer| {
        layer["operations"]
            .as_array()
            .unwrap()
            .iter()
            .any(|op| op["gate"] == "ry")
    });
    assert!(has_ry, "ansatz should contain Ry rotations");
}

#[tokio::test]
async fn test_circuit_qubit_limit() {
    let server = test_server(test_state());
    let response = server.get("/api/circuits/feature-map?qubits=64").await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_circuit_defaults_apply() {
    let server = test_server(test_state());
    let response = server.get("/api/circuits/feature-map").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["num_qubits"], 4);
}

// ============================================================================
// Training results
// ============================================================================

#[tokio::test]
async fn test_results_missing_returns_404_with_hint() {
    let dir = tempfile::tempdir().unwrap();
    let config = DashboardConfig {
        results_path: dir.path().join("quantum_results.json"),
        ..DashboardConfig::default()
    };
    let server = test_server(Arc::new(AppState::with_config(config)));

    let response = server.get("/api/model/results").await;
    response.assert_status(axum::http::StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert!(body["message"].as_str().unwrap().contains("eir train"));
}

#[tokio::test]
async fn test_results_served_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quantum_results.json");

    let mut results = eir_ml::ComparisonResults::new(80, 20, 8);
    results.classical =
        Some(eir_ml::evaluate_predictions(&[0, 0, 1, 1], &[0, 1, 1, 1], 0.4).unwrap());
    results.save_json(&path).unwrap();

    let config = DashboardConfig {
        results_path: path,
        ..DashboardConfig::default()
    };
    let server = test_server(Arc::new(AppState::with_config(config)));

    let response = server.get("/api/model/results").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["n_train"], 80);
    assert!(body["classical"]["accuracy"].as_f64().is_some());
}

// ============================================================================
// Static assets
// ============================================================================

#[tokio::test]
async fn test_index_served() {
    let server = test_server(test_state());
    let response = server.get("/").await;
    response.assert_status_ok();
    assert!(response.text().contains("Quantum Medical Diagnosis"));
}

#[tokio::test]
async fn test_spa_fallback() {
    let server = test_server(test_state());
    let response = server.get("/some/unknown/route").await;
    response.assert_status_ok();
    assert!(response.text().contains("<html"));
}
