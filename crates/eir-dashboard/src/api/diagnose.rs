//! The simulated diagnosis endpoint.
//!
//! The inference is a fixed risk heuristic over radius, texture and area;
//! the quantum processing animation runs client-side and is purely
//! cosmetic. A trained-model-backed prediction would slot in here.

use axum::Json;

use crate::dto::{DiagnoseRequest, DiagnoseResponse, FeatureAssessment, feature_configs};
use crate::error::ApiError;

/// Risk score above which the diagnosis flips to malignant.
const MALIGNANT_THRESHOLD: f64 = 0.6;

/// POST /api/diagnose - Run the simulated inference.
pub async fn diagnose(Json(req): Json<DiagnoseRequest>) -> Result<Json<DiagnoseResponse>, ApiError> {
    let configs = feature_configs();
    let values = req.values();

    // Validate each value against its slider range
    for (config, &value) in configs.iter().zip(&values) {
        if !value.is_finite() || value < config.min || value > config.max {
            return Err(ApiError::BadRequest(format!(
                "{} must be between {} and {}, got {}",
                config.name, config.min, config.max, value
            )));
        }
    }

    // Elevated size and texture dominate the risk
    let risk_score = (req.mean_radius + req.mean_texture + req.mean_area / 100.0) / 50.0;

    let (diagnosis, confidence, risk_level) = if risk_score > MALIGNANT_THRESHOLD {
        (
            "Malignant",
            (0.7 + risk_score * 0.3).min(0.95),
            "High",
        )
    } else {
        (
            "Benign",
            (0.7 + (1.0 - risk_score) * 0.3).min(0.95),
            "Low",
        )
    };

    let features = configs
        .iter()
        .zip(&values)
        .map(|(config, &value)| FeatureAssessment {
            parameter: config.name,
            value,
            normal_range: format!("{}-{}", config.min, config.max),
            risk_factor: if value > 20.0 {
                "High"
            } else if value > 10.0 {
                "Medium"
            } else {
                "Low"
            },
        })
        .collect();

    let recommendation = if diagnosis == "Malignant" {
        "Immediate consultation with an oncologist recommended. Further diagnostic tests needed."
    } else {
        "Routine follow-up recommended. Continue regular screenings."
    };

    Ok(Json(DiagnoseResponse {
        diagnosis: diagnosis.to_string(),
        confidence,
        risk_level: risk_level.to_string(),
        risk_score,
        features,
        recommendation: recommendation.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(radius: f64, texture: f64, area: f64) -> DiagnoseRequest {
        DiagnoseRequest {
            mean_radius: radius,
            mean_texture: texture,
            mean_perimeter: 92.0,
            mean_area: area,
            mean_smoothness: 0.10,
            mean_compactness: 0.10,
        }
    }

    #[tokio::test]
    async fn test_low_measurements_are_benign() {
        let response = diagnose(Json(request(10.0, 12.0, 300.0))).await.unwrap();
        assert_eq!(response.diagnosis, "Benign");
        assert_eq!(response.risk_level, "Low");
        assert!(response.recommendation.contains("Routine"));
    }

    #[tokio::test]
    async fn test_high_measurements_are_malignant() {
        let response = diagnose(Json(request(25.0, 35.0, 2000.0))).await.unwrap();
        assert_eq!(response.diagnosis, "Malignant");
        assert_eq!(response.risk_level, "High");
        assert!(response.recommendation.contains("oncologist"));
    }

    #[tokio::test]
    async fn test_confidence_capped() {
        let response = diagnose(Json(request(28.0, 39.0, 2501.0))).await.unwrap();
        assert!(response.confidence <= 0.95);
    }

    #[tokio::test]
    async fn test_out_of_range_rejected() {
        let err = diagnose(Json(request(100.0, 12.0, 300.0)))
            .await
            .err()
            .expect("out-of-range radius should be rejected");
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_assessment_table_has_all_rows() {
        let response = diagnose(Json(request(14.0, 19.0, 655.0))).await.unwrap();
        assert_eq!(response.features.len(), 6);
        // mean radius 14 sits in the medium bucket
        assert_eq!(response.features[0].risk_factor, "Medium");
    }
}
