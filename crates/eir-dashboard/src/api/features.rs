//! Feature metadata endpoint.

use axum::Json;

use crate::dto::{DatasetInfo, FeaturesResponse, feature_configs};

/// GET /api/features - Slider configurations and dataset background.
pub async fn features() -> Json<FeaturesResponse> {
    Json(FeaturesResponse {
        features: feature_configs(),
        dataset: DatasetInfo::default(),
    })
}
