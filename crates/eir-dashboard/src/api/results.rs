//! Trained-model results endpoint.

use std::sync::Arc;

use axum::{Json, extract::State};

use eir_ml::ComparisonResults;

use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/model/results - The latest training comparison, if any.
pub async fn results(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ComparisonResults>, ApiError> {
    let path = &state.config.results_path;
    if !path.exists() {
        return Err(ApiError::NotFound(format!(
            "no training results at {}; run 'eir train' first",
            path.display()
        )));
    }

    let results = ComparisonResults::load_json(path)
        .map_err(|e| ApiError::Internal(format!("failed to read training results: {e}")))?;
    Ok(Json(results))
}
