use axum::{body::Bytes, extract::State, http::StatusCode, Json};
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

use crate::api::{state::AppState, types::*};
use crate::cli::script;
use crate::error::{GradecastError, Result};
use crate::ml::{FeatureVector, Prediction};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn internal(err: impl std::fmt::Display) -> ApiError {
    let message = err.to_string();
    warn!("prediction request failed: {message}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, message)
}

/// Model loading reads from disk, so it runs on the blocking pool.
async fn predict_blocking(state: &AppState, features: FeatureVector) -> Result<Prediction> {
    let predictor = Arc::clone(&state.predictor);
    tokio::task::spawn_blocking(move || predictor.predict(&features))
        .await
        .map_err(|e| GradecastError::Internal(format!("prediction task failed: {e}")))?
}

/// POST / and POST /predict
///
/// Feature values must be JSON numbers or booleans here; numeric strings are
/// only coerced on the script-compatible route.
///
/// The body is parsed by hand so that malformed JSON surfaces as a 500 with
/// the parser's message rather than the extractor's 4xx.
pub async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<PredictResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(internal)?;
    let features = FeatureVector::from_request(&payload).map_err(internal)?;

    if features.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "No features provided"));
    }
    features.require_non_string().map_err(internal)?;

    let prediction = predict_blocking(&state, features).await.map_err(internal)?;

    Ok(Json(PredictResponse {
        prediction: prediction.value,
        features_used: prediction.features_used,
    }))
}

/// POST /api/predict
///
/// Same contract as the `predict` command: named-field fallback, stage
/// prefixed error messages, and `{"prediction": f64}` on success. Every
/// failure is a 500 carrying the command's error body.
pub async fn predict_script(
    State(state): State<AppState>,
    body: Bytes,
) -> std::result::Result<Json<ScriptPredictResponse>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(internal)?;

    let predictor = Arc::clone(&state.predictor);
    let value = tokio::task::spawn_blocking(move || script::evaluate_payload(&payload, &predictor))
        .await
        .map_err(|e| internal(format!("prediction task failed: {e}")))?
        .map_err(|failure| internal(failure.message))?;

    Ok(Json(ScriptPredictResponse { prediction: value }))
}
