use serde::{Deserialize, Serialize};

// ============================================================================
// Prediction Types
// ============================================================================

/// Body of a successful `POST /` or `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: f64,
    pub features_used: usize,
}

/// Body of a successful `POST /api/predict`; mirrors the `predict` command's stdout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptPredictResponse {
    pub prediction: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// ============================================================================
// System Types
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: i64,
    pub models: ModelAvailability,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelAvailability {
    pub simple: bool,
    pub multi: bool,
}
