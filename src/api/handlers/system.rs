use axum::{extract::State, Json};

use crate::api::{state::AppState, types::*};
use crate::ml::ModelKind;

/// GET /health -- liveness check that also reports artifact presence
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.predictor.store();
    let models = ModelAvailability {
        simple: store.is_available(ModelKind::Simple),
        multi: store.is_available(ModelKind::Multi),
    };

    let status = if models.simple && models.multi {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_secs: state.uptime_seconds(),
        models,
    })
}
