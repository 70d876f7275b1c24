use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Any OPTIONS request is answered here with 200 and an empty body
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        // Prediction endpoints
        .route("/", post(handlers::predict))
        .route("/predict", post(handlers::predict))
        .route("/api/predict", post(handlers::predict_script))
        // System endpoints
        .route("/health", get(handlers::health_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
