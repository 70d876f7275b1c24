use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use gradecast::{
    api::{create_router, AppState},
    LinearRegression, ModelStore, Predictor,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

/// Router over a temp dir holding y = 2x + 1 and y = 10 + x1 + 2x2 + 3x3.
fn app_with_models() -> (TempDir, Router) {
    let dir = tempfile::tempdir().expect("tempdir");
    LinearRegression::new(vec![2.0], 1.0)
        .save_json(dir.path().join("lin_reg.pkl"))
        .expect("write simple model");
    LinearRegression::new(vec![1.0, 2.0, 3.0], 10.0)
        .save_bincode(dir.path().join("multi_reg.pkl"))
        .expect("write multi model");
    let app = create_router(AppState::new(Predictor::new(ModelStore::new(dir.path()))));
    (dir, app)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: &str,
) -> (StatusCode, Vec<u8>, HeaderMap) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let resp = app.oneshot(req).await.expect("response");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.expect("body");
    (status, bytes.to_vec(), headers)
}

fn json_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("json body")
}

#[tokio::test]
async fn single_feature_uses_simple_model() {
    let (_dir, app) = app_with_models();
    let (status, body, headers) = send(app, Method::POST, "/", r#"{"features": [5]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"prediction": 11.0, "features_used": 1}));
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
}

#[tokio::test]
async fn three_features_use_multi_model() {
    let (_dir, app) = app_with_models();
    let (status, body, _) =
        send(app, Method::POST, "/predict", r#"{"features": [5, 3, 2]}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"prediction": 27.0, "features_used": 3}));
}

#[tokio::test]
async fn same_input_same_prediction() {
    let (_dir, app) = app_with_models();
    let payload = r#"{"features": [1.5, 2.5, 0.5]}"#;
    let (_, first, _) = send(app.clone(), Method::POST, "/", payload).await;
    let (_, second, _) = send(app, Method::POST, "/", payload).await;
    assert_eq!(json_body(&first), json_body(&second));
}

#[tokio::test]
async fn empty_features_is_bad_request() {
    let (_dir, app) = app_with_models();
    let (status, body, _) = send(app.clone(), Method::POST, "/", r#"{"features": []}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(&body), json!({"error": "No features provided"}));

    let (status, _, _) = send(app, Method::POST, "/", r#"{}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn empty_like_features_are_bad_request() {
    let (_dir, app) = app_with_models();
    for payload in [
        r#"{"features": 0}"#,
        r#"{"features": false}"#,
        r#"{"features": ""}"#,
        r#"{"features": {}}"#,
        r#"{"features": null}"#,
    ] {
        let (status, body, _) = send(app.clone(), Method::POST, "/", payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert_eq!(json_body(&body), json!({"error": "No features provided"}));
    }

    let (status, _, _) = send(app, Method::POST, "/", r#"{"features": 7}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn string_features_are_server_error() {
    let (_dir, app) = app_with_models();
    let (status, body, _) =
        send(app.clone(), Method::POST, "/predict", r#"{"features": ["3.5"]}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("string"), "unexpected error: {error}");

    // The script-compatible route still coerces numeric strings.
    let (status, body, _) =
        send(app, Method::POST, "/api/predict", r#"{"features": ["3.5"]}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"prediction": 8.0}));
}

#[tokio::test]
async fn malformed_json_is_server_error() {
    let (_dir, app) = app_with_models();
    let (status, body, _) = send(app, Method::POST, "/", "{not json").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json_body(&body)["error"].is_string());
}

#[tokio::test]
async fn missing_model_is_server_error() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(AppState::new(Predictor::new(ModelStore::new(dir.path()))));
    let (status, body, _) = send(app, Method::POST, "/", r#"{"features": [5]}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.contains("lin_reg.pkl"), "unexpected error: {error}");
}

#[tokio::test]
async fn options_returns_cors_headers_without_body() {
    let (_dir, app) = app_with_models();
    let (status, body, headers) = send(app, Method::OPTIONS, "/", "").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    let allowed = headers
        .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(allowed.eq_ignore_ascii_case("content-type"));
}

#[tokio::test]
async fn script_route_accepts_named_fields() {
    let (_dir, app) = app_with_models();
    let (status, body, _) = send(
        app,
        Method::POST,
        "/api/predict",
        r#"{"current_grade": 5, "study_hours": 3, "assignment_score": 2}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({"prediction": 27.0}));
}

#[tokio::test]
async fn script_route_relays_stage_errors() {
    let (_dir, app) = app_with_models();
    let (status, body, _) = send(app.clone(), Method::POST, "/api/predict", r#"{}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body), json!({"error": "no features provided"}));

    let (status, body, _) =
        send(app, Method::POST, "/api/predict", r#"{"features": ["abc"]}"#).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let error = json_body(&body)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("prediction failed:"), "unexpected error: {error}");
}

#[tokio::test]
async fn health_reports_artifacts() {
    let (dir, app) = app_with_models();
    let (status, body, _) = send(app, Method::GET, "/health", "").await;
    assert_eq!(status, StatusCode::OK);
    let health = json_body(&body);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["models"], json!({"simple": true, "multi": true}));

    std::fs::remove_file(dir.path().join("multi_reg.pkl")).unwrap();
    let app = create_router(AppState::new(Predictor::new(ModelStore::new(dir.path()))));
    let (_, body, _) = send(app, Method::GET, "/health", "").await;
    assert_eq!(json_body(&body)["status"], "degraded");
}
