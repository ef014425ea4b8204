//! # Integration Tests for reqschema-api
//!
//! Drives the sample boxes router end to end: strict and lax validation,
//! handler-level checks layered on schema errors, unreadable payloads,
//! missing schemas, health probes and the 404 fallback.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use reqschema_api::state::{AppConfig, AppState};

/// Helper: build the test app serving the crate's schema directory.
fn test_app() -> axum::Router {
    let config = AppConfig {
        schema_root: concat!(env!("CARGO_MANIFEST_DIR"), "/schemas").into(),
        ..AppConfig::default()
    };
    reqschema_api::app(AppState::new(config))
}

/// Helper: POST a JSON body.
fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper: send a request and return status plus raw body.
async fn send(app: axum::Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

/// Helper: send a request and parse the body as JSON.
async fn send_json(app: axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, request).await;
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let request = Request::builder()
        .uri("/health/liveness")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ok");
}

#[tokio::test]
async fn test_readiness_probe() {
    let request = Request::builder()
        .uri("/health/readiness")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(test_app(), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"ready");
}

#[tokio::test]
async fn test_unknown_route_is_structured_404() {
    let (status, body) = send_json(test_app(), post_json("/crates", &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["meta"]["code"], 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// -- Strict endpoint ----------------------------------------------------------

#[tokio::test]
async fn test_post_ok() {
    let payload = json!({
        "count": 1,
        "inner": { "innerId": "1", "innerName": "innerN" }
    });
    let (status, _) = send(test_app(), post_json("/boxes", &payload)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_post_inner_missing_fields() {
    let payload = json!({ "count": 1, "inner": {} });
    let (status, body) = send_json(test_app(), post_json("/boxes", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = &body["error"]["validation"]["field"];
    assert_eq!(fields[0]["code"], "required-field");
    assert_eq!(fields[0]["name"], "innerId");
    assert_eq!(fields[1]["code"], "required-field");
    assert_eq!(fields[1]["name"], "innerName");
    assert_eq!(fields.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_post_empty_object() {
    let (status, body) = send_json(test_app(), post_json("/boxes", &json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["meta"]["code"], 422);
    let field = &body["error"]["validation"]["field"][0];
    assert_eq!(field["code"], "required-field");
    assert_eq!(field["name"], "count");
    assert_eq!(field["message"], "Field is required");
    assert!(body["error"]["validation"].get("global").is_none());
}

#[tokio::test]
async fn test_post_all_required_missing_in_order() {
    let (status, body) = send_json(test_app(), post_json("/boxes", &json!({ "inner": {} }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let names: Vec<&str> = body["error"]["validation"]["field"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["count", "innerId", "innerName"]);
}

#[tokio::test]
async fn test_post_count_at_exclusive_minimum() {
    let (status, body) = send_json(test_app(), post_json("/boxes", &json!({ "count": 0 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let field = &body["error"]["validation"]["field"][0];
    assert_eq!(field["code"], "exclusive-minimum");
    assert_eq!(field["name"], "count");
}

#[tokio::test]
async fn test_post_with_type_mismatch() {
    let payload = json!({ "count": 12, "id": "yes" });
    let (status, body) = send_json(test_app(), post_json("/boxes", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let field = &body["error"]["validation"]["field"][0];
    assert_eq!(field["code"], "invalid-property");
    assert_eq!(field["name"], "id");
    assert!(field["message"].as_str().unwrap().contains("invalid type"));
    assert!(body["error"]["validation"].get("global").is_none());
}

#[tokio::test]
async fn test_post_with_nested_type_mismatch() {
    let payload = json!({ "count": 1, "inner": { "innerId": 7, "innerName": "n" } });
    let (status, body) = send_json(test_app(), post_json("/boxes/lax", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let field = &body["error"]["validation"]["field"][0];
    assert_eq!(field["code"], "invalid-property");
    assert_eq!(field["name"], "innerId");
}

#[tokio::test]
async fn test_post_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/boxes")
        .header("content-type", "application/json")
        .body(Body::from("{ \"count\": "))
        .unwrap();
    let (status, body) = send_json(test_app(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["validation"]["global"][0]["code"], "payload");
}

#[tokio::test]
async fn test_post_without_json_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/boxes")
        .body(Body::from(json!({ "count": 1 }).to_string()))
        .unwrap();
    let (status, body) = send_json(test_app(), request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["validation"]["global"][0]["code"], "payload");
}

// -- Lax endpoints ------------------------------------------------------------

#[tokio::test]
async fn test_post_laxly() {
    let (status, _) = send(test_app(), post_json("/boxes/lax", &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_post_laxly_with_body_and_errors() {
    let payload = json!({ "name": "smelly stuff" });
    let (status, body) = send_json(test_app(), post_json("/boxes/lax/checked", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    let fields = &body["error"]["validation"]["field"];
    assert_eq!(fields[0]["code"], "required-field");
    assert_eq!(fields[0]["name"], "count");
    assert_eq!(fields[1]["code"], "nasty-box");
    assert_eq!(fields[1]["name"], "name");
    assert_eq!(fields[1]["message"], "This is not a pretty content");
}

#[tokio::test]
async fn test_post_checked_clean_payload_returns_empty_error_body() {
    let payload = json!({ "count": 3, "name": "fresh" });
    let (status, body) = send_json(test_app(), post_json("/boxes/checked", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["validation"], json!({}));
}

#[tokio::test]
async fn test_post_checked_strict_fails_before_handler() {
    let payload = json!({ "name": "smelly stuff" });
    let (status, body) = send_json(test_app(), post_json("/boxes/checked", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields = body["error"]["validation"]["field"].as_array().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0]["name"], "count");
}

#[tokio::test]
async fn test_post_checked_handler_rule_only() {
    let payload = json!({ "count": 2, "name": "smelly stuff" });
    let (status, body) = send_json(test_app(), post_json("/boxes/checked", &payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["error"]["validation"]["field"][0]["code"], "nasty-box");
}

// -- Schema availability ------------------------------------------------------

#[tokio::test]
async fn test_post_with_unavailable_schema() {
    let payload = json!({ "name": "smelly stuff" });
    let (status, body) = send_json(test_app(), post_json("/unavailable-schema", &payload)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let global = &body["error"]["validation"]["global"][0];
    assert_eq!(global["code"], "payload");
    assert_eq!(global["message"], "Internal validation error");
}

#[tokio::test]
async fn test_empty_schema_directory_makes_every_endpoint_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        port: 8080,
        schema_root: dir.path().to_path_buf(),
    };
    let app = reqschema_api::app(AppState::new(config));
    let (status, body) = send_json(app, post_json("/boxes", &json!({ "count": 1 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["error"]["validation"]["global"][0]["message"],
        "Internal validation error"
    );
}
