// Router-level tests: status route, API-key gate, CORS, metrics
// Author: kelexine (https://github.com/kelexine)

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use recipe_gateway::config::AppConfig;
use recipe_gateway::server::{create_router, StatusResponse};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with_key(key: &str) -> Router {
    let mut config = AppConfig::default();
    config.auth.api_key = key.to_string();
    create_router(config).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_is_public() {
    let response = app_with_key("secret")
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let status: StatusResponse = serde_json::from_value(json_body(response).await).unwrap();
    assert_eq!(status.status, "success");
    assert_eq!(status.message, "Recipe Generator API is running.");
    assert_eq!(status.server_time.len(), "2024-01-01 00:00:00".len());
}

#[tokio::test]
async fn test_missing_or_wrong_key_is_rejected() {
    for key in [None, Some("wrong")] {
        let mut request = Request::builder()
            .method("POST")
            .uri("/generate/recipe");
        if let Some(key) = key {
            request = request.header("api-key", key);
        }
        let response = app_with_key("secret")
            .oneshot(request.body(Body::from(r#"{"text": "soup"}"#)).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            json_body(response).await,
            json!({
                "code": "unauthorized",
                "message": "You are not authorized to access this service",
                "details": "Invalid API key"
            })
        );
    }
}

#[tokio::test]
async fn test_valid_key_reaches_handler() {
    let response = app_with_key("secret")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate/recipe")
                .header("api-key", "secret")
                .body(Body::from(r#"{"text": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_empty_configured_key_disables_gate() {
    let response = app_with_key("")
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate/image")
                .body(Body::from(r#"{"description": ""}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cors_preflight_bypasses_gate() {
    let response = app_with_key("secret")
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/generate/recipe")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "api-key,content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "http://localhost:3000");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
}

#[tokio::test]
async fn test_unknown_origin_gets_no_cors_headers() {
    let response = app_with_key("")
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let response = app_with_key("")
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_metrics_endpoint_reports_requests() {
    let app = app_with_key("");
    let _ = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("requests_total"));
}
