//! Router-level tests driven through `tower::ServiceExt::oneshot` with a mock provider.

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use summarizer_service::config::CorsConfig;
use summarizer_service::services::providers::mock::MockTextProvider;
use summarizer_service::services::Summarizer;
use summarizer_service::{build_router, AppState};
use tower::util::ServiceExt;

const DEV_ORIGIN: &str = "http://localhost:3001";

fn router(provider: Arc<MockTextProvider>) -> Router {
    let state = AppState {
        summarizer: Summarizer::new(provider),
    };
    let cors = CorsConfig {
        allowed_origins: vec![DEV_ORIGIN.to_string()],
    };
    build_router(state, &cors).expect("Failed to build router")
}

fn post_summarize(body: &'static str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/summarize")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn returns_summary_as_bare_json_string() {
    let provider = Arc::new(MockTextProvider::replying("  short summary  "));
    let response = router(provider.clone())
        .oneshot(post_summarize(r#"{"transcript": "hello world"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(json_body(response).await, serde_json::json!("short summary"));
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn malformed_bodies_are_unprocessable_and_never_forwarded() {
    let cases = [
        r#"{"malformed_field": "text"}"#,
        r#"{"transcript": 42}"#,
        r#"{"transcript": null}"#,
        r#"{"transcript": "hello", "extra": true}"#,
        r#"{"transcript": "#,
    ];

    for body in cases {
        let provider = Arc::new(MockTextProvider::replying("unused"));
        let response = router(provider.clone())
            .oneshot(post_summarize(body))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::UNPROCESSABLE_ENTITY,
            "body: {}",
            body
        );
        assert!(json_body(response).await["detail"].is_string());
        assert_eq!(provider.call_count(), 0, "body: {}", body);
    }
}

#[tokio::test]
async fn empty_transcript_is_bad_request() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let response = router(provider.clone())
        .oneshot(post_summarize(r#"{"transcript": ""}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        serde_json::json!({ "detail": "Bad request, text cannot be empty" })
    );
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn response_carries_request_id() {
    let provider = Arc::new(MockTextProvider::replying("ok"));
    let mut request = post_summarize(r#"{"transcript": "hi"}"#);
    request
        .headers_mut()
        .insert("x-request-id", "trace-me".parse().unwrap());

    let response = router(provider).oneshot(request).await.unwrap();

    assert_eq!(response.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn preflight_from_dev_origin_allows_credentials() {
    let provider = Arc::new(MockTextProvider::replying("unused"));
    let response = router(provider)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/summarize")
                .header(header::ORIGIN, DEV_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], DEV_ORIGIN);
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST");
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "content-type");
}

#[tokio::test]
async fn unknown_origin_is_not_echoed() {
    let provider = Arc::new(MockTextProvider::replying("ok"));
    let mut request = post_summarize(r#"{"transcript": "hi"}"#);
    request
        .headers_mut()
        .insert(header::ORIGIN, "https://evil.example.com".parse().unwrap());

    let response = router(provider).oneshot(request).await.unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}
