//! Integration tests for `POST /extract`

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use extraction::{Extractor, MockInvoker, model::DEFAULT_MODEL_ID, prompts::EMAIL_CHAIN_DELIMITER};
use serde_json::{Value, json};
use std::io;
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // for oneshot
use web::{app, state::AppState};

const INVALID_REQUEST: &str = "Invalid request. Must include \"description\" string.";
const EXTRACTION_FAILED: &str = "Failed to extract email.";

fn router_with(mock: &Arc<MockInvoker>) -> axum::Router {
    let extractor = Extractor::new(mock.clone(), DEFAULT_MODEL_ID);
    app(AppState::new(extractor))
}

fn post_extract(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/extract")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

/// In-memory sink for a test subscriber
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    (logs, tracing::subscriber::set_default(subscriber))
}

async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_invalid_descriptions_are_rejected_without_model_call() {
    let mock = Arc::new(MockInvoker::with_text("Hi"));

    for body in [
        json!({}),
        json!({ "description": null }),
        json!({ "description": 42 }),
        json!({ "description": ["Hi Bob"] }),
        json!({ "description": "" }),
        json!({ "text": "Hi Bob" }),
    ] {
        let response = router_with(&mock)
            .oneshot(post_extract(body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(json_body(response).await, json!({ "error": INVALID_REQUEST }));
    }

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_non_json_body_is_rejected() {
    let mock = Arc::new(MockInvoker::with_text("Hi"));

    let response = router_with(&mock)
        .oneshot(post_extract("description=Hi"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await, json!({ "error": INVALID_REQUEST }));

    let without_content_type = Request::builder()
        .method("POST")
        .uri("/extract")
        .body(Body::from(r#"{"description":"Hi"}"#))
        .unwrap();
    let response = router_with(&mock)
        .oneshot(without_content_type)
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn test_prompt_embeds_description_and_uses_fixed_parameters() {
    let mock = Arc::new(MockInvoker::with_text("Hi Bob"));
    let description = "Hi Bob,\n\nLooks good.\n\nThanks,\nJohn\n\nOn Mon, Bob <bob@example.com> wrote:\n> Draft attached";

    let response = router_with(&mock)
        .oneshot(post_extract(json!({ "description": description }).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);

    let (model_id, payload) = &calls[0];
    assert_eq!(model_id, DEFAULT_MODEL_ID);
    assert_eq!(payload.temperature, 0.0);
    assert_eq!(payload.max_tokens, 1024);
    assert_eq!(payload.top_p, 1.0);
    assert_eq!(payload.messages[0].role, "user");

    let block = format!("{0}{1}{0}", EMAIL_CHAIN_DELIMITER, description);
    assert!(payload.messages[0].content.contains(&block));
}

#[tokio::test]
async fn test_model_text_is_trimmed() {
    let mock = Arc::new(MockInvoker::with_body(
        r#"{"content":[{"text":"  Hi Bob, thanks, John  "}]}"#,
    ));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "content": "Hi Bob, thanks, John" })
    );
}

#[tokio::test]
async fn test_line_breaks_survive_round_trip() {
    let mock = Arc::new(MockInvoker::with_text("Hi Bob,\n\nThanks,\nJohn\n"));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(
        json_body(response).await,
        json!({ "content": "Hi Bob,\n\nThanks,\nJohn" })
    );
}

#[tokio::test]
async fn test_empty_completion_returns_success_without_content() {
    let mock = Arc::new(MockInvoker::with_body(r#"{"content":[]}"#));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body, json!({}));
    assert!(body.get("content").is_none());
}

#[tokio::test]
async fn test_unexpected_content_shape_returns_success_without_content() {
    for body in [
        r#"{"content":"Hi Bob"}"#,
        r#"{"content":["Hi Bob"]}"#,
        r#"{"content":[{"type":"tool_use"}]}"#,
    ] {
        let mock = Arc::new(MockInvoker::with_body(body));

        let response = router_with(&mock)
            .oneshot(post_extract(r#"{"description":"thread"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "model body: {}", body);
        assert_eq!(json_body(response).await, json!({}));
    }
}

#[tokio::test]
async fn test_non_string_completion_text_returns_generic_error() {
    let mock = Arc::new(MockInvoker::with_body(r#"{"content":[{"text":42}]}"#));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": EXTRACTION_FAILED }));
}

#[tokio::test]
async fn test_model_failure_returns_generic_error() {
    let (logs, _guard) = capture_logs();
    let mock = Arc::new(MockInvoker::failing(
        "ThrottlingException: rate exceeded for account 123456789012",
    ));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body, json!({ "error": EXTRACTION_FAILED }));
    let text = body.to_string();
    assert!(!text.contains("Throttling"));
    assert!(!text.contains("123456789012"));

    let logged = logs.contents();
    assert!(logged.contains("ERROR"), "logs: {}", logged);
    assert!(
        logged.contains("ThrottlingException: rate exceeded for account 123456789012"),
        "logs: {}",
        logged
    );
}

#[tokio::test]
async fn test_malformed_model_response_returns_generic_error() {
    let mock = Arc::new(MockInvoker::with_body("upstream exploded"));

    let response = router_with(&mock)
        .oneshot(post_extract(r#"{"description":"thread"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "error": EXTRACTION_FAILED }));
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let mock = Arc::new(MockInvoker::with_text("  Hi Bob,\nJohn  "));
    let router = router_with(&mock);
    let body = r#"{"description":"Hi Bob,\nJohn\n\n> earlier message"}"#;

    let first = router.clone().oneshot(post_extract(body)).await.unwrap();
    let second = router.oneshot(post_extract(body)).await.unwrap();

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(json_body(first).await, json_body(second).await);

    let calls = mock.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0], calls[1]);
}

#[tokio::test]
async fn test_openapi_document_lists_extract_endpoint() {
    let mock = Arc::new(MockInvoker::with_text("Hi"));

    let request = Request::builder()
        .method("GET")
        .uri("/api-docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let response = router_with(&mock).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = json_body(response).await;
    assert!(doc["paths"]["/extract"]["post"].is_object());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let mock = Arc::new(MockInvoker::with_text("Hi"));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/extract")
        .header(header::ORIGIN, "https://mail.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = router_with(&mock).oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
