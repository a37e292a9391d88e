use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    routing::post,
    Json, Router,
};
use rust_embed::RustEmbed;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use honey::llm::{ChatCompletionClient, MODEL, SYSTEM_PROMPT};
use honey::server::{build_router, AppState};

#[derive(Clone)]
struct MockUpstream {
    status: StatusCode,
    body: String,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn upstream_handler(
    State(mock): State<MockUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    let auth = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    mock.seen.lock().await.push((auth, body));
    (mock.status, mock.body.clone())
}

/// Serve a fake chat-completions endpoint; returns its URL and the captured requests
async fn spawn_upstream(
    status: StatusCode,
    body: impl Into<String>,
) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mock = MockUpstream {
        status,
        body: body.into(),
        seen: seen.clone(),
    };
    let app = Router::new()
        .route("/openai/v1/chat/completions", post(upstream_handler))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (
        format!("http://{}/openai/v1/chat/completions", addr),
        seen,
    )
}

fn proxy(base_url: &str, api_key: Option<&str>) -> Router {
    build_router(AppState {
        llm: ChatCompletionClient::new(base_url, api_key.map(str::to_string)),
        static_dir: None,
    })
}

async fn post_chat(app: Router, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri("/api/chat");
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn completion(content: &str) -> String {
    json!({
        "choices": [{ "index": 0, "message": { "role": "assistant", "content": content } }]
    })
    .to_string()
}

#[tokio::test]
async fn test_reply_is_relayed_with_system_prompt_first() {
    let (url, seen) = spawn_upstream(StatusCode::OK, completion("Arre, study first!")).await;

    let (status, body) = post_chat(
        proxy(&url, Some("test-key")),
        Some(json!({ "messages": [
            { "role": "user", "content": "can I nap?" },
            { "role": "assistant", "content": "no" },
            { "role": "user", "content": "pleaseee" }
        ]})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Arre, study first!" }));

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (auth, forwarded) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(forwarded["model"], MODEL);
    assert!((forwarded["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);

    let messages = forwarded["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], SYSTEM_PROMPT);
    assert_eq!(messages[1]["content"], "can I nap?");
    assert_eq!(messages[3]["content"], "pleaseee");
}

#[tokio::test]
async fn test_system_prompt_never_reaches_caller() {
    let (url, _seen) = spawn_upstream(StatusCode::OK, completion("hi")).await;
    let (_, body) = post_chat(proxy(&url, Some("k")), Some(json!({ "messages": [] }))).await;
    assert!(!body.to_string().contains("You are Honey"));
}

#[tokio::test]
async fn test_upstream_failure_embeds_details() {
    let (url, _seen) = spawn_upstream(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error":{"message":"Rate limit reached"}}"#,
    )
    .await;

    let (status, body) = post_chat(
        proxy(&url, Some("test-key")),
        Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Groq API error");
    assert_eq!(body["details"], r#"{"error":{"message":"Rate limit reached"}}"#);
    assert!(body.get("reply").is_none());
}

#[tokio::test]
async fn test_transport_failure_is_generic_server_error() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (status, body) = post_chat(
        proxy(&format!("http://{}/v1/chat/completions", addr), Some("k")),
        Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn test_undecodable_upstream_success_is_server_error() {
    let (url, _seen) = spawn_upstream(StatusCode::OK, "<html>gateway</html>").await;
    let (status, body) = post_chat(proxy(&url, Some("k")), Some(json!({ "messages": [] }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Server error" }));
}

#[tokio::test]
async fn test_empty_choices_use_fallback_reply() {
    let (url, _seen) = spawn_upstream(StatusCode::OK, r#"{"choices":[]}"#).await;
    let (status, body) = post_chat(proxy(&url, Some("k")), Some(json!({ "messages": [] }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "reply": "Sorry, I got confused there." }));
}

#[tokio::test]
async fn test_missing_key_answers_without_calling_upstream() {
    let (url, seen) = spawn_upstream(StatusCode::OK, completion("unreachable")).await;

    let (status, body) = post_chat(
        proxy(&url, None),
        Some(json!({ "messages": [{ "role": "user", "content": "hi" }] })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "GROQ_API_KEY is not set." }));
    assert!(seen.lock().await.is_empty());
}

#[tokio::test]
async fn test_missing_body_forwards_only_system_prompt() {
    let (url, seen) = spawn_upstream(StatusCode::OK, completion("hello?")).await;

    let (status, body) = post_chat(proxy(&url, Some("k")), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], "hello?");

    let seen = seen.lock().await;
    let messages = seen[0].1["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["role"], "system");
}

#[tokio::test]
async fn test_page_is_served_and_unknown_paths_fall_back() {
    let app = proxy("http://127.0.0.1:9/unused", None);

    for uri in ["/", "/some/client/route"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));
    }
}

#[test]
fn test_page_greets_like_the_terminal() {
    let script = honey::assets::embedded::WebAssets::get("app.js").unwrap();
    let script = std::str::from_utf8(script.data.as_ref()).unwrap();
    assert!(script.contains(honey::assistant::context::WELCOME));
}
