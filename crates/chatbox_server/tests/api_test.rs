//! In-process tests of the HTTP API.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chatbox_core::{Turn, ensure_ends_with_user};
use chatbox_error::{ChatboxResult, UpstreamError, UpstreamErrorKind};
use chatbox_models::{ChatDriver, FragmentStream, GeminiClient, GeminiConfig};
use chatbox_server::{AppState, MODEL_HEADER, STREAM_INTERRUPTED_NOTICE, create_router};
use chatbox_store::{InMemoryTodoStore, NoteCatalog};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;

/// Outcome a [`ScriptedDriver`] produces once validation passes.
#[derive(Clone)]
enum Script {
    Fragments(Vec<&'static str>),
    FailAfter(Vec<&'static str>),
    RateLimited,
}

struct ScriptedDriver {
    script: Script,
    upstream_calls: Arc<AtomicUsize>,
}

impl ScriptedDriver {
    fn new(script: Script) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            Self {
                script,
                upstream_calls: calls.clone(),
            },
            calls,
        )
    }
}

#[async_trait]
impl ChatDriver for ScriptedDriver {
    fn model_name(&self) -> &str {
        "scripted-model"
    }

    async fn stream_chat(&self, turns: &[Turn]) -> ChatboxResult<FragmentStream> {
        ensure_ends_with_user(turns)?;
        self.upstream_calls.fetch_add(1, Ordering::SeqCst);

        let items: Vec<ChatboxResult<String>> = match &self.script {
            Script::Fragments(parts) => parts.iter().map(|p| Ok(p.to_string())).collect(),
            Script::FailAfter(parts) => parts
                .iter()
                .map(|p| Ok(p.to_string()))
                .chain(std::iter::once(Err(UpstreamError::new(
                    UpstreamErrorKind::Stream("connection reset".into()),
                )
                .into())))
                .collect(),
            Script::RateLimited => {
                return Err(UpstreamError::new(UpstreamErrorKind::RateLimited(
                    "Resource has been exhausted".into(),
                ))
                .into());
            }
        };
        Ok(Box::pin(futures::stream::iter(items)))
    }
}

fn app_with(driver: Arc<dyn ChatDriver>) -> Router {
    create_router(AppState::new(
        driver,
        Arc::new(InMemoryTodoStore::new()),
        Arc::new(NoteCatalog::mock()),
    ))
}

fn scripted_app(script: Script) -> (Router, Arc<AtomicUsize>) {
    let (driver, calls) = ScriptedDriver::new(script);
    (app_with(Arc::new(driver)), calls)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, HeaderMap, Bytes) {
    let mut request = Request::builder().method(method).uri(uri);
    if body.is_some() {
        request = request.header(header::CONTENT_TYPE, "application/json");
    }
    let request = request
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, bytes)
}

fn json_body(bytes: &Bytes) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

const HELLO_CHAT: &str = r#"{"messages":[{"role":"user","content":"Hello"}]}"#;

#[tokio::test]
async fn test_health() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    let (status, _, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body), json!({ "status": "healthy" }));
}

#[tokio::test]
async fn test_chat_streams_plain_text_with_model_header() {
    let (app, calls) = scripted_app(Script::Fragments(vec!["Hello", " world"]));
    let (status, headers, body) = send(&app, Method::POST, "/api/chat", Some(HELLO_CHAT)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(headers[MODEL_HEADER], "scripted-model");
    assert_eq!(&body[..], b"Hello world");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_chat_mid_stream_failure_appends_notice() {
    let (app, _) = scripted_app(Script::FailAfter(vec!["Partial"]));
    let (status, _, body) = send(&app, Method::POST, "/api/chat", Some(HELLO_CHAT)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        format!("Partial{}", STREAM_INTERRUPTED_NOTICE)
    );
}

#[tokio::test]
async fn test_chat_failure_before_first_fragment_is_only_notice() {
    let (app, _) = scripted_app(Script::FailAfter(vec![]));
    let (status, _, body) = send(&app, Method::POST, "/api/chat", Some(HELLO_CHAT)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], STREAM_INTERRUPTED_NOTICE.as_bytes());
}

#[tokio::test]
async fn test_chat_rejects_assistant_last_turn() {
    let (app, calls) = scripted_app(Script::Fragments(vec!["unused"]));
    let body = r#"{"messages":[{"role":"user","content":"hi"},{"role":"assistant","content":"hello"}]}"#;
    let (status, _, body) = send(&app, Method::POST, "/api/chat", Some(body)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body), json!({ "error": "No user message found" }));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_rejects_empty_history() {
    let (app, calls) = scripted_app(Script::Fragments(vec!["unused"]));
    let (status, _, body) = send(&app, Method::POST, "/api/chat", Some(r#"{"messages":[]}"#)).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(&body)["error"], "No user message found");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_chat_malformed_body() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    for body in ["not json", r#"{"messages":"hi"}"#, r#"{"history":[]}"#] {
        let (status, _, bytes) = send(&app, Method::POST, "/api/chat", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(&bytes), json!({ "error": "Invalid request format" }));
    }
}

#[tokio::test]
async fn test_chat_rate_limit_maps_to_429() {
    let (app, _) = scripted_app(Script::RateLimited);
    let (status, _, body) = send(&app, Method::POST, "/api/chat", Some(HELLO_CHAT)).await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(
        json_body(&body)["error"],
        "Rate limit exceeded: Resource has been exhausted"
    );
}

#[tokio::test]
async fn test_chat_missing_credential_reported_first() {
    let client = GeminiClient::new(
        GeminiConfig::builder()
            .base_url("http://127.0.0.1:9".to_string())
            .build()
            .unwrap(),
    );
    let app = app_with(Arc::new(client));

    for body in [HELLO_CHAT, "not json"] {
        let (status, _, bytes) = send(&app, Method::POST, "/api/chat", Some(body)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(&bytes),
            json!({ "error": "Google API key is not configured" })
        );
    }
}

#[tokio::test]
async fn test_todo_list_returns_seeds() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    let (status, _, body) = send(&app, Method::GET, "/api/todos", None).await;

    assert_eq!(status, StatusCode::OK);
    let todos = json_body(&body);
    assert_eq!(todos.as_array().unwrap().len(), 3);
    assert_eq!(todos[0]["title"], "Learn Next.js");
    assert_eq!(todos[1]["completed"], true);
    assert!(todos[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_todo_create_and_list() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    let (status, _, body) =
        send(&app, Method::POST, "/api/todos", Some(r#"{"title":"Ship it"}"#)).await;

    assert_eq!(status, StatusCode::CREATED);
    let created = json_body(&body);
    assert_eq!(created["title"], "Ship it");
    assert_eq!(created["completed"], false);

    let (_, _, body) = send(&app, Method::GET, "/api/todos", None).await;
    let todos = json_body(&body);
    assert_eq!(todos.as_array().unwrap().len(), 4);
    assert_eq!(todos[0]["id"], created["id"]);
}

#[tokio::test]
async fn test_todo_create_rejects_bad_titles() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    for body in ["{}", r#"{"title":5}"#, r#"{"title":""}"#, r#"{"title":null}"#] {
        let (status, _, bytes) = send(&app, Method::POST, "/api/todos", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {}", body);
        assert_eq!(
            json_body(&bytes),
            json!({ "error": "Title must be a valid string" })
        );
    }
}

#[tokio::test]
async fn test_todo_patch() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    let (status, _, body) = send(
        &app,
        Method::PATCH,
        "/api/todos",
        Some(r#"{"id":"1","completed":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(&body)["completed"], true);

    let (status, _, body) = send(
        &app,
        Method::PATCH,
        "/api/todos",
        Some(r#"{"id":"nope","completed":true}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json_body(&body), json!({ "error": "Todo not found" }));
}

#[tokio::test]
async fn test_todo_delete_always_succeeds() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    for id in ["2", "2", "unknown"] {
        let body = json!({ "id": id }).to_string();
        let (status, _, bytes) = send(&app, Method::DELETE, "/api/todos", Some(body.as_str())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&bytes), json!({ "success": true }));
    }

    let (_, _, body) = send(&app, Method::GET, "/api/todos", None).await;
    assert_eq!(json_body(&body).as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_notes_query_and_defaults() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));

    let (status, _, body) = send(&app, Method::GET, "/api/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    let out = json_body(&body);
    assert_eq!(out["total"], 4);
    assert_eq!(out["returned"], 4);

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/api/notes?query=eggs&filter=pending&maxResults=5",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let out = json_body(&body);
    assert_eq!(out["returned"], 1);
    assert_eq!(out["total"], 4);
    assert_eq!(out["notes"][0]["title"], "Shopping List");
}

#[tokio::test]
async fn test_notes_invalid_parameters() {
    let (app, _) = scripted_app(Script::Fragments(vec![]));
    for uri in [
        "/api/notes?maxResults=0",
        "/api/notes?maxResults=101",
        "/api/notes?filter=archived",
        "/api/notes?maxResults=many",
    ] {
        let (status, _, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert!(json_body(&body)["error"].is_string());
    }
}
