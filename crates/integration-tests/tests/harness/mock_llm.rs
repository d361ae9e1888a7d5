//! Mock chat completions server for integration tests
//!
//! Serves `POST /v1/chat/completions` with a canned reply and records every
//! request it receives.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use futures_util::stream;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// What the mock answers with
#[derive(Debug, Clone)]
pub enum Reply {
    /// `200` with a JSON body
    Json(Value),
    /// `200` with a raw body, sent as-is
    Raw(&'static str),
    /// `200` SSE body written chunk by chunk
    Sse(Vec<Vec<u8>>),
    /// Error status with an OpenAI-style error body
    Status(StatusCode),
}

/// A request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Parsed JSON body
    pub body: Value,
    /// `Authorization` header, if sent
    pub authorization: Option<String>,
    /// `Content-Type` header, if sent
    pub content_type: Option<String>,
}

struct MockLlmState {
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock chat completions backend
pub struct MockLlm {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockLlmState>,
}

impl MockLlm {
    /// Start the mock server with a fixed reply, returning immediately
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockLlmState {
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/chat/completions", routing::post(handle_chat_completions))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Start a mock answering with a single `stop` completion of `content`
    pub async fn start_with_text(content: &str) -> anyhow::Result<Self> {
        Self::start(Reply::Json(completion(content, "stop"))).await
    }

    /// Start a mock streaming the given SSE chunks
    pub async fn start_streaming<I, S>(chunks: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<Vec<u8>>,
    {
        Self::start(Reply::Sse(chunks.into_iter().map(Into::into).collect())).await
    }

    /// API base URL, including `/v1`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// The most recent request
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests().pop()
    }
}

impl Drop for MockLlm {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Build a non-streaming chat completion body
pub fn completion(content: &str, finish_reason: &str) -> Value {
    json!({
        "id": "chatcmpl-test-123",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "mock-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": finish_reason
        }],
        "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
    })
}

/// Build one SSE `data:` line carrying a content delta
pub fn delta_frame(content: &str, finish_reason: Option<&str>) -> String {
    let chunk = json!({
        "id": "chatcmpl-test-stream",
        "object": "chat.completion.chunk",
        "created": 1_700_000_000,
        "model": "mock-model",
        "choices": [{"index": 0, "delta": {"content": content}, "finish_reason": finish_reason}]
    });

    format!("data: {chunk}\n\n")
}

async fn handle_chat_completions(
    State(state): State<Arc<MockLlmState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let header_value = |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(str::to_owned);

    if let Ok(mut requests) = state.requests.lock() {
        requests.push(RecordedRequest {
            body,
            authorization: header_value(header::AUTHORIZATION),
            content_type: header_value(header::CONTENT_TYPE),
        });
    }

    match &state.reply {
        Reply::Json(value) => Json(value.clone()).into_response(),
        Reply::Raw(text) => (StatusCode::OK, *text).into_response(),
        Reply::Sse(chunks) => {
            let chunks = chunks.clone().into_iter().map(Ok::<_, Infallible>);
            Response::builder()
                .header(header::CONTENT_TYPE, "text/event-stream")
                .body(Body::from_stream(stream::iter(chunks)))
                .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
        }
        Reply::Status(status) => (
            *status,
            Json(json!({
                "error": {
                    "message": "mock server intentional failure",
                    "type": "server_error"
                }
            })),
        )
            .into_response(),
    }
}
