//! Mock prediction service lifecycle
//!
//! Each test spawns its own service on a random port. Replies are scripted
//! per request text, with a default for everything else, and every request
//! body is recorded for later inspection.

use super::constants::*;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// What the mock service answers with.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[derive(Default)]
struct MockState {
    default_reply: Mutex<Option<MockReply>>,
    replies_by_text: Mutex<HashMap<String, MockReply>>,
    requests: Mutex<Vec<Value>>,
}

async fn predict(State(state): State<Arc<MockState>>, body: String) -> Response {
    let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
    let text = request
        .get("text")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    state.requests.lock().unwrap().push(request);

    let reply = state
        .replies_by_text
        .lock()
        .unwrap()
        .get(&text)
        .cloned()
        .or_else(|| state.default_reply.lock().unwrap().clone())
        .unwrap_or_else(|| MockReply::json("[]"));

    if let Some(delay) = reply.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        reply.body,
    )
        .into_response()
}

/// Mock prediction service
///
/// When dropped, the service gracefully shuts down.
pub struct MockPredictionService {
    /// Base URL of the service (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    state: Arc<MockState>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockPredictionService {
    /// Spawns a service answering every request with `reply`.
    pub async fn spawn(reply: MockReply) -> Self {
        let state = Arc::new(MockState::default());
        *state.default_reply.lock().unwrap() = Some(reply);

        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .route(PREDICT_PATH, post(predict))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock service failed");
        });

        let service = Self {
            base_url: format!("http://127.0.0.1:{}", port),
            state,
            _shutdown_tx: Some(shutdown_tx),
        };

        service.wait_for_ready().await;

        service
    }

    /// Full URL of the prediction route.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, PREDICT_PATH)
    }

    /// Scripts the reply for requests carrying exactly `text`.
    pub fn reply_for(&self, text: &str, reply: MockReply) {
        self.state
            .replies_by_text
            .lock()
            .unwrap()
            .insert(text.to_string(), reply);
    }

    /// Request bodies received so far, in arrival order.
    pub fn requests(&self) -> Vec<Value> {
        self.state.requests.lock().unwrap().clone()
    }

    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Mock service did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for MockPredictionService {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An endpoint on which nothing is listening.
pub async fn unreachable_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let port = listener
        .local_addr()
        .expect("Failed to get local address")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, PREDICT_PATH)
}
