//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use wordgrid_api::{AppState, build_app};
use wordgrid_core::config::AppConfig;
use wordgrid_engine::SessionEngine;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Engine behind the router, for direct inspection
    pub engine: Arc<SessionEngine>,
}

impl TestApp {
    /// Create a test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with the given configuration
    pub fn with_config(config: AppConfig) -> Self {
        let config = Arc::new(config);
        let engine =
            Arc::new(SessionEngine::from_config(&config).expect("Failed to build session engine"));
        let router = build_app(AppState::new(config, Arc::clone(&engine)));

        Self { router, engine }
    }

    /// Make an HTTP request with an optional JSON body
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();
        self.request_raw(method, path, body_str).await
    }

    /// Make an HTTP request with a raw body sent as JSON
    pub async fn request_raw(&self, method: &str, path: &str, body: String) -> TestResponse {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a game and return its JSON view
    pub async fn create_game(&self, query: &str) -> Value {
        let response = self.request("POST", &format!("/api/game{query}"), None).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        response.body
    }

    /// Reveal a word and return the response
    pub async fn open(&self, id: &str, idx: i64) -> TestResponse {
        self.request(
            "POST",
            &format!("/api/game/{id}/open"),
            Some(serde_json::json!({ "idx": idx })),
        )
        .await
    }

    /// Open the event stream of a game
    pub async fn subscribe(&self, id: &str) -> (StatusCode, Option<String>, EventStream) {
        let req = Request::builder()
            .method("GET")
            .uri(format!("/api/game/{id}/subscribe"))
            .body(Body::empty())
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        (
            status,
            content_type,
            EventStream {
                body: response.into_body(),
                buffer: String::new(),
            },
        )
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// One parsed Server-Sent Event
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SseEvent {
    /// `id:` field
    pub id: Option<u64>,
    /// `event:` field
    pub event: String,
    /// Joined `data:` lines
    pub data: String,
}

impl SseEvent {
    /// Data parsed as JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.data).expect("Event data is not JSON")
    }
}

/// Outcome of waiting for the next event
#[derive(Debug, PartialEq)]
pub enum Next {
    /// An event arrived
    Event(SseEvent),
    /// The stream ended
    Ended,
    /// Nothing arrived in time
    Timeout,
}

impl Next {
    /// The event, panicking on anything else
    pub fn event(self) -> SseEvent {
        match self {
            Next::Event(event) => event,
            other => panic!("Expected an event, got {other:?}"),
        }
    }
}

/// Reader over an SSE response body
pub struct EventStream {
    body: Body,
    buffer: String,
}

impl EventStream {
    /// Wait up to `wait` for the next event
    pub async fn next_within(&mut self, wait: Duration) -> Next {
        match tokio::time::timeout(wait, self.next_event()).await {
            Ok(Some(event)) => Next::Event(event),
            Ok(None) => Next::Ended,
            Err(_) => Next::Timeout,
        }
    }

    /// Wait for the next event; `None` once the stream ends
    pub async fn next_event(&mut self) -> Option<SseEvent> {
        loop {
            if let Some(pos) = self.buffer.find("\n\n") {
                let block: String = self.buffer.drain(..pos + 2).collect();
                if block.trim().is_empty() {
                    continue;
                }
                return Some(parse_event(&block));
            }

            let frame = self.body.frame().await?.ok()?;
            if let Ok(data) = frame.into_data() {
                self.buffer.push_str(&String::from_utf8_lossy(&data));
            }
        }
    }
}

fn parse_event(block: &str) -> SseEvent {
    let mut event = SseEvent::default();
    for line in block.lines() {
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.strip_prefix(' ').unwrap_or(value);
        match field {
            "id" => event.id = value.parse().ok(),
            "event" => event.event = value.to_string(),
            "data" => event.data.push_str(value),
            _ => {}
        }
    }
    event
}
