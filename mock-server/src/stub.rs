//! Scripted HTTP server for client tests.
//!
//! Every incoming request, whatever its method or path, is recorded and
//! answered with the next enqueued response. An empty queue answers 500.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};

/// A request as the stub received it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Default)]
struct StubState {
    queue: VecDeque<(StatusCode, String)>,
    recorded: Vec<RecordedRequest>,
}

#[derive(Debug, Clone, Default)]
pub struct Stub {
    state: Arc<Mutex<StubState>>,
}

impl Stub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response. Unknown status codes fall back to 500.
    pub fn enqueue(&self, status: u16, body: impl Into<String>) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.lock().queue.push_back((status, body.into()));
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().recorded.clone()
    }

    pub fn router(&self) -> Router {
        Router::new().fallback(respond).with_state(self.clone())
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn respond(
    State(stub): State<Stub>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let recorded = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body,
    };
    tracing::debug!(method = %recorded.method, path = %recorded.path, "stub received request");

    let mut state = stub.lock();
    state.recorded.push(recorded);
    match state.queue.pop_front() {
        Some((status, body)) => (status, body).into_response(),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "no response enqueued").into_response(),
    }
}
