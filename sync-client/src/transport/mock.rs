//! Mock transport for testing.
//!
//! Allows queueing responses and capturing submitted requests for verification.

use super::{Transport, TransportError};
use async_trait::async_trait;
use mediasync_types::{CommandName, Request, Response};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock transport for testing.
///
/// Allows queueing responses and capturing submitted requests for verification.
/// Clones share state, so a test can keep one clone while the client owns
/// another.
#[derive(Debug, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockTransportInner>>,
}

#[derive(Debug, Default)]
struct MockTransportInner {
    submitted: Vec<Request>,
    responses: VecDeque<Result<Response, TransportError>>,
    fail_next: Option<TransportError>,
    delay: Option<Duration>,
}

impl MockTransport {
    /// Create a new mock transport.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response to be returned by the next `submit()` call.
    pub fn queue_response(&self, response: Response) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(Ok(response));
    }

    /// Queue a successful response carrying `data`.
    pub fn queue_ok(&self, data: Value) {
        self.queue_response(Response::ok(data));
    }

    /// Queue a successful response without data.
    pub fn queue_ok_empty(&self) {
        self.queue_response(Response::ok_empty());
    }

    /// Queue a `success: false` response with the given error message.
    pub fn queue_failure(&self, error: &str) {
        self.queue_response(Response::failure(error));
    }

    /// Queue a transport-level error.
    pub fn queue_error(&self, error: TransportError) {
        let mut inner = self.inner.lock().unwrap();
        inner.responses.push_back(Err(error));
    }

    /// Queue a non-2xx HTTP status.
    pub fn queue_http_status(&self, status: u16) {
        self.queue_error(TransportError::Http { status });
    }

    /// Cause the next `submit()` to fail with a connection error.
    pub fn fail_next_submit(&self, error: &str) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_next = Some(TransportError::ConnectionFailed(error.to_string()));
    }

    /// Delay every `submit()` by `delay` before answering.
    pub fn set_delay(&self, delay: Duration) {
        let mut inner = self.inner.lock().unwrap();
        inner.delay = Some(delay);
    }

    /// Get all requests that were submitted.
    pub fn submitted(&self) -> Vec<Request> {
        let inner = self.inner.lock().unwrap();
        inner.submitted.clone()
    }

    /// Get the names of all submitted commands, in order.
    pub fn submitted_commands(&self) -> Vec<CommandName> {
        let inner = self.inner.lock().unwrap();
        inner.submitted.iter().map(|r| r.command).collect()
    }

    /// Get the last submitted request.
    pub fn last_submitted(&self) -> Option<Request> {
        let inner = self.inner.lock().unwrap();
        inner.submitted.last().cloned()
    }

    /// Number of responses still queued.
    pub fn pending_responses(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.responses.len()
    }

    /// Clear all state (requests, queue, forced failures, delay).
    pub fn reset(&self) {
        let mut inner = self.inner.lock().unwrap();
        *inner = MockTransportInner::default();
    }
}

impl Clone for MockTransport {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn submit(&self, request: &Request) -> Result<Response, TransportError> {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.submitted.push(request.clone());
            inner.delay
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut inner = self.inner.lock().unwrap();

        // Check for forced failure
        if let Some(error) = inner.fail_next.take() {
            return Err(error);
        }

        inner.responses.pop_front().unwrap_or_else(|| {
            Err(TransportError::ConnectionFailed(
                "no response queued".to_string(),
            ))
        })
    }
}
