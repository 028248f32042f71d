//! CommandChannel - one backend round trip per command.
//!
//! The channel turns a [`Command`] into a wire request, submits it through a
//! [`Transport`] and folds the answer into a [`CommandResult`]:
//!
//! ```text
//! 2xx, success=true   → Ok(data ∪ {"success": true})
//! 2xx, success=false  → Err(Backend(error or "Unknown error"))
//! non-2xx             → Err(Transport(Http { status }))
//! no answer in time   → Err(Transport(Timeout))
//! ```
//!
//! No retries, no queueing, and no controller state is touched here.

use std::time::Duration;

use mediasync_types::{Command, Response};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

use crate::transport::{Transport, TransportError};

/// Message used when the backend reports failure without saying why.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Outcome of a single command.
pub type CommandResult = Result<Map<String, Value>, CommandError>;

/// Command failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The request never produced a response envelope.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The backend answered `success: false`.
    #[error("{0}")]
    Backend(String),
}

/// Sends commands to the backend.
pub struct CommandChannel<T: Transport> {
    transport: T,
    timeout: Duration,
}

impl<T: Transport> CommandChannel<T> {
    /// Create a channel that bounds every command by `timeout`.
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// The per-command timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one command and interpret the response.
    pub async fn send(&self, command: &Command) -> CommandResult {
        debug!(command = %command.name(), "sending command");

        let request = command.to_request();
        let response = tokio::time::timeout(self.timeout, self.transport.submit(&request))
            .await
            .map_err(|_| TransportError::Timeout)??;

        let result = interpret(response);
        if let Err(e) = &result {
            debug!(command = %command.name(), error = %e, "command failed");
        }
        result
    }
}

/// Fold a response envelope into a [`CommandResult`].
pub fn interpret(response: Response) -> CommandResult {
    if !response.success {
        return Err(CommandError::Backend(
            response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
        ));
    }

    let mut data = match response.data {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    data.insert("success".to_string(), Value::Bool(true));
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use serde_json::json;

    fn channel() -> (CommandChannel<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let channel = CommandChannel::new(transport.clone(), Duration::from_secs(5));
        (channel, transport)
    }

    // ===========================================
    // Response Interpretation Tests
    // ===========================================

    #[test]
    fn success_merges_data_with_flag() {
        let data = interpret(Response::ok(json!({ "files": ["a.mp4"] }))).unwrap();
        assert_eq!(data["files"], json!(["a.mp4"]));
        assert_eq!(data["success"], json!(true));
    }

    #[test]
    fn success_without_object_data_is_empty() {
        for response in [Response::ok_empty(), Response::ok(json!([1, 2])), Response::ok(json!("x"))] {
            let data = interpret(response).unwrap();
            assert_eq!(data.len(), 1);
            assert_eq!(data["success"], json!(true));
        }
    }

    #[test]
    fn failure_carries_backend_message() {
        let result = interpret(Response::failure("Directory not found"));
        assert_eq!(
            result,
            Err(CommandError::Backend("Directory not found".to_string()))
        );
    }

    #[test]
    fn failure_without_message_is_unknown_error() {
        let response = Response {
            success: false,
            data: None,
            error: None,
        };
        let err = interpret(response).unwrap_err();
        assert_eq!(err.to_string(), "Unknown error");
    }

    // ===========================================
    // Round Trip Tests
    // ===========================================

    #[tokio::test]
    async fn send_submits_exactly_one_request() {
        let (channel, transport) = channel();
        transport.queue_ok_empty();

        channel.send(&Command::stream_media("a.mp4")).await.unwrap();

        let submitted = transport.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].params, json!({ "filename": "a.mp4" }));
    }

    #[tokio::test]
    async fn http_status_is_reported_verbatim() {
        let (channel, transport) = channel();
        transport.queue_http_status(500);

        let err = channel.send(&Command::stop_server()).await.unwrap_err();
        assert_eq!(err.to_string(), "HTTP error! status: 500");
    }

    #[tokio::test]
    async fn failed_send_is_not_retried() {
        let (channel, transport) = channel();
        transport.fail_next_submit("connection refused");
        transport.queue_ok_empty();

        assert!(channel.send(&Command::stop_server()).await.is_err());
        assert_eq!(transport.submitted().len(), 1);
        assert_eq!(transport.pending_responses(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_backend_times_out() {
        let transport = MockTransport::new();
        transport.set_delay(Duration::from_secs(60));
        transport.queue_ok_empty();
        let channel = CommandChannel::new(transport, Duration::from_secs(1));

        let err = channel.send(&Command::stop_server()).await.unwrap_err();
        assert_eq!(err, CommandError::Transport(TransportError::Timeout));
    }
}
