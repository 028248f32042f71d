//! Transport abstraction for the backend RPC.
//!
//! This module provides a pluggable transport layer that abstracts how a
//! [`Request`] reaches the backend and how its [`Response`] comes back
//! (HTTP, mock for testing).
//!
//! # Design
//!
//! The transport is request/response only:
//! - `submit()` delivers one request and returns the decoded response
//!
//! It does not interpret `success`; that is the command channel's job.
//!
//! # Example
//!
//! ```ignore
//! let transport = HttpTransport::new("http://127.0.0.1:3000/api")?;
//! let response = transport.submit(&Command::stop_server().to_request()).await?;
//! ```

mod http;
mod mock;

pub use http::HttpTransport;
pub use mock::MockTransport;

use async_trait::async_trait;
use mediasync_types::{Request, Response};
use thiserror::Error;

/// Transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The backend answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Http {
        /// The HTTP status code.
        status: u16,
    },

    /// The backend could not be reached.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,

    /// The backend answered with something that is not a response envelope.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Transport trait for submitting backend commands.
///
/// Implementations handle the underlying mechanism (HTTP, mock, etc).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Submit one request and wait for its response.
    async fn submit(&self, request: &Request) -> Result<Response, TransportError>;
}
