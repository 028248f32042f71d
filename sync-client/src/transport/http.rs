//! HttpTransport - JSON over HTTP to the backend's command endpoint.
//!
//! Every request is a `POST` of the `{command, params}` envelope; the body of
//! a 2xx answer is decoded as the `{success, data, error}` envelope.

use super::{Transport, TransportError};
use async_trait::async_trait;
use mediasync_types::{Request, Response};
use reqwest::Client;

const USER_AGENT: &str = concat!("mediasync/", env!("CARGO_PKG_VERSION"));

/// HTTP transport for the backend RPC endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport posting to `endpoint` (e.g. `http://127.0.0.1:3000/api`).
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::ConnectionFailed(e.to_string()))?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Create a transport from a preconfigured client.
    pub fn with_client(http: Client, endpoint: &str) -> Self {
        Self {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    /// The endpoint requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::Timeout
        } else if let Some(status) = e.status() {
            TransportError::Http {
                status: status.as_u16(),
            }
        } else {
            TransportError::ConnectionFailed(e.to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn submit(&self, request: &Request) -> Result<Response, TransportError> {
        let resp = self.http.post(&self.endpoint).json(request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
            });
        }

        resp.json::<Response>()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use mediasync_types::{Command, CommandName};
    use serde_json::json;

    /// Serve `app` on an ephemeral port and return its `/api` URL.
    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    async fn echo_command(Json(request): Json<Request>) -> Json<Response> {
        match request.command {
            CommandName::StopServer => Json(Response::ok_empty()),
            CommandName::StreamMedia => Json(Response::ok(json!({
                "echo": request.params["filename"].clone()
            }))),
            _ => Json(Response::failure("Unknown command")),
        }
    }

    #[tokio::test]
    async fn posts_envelope_and_decodes_response() {
        let endpoint = spawn_backend(Router::new().route("/api", post(echo_command))).await;
        let transport = HttpTransport::new(&endpoint).unwrap();

        let response = transport
            .submit(&Command::stream_media("a.mp4").to_request())
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(json!({ "echo": "a.mp4" })));

        let response = transport
            .submit(&Command::disconnect_client().to_request())
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown command"));
    }

    #[tokio::test]
    async fn non_2xx_status_is_http_error() {
        let app = Router::new().route(
            "/api",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let endpoint = spawn_backend(app).await;
        let transport = HttpTransport::new(&endpoint).unwrap();

        let result = transport
            .submit(&Command::stop_server().to_request())
            .await;
        assert_eq!(result, Err(TransportError::Http { status: 500 }));
        assert_eq!(
            result.unwrap_err().to_string(),
            "HTTP error! status: 500"
        );
    }

    #[tokio::test]
    async fn non_envelope_body_is_invalid_response() {
        let app = Router::new().route("/api", post(|| async { "not json" }));
        let endpoint = spawn_backend(app).await;
        let transport = HttpTransport::new(&endpoint).unwrap();

        let result = transport
            .submit(&Command::stop_server().to_request())
            .await;
        assert!(matches!(result, Err(TransportError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn unreachable_backend_is_connection_failure() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let transport = HttpTransport::new(&format!("http://{}/api", addr)).unwrap();
        let result = transport
            .submit(&Command::stop_server().to_request())
            .await;
        assert!(matches!(result, Err(TransportError::ConnectionFailed(_))));
    }
}
