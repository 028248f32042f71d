//! Backend commands and the request/response envelope.
//!
//! Every operation the client issues is a single [`Command`], serialized as
//! `{"command": "<name>", "params": {...}}`. The backend answers with a
//! [`Response`] of the shape `{"success": bool, "data"?: {...}, "error"?: "..."}`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// The enumerated command set understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandName {
    /// Start hosting a media directory.
    StartServer,
    /// Stop hosting.
    StopServer,
    /// Connect to a host as a peer.
    ConnectClient,
    /// Disconnect the peer session.
    DisconnectClient,
    /// Ask the host for one media file.
    RequestMedia,
    /// Ask the host to push one media file to every peer.
    StreamMedia,
}

impl CommandName {
    /// Wire name of the command.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartServer => "start-server",
            Self::StopServer => "stop-server",
            Self::ConnectClient => "connect-client",
            Self::DisconnectClient => "disconnect-client",
            Self::RequestMedia => "request-media",
            Self::StreamMedia => "stream-media",
        }
    }
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single backend command. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    name: CommandName,
    params: Map<String, Value>,
}

impl Command {
    /// `start-server {port, directory}`
    pub fn start_server(port: u16, directory: &str) -> Self {
        Self::with_params(
            CommandName::StartServer,
            json!({ "port": port, "directory": directory }),
        )
    }

    /// `stop-server {}`
    pub fn stop_server() -> Self {
        Self::bare(CommandName::StopServer)
    }

    /// `connect-client {serverAddress, clientId}`
    pub fn connect_client(server_address: &str, client_id: &str) -> Self {
        Self::with_params(
            CommandName::ConnectClient,
            json!({ "serverAddress": server_address, "clientId": client_id }),
        )
    }

    /// `disconnect-client {}`
    pub fn disconnect_client() -> Self {
        Self::bare(CommandName::DisconnectClient)
    }

    /// `request-media {filename}`
    pub fn request_media(filename: &str) -> Self {
        Self::with_params(CommandName::RequestMedia, json!({ "filename": filename }))
    }

    /// `stream-media {filename}`
    pub fn stream_media(filename: &str) -> Self {
        Self::with_params(CommandName::StreamMedia, json!({ "filename": filename }))
    }

    fn bare(name: CommandName) -> Self {
        Self {
            name,
            params: Map::new(),
        }
    }

    fn with_params(name: CommandName, params: Value) -> Self {
        let params = match params {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self { name, params }
    }

    /// The command name.
    pub fn name(&self) -> CommandName {
        self.name
    }

    /// The command parameters.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Build the wire request for this command.
    pub fn to_request(&self) -> Request {
        Request {
            command: self.name,
            params: Value::Object(self.params.clone()),
        }
    }
}

/// Wire request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Command name.
    pub command: CommandName,
    /// Command parameters (always an object).
    pub params: Value,
}

/// Wire response body.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Response {
    /// Whether the backend carried out the command.
    pub success: bool,
    /// Result payload on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Failure message when `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    /// A successful response carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// A successful response with no data.
    pub fn ok_empty() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
        }
    }

    /// A failed response carrying an error message.
    pub fn failure(error: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_names_are_kebab_case_on_the_wire() {
        let request = Command::stop_server().to_request();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["command"], "stop-server");
        assert_eq!(json["params"], json!({}));

        for name in [
            CommandName::StartServer,
            CommandName::StopServer,
            CommandName::ConnectClient,
            CommandName::DisconnectClient,
            CommandName::RequestMedia,
            CommandName::StreamMedia,
        ] {
            let encoded = serde_json::to_value(name).unwrap();
            assert_eq!(encoded, Value::String(name.as_str().to_string()));
        }
    }

    #[test]
    fn start_server_params_carry_integer_port() {
        let command = Command::start_server(8080, "C:\\Media");
        assert_eq!(command.name(), CommandName::StartServer);
        assert_eq!(command.params()["port"], json!(8080));
        assert_eq!(command.params()["directory"], json!("C:\\Media"));
    }

    #[test]
    fn connect_client_uses_camel_case_params() {
        let command = Command::connect_client("127.0.0.1:8080", "client1");
        let request = serde_json::to_value(command.to_request()).unwrap();
        assert_eq!(request["params"]["serverAddress"], "127.0.0.1:8080");
        assert_eq!(request["params"]["clientId"], "client1");
    }

    #[test]
    fn response_parses_without_optional_fields() {
        let response: Response = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.success);
        assert!(response.data.is_none());
        assert!(response.error.is_none());

        let response: Response =
            serde_json::from_str(r#"{"success":false,"error":"Unknown command","data":null}"#)
                .unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown command"));
    }
}
