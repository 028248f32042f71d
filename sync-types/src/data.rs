//! Typed views of the `data` object returned by successful commands.
//!
//! The command channel hands controllers a plain JSON map (the response
//! `data` merged with `"success": true`). These helpers pull the fields each
//! command documents out of that map.

use base64::{engine::general_purpose, Engine as _};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{CommandName, ConnectedPeer, MediaFile, MediaPayload, PayloadError};

/// Data returned by `start-server`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StartServerData {
    /// Media files the host loaded.
    #[serde(default)]
    pub files: Vec<MediaFile>,
    /// Peers already connected, when the backend reports them.
    #[serde(default)]
    pub peers: Vec<ConnectedPeer>,
}

/// Data returned by `connect-client`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConnectData {
    /// Names of the files the host offers.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Data returned by `request-media`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestMediaData {
    /// The delivered media.
    pub media_data: MediaPayload,
}

impl StartServerData {
    /// Read `start-server` data. Missing listings default to empty.
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, PayloadError> {
        from_map(CommandName::StartServer, data)
    }
}

impl ConnectData {
    /// Read `connect-client` data. A missing listing defaults to empty.
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, PayloadError> {
        from_map(CommandName::ConnectClient, data)
    }
}

impl RequestMediaData {
    /// Read `request-media` data. `mediaData` is required.
    pub fn from_data(data: &Map<String, Value>) -> Result<Self, PayloadError> {
        match data.get("mediaData") {
            None | Some(Value::Null) => Err(PayloadError::MissingField {
                command: CommandName::RequestMedia,
                field: "mediaData",
            }),
            Some(_) => from_map(CommandName::RequestMedia, data),
        }
    }
}

impl MediaPayload {
    /// Build a payload by base64-encoding `bytes`.
    pub fn from_bytes(filename: &str, bytes: &[u8], media_type: &str) -> Self {
        Self {
            filename: filename.to_string(),
            data: general_purpose::STANDARD.encode(bytes),
            media_type: media_type.to_string(),
        }
    }

    /// Decode the base64 transport encoding into raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, PayloadError> {
        Ok(general_purpose::STANDARD.decode(self.data.trim())?)
    }
}

fn from_map<T: DeserializeOwned>(
    command: CommandName,
    data: &Map<String, Value>,
) -> Result<T, PayloadError> {
    serde_json::from_value(Value::Object(data.clone()))
        .map_err(|source| PayloadError::Malformed { command, source })
}
