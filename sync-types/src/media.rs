//! Media entities exchanged with the backend.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a media file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video container (mp4, mkv, ...).
    Video,
    /// Audio file (mp3, flac, ...).
    Audio,
    /// Still image (jpg, png, ...).
    Image,
    /// Anything else.
    #[default]
    Unknown,
}

impl MediaKind {
    /// Lowercase name, as used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Image => "image",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this is one of the three recognized kinds.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaKind {
    type Err = std::convert::Infallible;

    /// Never fails: unrecognized names map to [`MediaKind::Unknown`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "image" => Self::Image,
            _ => Self::Unknown,
        })
    }
}

/// Anything that carries a file name the classifier can look at.
pub trait NamedFile {
    /// The file name, including its extension.
    fn file_name(&self) -> &str;
}

impl NamedFile for String {
    fn file_name(&self) -> &str {
        self
    }
}

impl NamedFile for &str {
    fn file_name(&self) -> &str {
        self
    }
}

/// A media file in a host or peer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    /// File name, unique within a listing.
    pub name: String,
    /// Size in bytes (0 when the listing does not report it).
    #[serde(default)]
    pub size: u64,
    /// Media kind. The backend calls this field `media_type`.
    #[serde(default, rename = "media_type", alias = "kind")]
    pub kind: MediaKind,
}

impl MediaFile {
    /// Create a listing entry.
    pub fn new(name: &str, size: u64, kind: MediaKind) -> Self {
        Self {
            name: name.to_string(),
            size,
            kind,
        }
    }
}

impl NamedFile for MediaFile {
    fn file_name(&self) -> &str {
        &self.name
    }
}

/// A file handed over by an external file picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    /// File name as reported by the picker.
    pub name: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl SelectedFile {
    /// Create a selected file entry.
    pub fn new(name: &str, size: u64) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

impl NamedFile for SelectedFile {
    fn file_name(&self) -> &str {
        &self.name
    }
}

/// A peer connected to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedPeer {
    /// Peer (client) identifier.
    pub id: String,
    /// When the peer connected, as reported by the backend.
    pub connected_time: String,
}

impl ConnectedPeer {
    /// Create a connected peer entry.
    pub fn new(id: &str, connected_time: &str) -> Self {
        Self {
            id: id.to_string(),
            connected_time: connected_time.to_string(),
        }
    }
}

/// Media delivered in answer to `request-media`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPayload {
    /// Name of the delivered file.
    pub filename: String,
    /// Base64-encoded file contents.
    pub data: String,
    /// Kind reported by the backend (`video`, `audio`, `image`).
    #[serde(default)]
    pub media_type: String,
}

impl fmt::Debug for MediaPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaPayload")
            .field("filename", &self.filename)
            .field("data", &format!("[{} encoded bytes]", self.data.len()))
            .field("media_type", &self.media_type)
            .finish()
    }
}
