//! # mediasync-client
//!
//! Client-side session controller for MediaSync.
//!
//! This is the library a surface (desktop UI, terminal, test harness) embeds
//! to host media or consume it from a host through the MediaSync backend.
//!
//! ## Features
//!
//! - **Command Channel**: one round trip per backend command, bounded by a timeout
//! - **Transport Abstraction**: pluggable transport layer (HTTP, mock)
//! - **Role Controllers**: host and peer sessions with local input validation
//! - **Playback**: drives the pure state machine from mediasync-core
//! - **Feedback**: timestamped activity log and transient notifications
//!
//! ## Example
//!
//! ```ignore
//! use mediasync_client::{ClientConfig, NullPresentation, SyncContext, UiEvent};
//! use std::sync::Arc;
//!
//! let context = SyncContext::connect_http(ClientConfig::default(), Arc::new(NullPresentation::new()))?;
//!
//! context
//!     .dispatch(UiEvent::Connect {
//!         address: "127.0.0.1:8080".into(),
//!         client_id: "living-room".into(),
//!     })
//!     .await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod channel;
pub mod config;
pub mod context;
pub mod error;
pub mod feedback;
pub mod host;
pub mod peer;
pub mod playback;
pub mod presentation;
pub mod transport;

pub use channel::{CommandChannel, CommandError, CommandResult};
pub use config::{ClientConfig, ConfigError};
pub use context::{SessionRole, SyncContext, UiEvent};
pub use error::{ControllerError, InFlightGuard};
pub use feedback::{FeedbackSink, LogEntry, Notification, Severity};
pub use host::HostController;
pub use peer::PeerController;
pub use playback::PlaybackController;
pub use presentation::{
    HostView, MediaResource, NullPresentation, PeerView, PlayerView, PresentationPort,
    RecordingPresentation, ResourceHandle, SelectionView,
};
pub use transport::{HttpTransport, MockTransport, Transport, TransportError};
