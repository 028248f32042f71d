//! SyncContext - the one object a surface talks to.
//!
//! Built once at startup, it owns the command channel, the feedback sink and
//! both role controllers, and routes [`UiEvent`]s to them.
//!
//! ```text
//! UiEvent → SyncContext::dispatch → HostController / PeerController
//!                                         ↓
//!                                  CommandChannel → Transport → backend
//! ```

use std::sync::Arc;
use std::time::Duration;

use mediasync_types::{ConnectedPeer, SelectedFile};

use crate::channel::CommandChannel;
use crate::config::ClientConfig;
use crate::error::ControllerError;
use crate::feedback::FeedbackSink;
use crate::host::HostController;
use crate::peer::PeerController;
use crate::presentation::PresentationPort;
use crate::transport::{HttpTransport, Transport, TransportError};

/// Which side of a session this client is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionRole {
    /// No active session.
    #[default]
    None,
    /// Offering media to peers.
    Host,
    /// Consuming media from a host.
    Peer,
}

/// Everything a surface can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Start hosting with user-typed port and directory.
    StartHosting {
        /// Port as typed.
        port: String,
        /// Directory as typed.
        directory: String,
    },
    /// Stop hosting.
    StopHosting,
    /// Push one file to every peer.
    StreamToPeers {
        /// File to stream.
        filename: String,
    },
    /// A batch of files came from a file picker.
    SelectFiles(Vec<SelectedFile>),
    /// The backend pushed the full connected-peer list.
    PeersUpdated(Vec<ConnectedPeer>),
    /// Connect to a host.
    Connect {
        /// Host address as typed.
        address: String,
        /// Client identifier as typed.
        client_id: String,
    },
    /// Disconnect from the host.
    Disconnect,
    /// Ask the host for one file.
    RequestMedia {
        /// File to request.
        filename: String,
    },
    /// Player play button.
    Play,
    /// Player pause button.
    Pause,
    /// Player stop button.
    Stop,
    /// The surface played this much further.
    PlaybackProgress(Duration),
}

/// Owns the client side of a MediaSync session.
pub struct SyncContext<T: Transport> {
    config: ClientConfig,
    feedback: Arc<FeedbackSink>,
    host: HostController<T>,
    peer: PeerController<T>,
}

impl SyncContext<HttpTransport> {
    /// Build a context talking HTTP to `config.endpoint`.
    pub fn connect_http(
        config: ClientConfig,
        presentation: Arc<dyn PresentationPort>,
    ) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config.endpoint)?;
        Ok(Self::new(config, transport, presentation))
    }
}

impl<T: Transport> SyncContext<T> {
    /// Build the channel, sink and controllers.
    pub fn new(config: ClientConfig, transport: T, presentation: Arc<dyn PresentationPort>) -> Self {
        let channel = Arc::new(CommandChannel::new(transport, config.request_timeout()));
        let feedback = Arc::new(FeedbackSink::new(
            config.log_capacity,
            config.notification_duration(),
        ));
        let host = HostController::new(channel.clone(), feedback.clone(), presentation.clone());
        let peer = PeerController::new(channel, feedback.clone(), presentation);
        Self {
            config,
            feedback,
            host,
            peer,
        }
    }

    /// Route a surface event to its controller.
    ///
    /// Events that cannot fail (selection, peer updates, player controls)
    /// always return `Ok`.
    pub async fn dispatch(&self, event: UiEvent) -> Result<(), ControllerError> {
        match event {
            UiEvent::StartHosting { port, directory } => {
                self.host.start_hosting(&port, &directory).await
            }
            UiEvent::StopHosting => self.host.stop_hosting().await,
            UiEvent::StreamToPeers { filename } => self.host.stream_to_peers(&filename).await,
            UiEvent::SelectFiles(files) => {
                self.host.select_files(files).await;
                Ok(())
            }
            UiEvent::PeersUpdated(peers) => {
                self.host.apply_peer_snapshot(peers).await;
                Ok(())
            }
            UiEvent::Connect { address, client_id } => {
                self.peer.connect(&address, &client_id).await
            }
            UiEvent::Disconnect => self.peer.disconnect().await,
            UiEvent::RequestMedia { filename } => self.peer.request_media(&filename).await,
            UiEvent::Play => {
                self.peer.play().await;
                Ok(())
            }
            UiEvent::Pause => {
                self.peer.pause().await;
                Ok(())
            }
            UiEvent::Stop => {
                self.peer.stop().await;
                Ok(())
            }
            UiEvent::PlaybackProgress(elapsed) => {
                self.peer.advance(elapsed).await;
                Ok(())
            }
        }
    }

    /// The host controller.
    pub fn host(&self) -> &HostController<T> {
        &self.host
    }

    /// The peer controller.
    pub fn peer(&self) -> &PeerController<T> {
        &self.peer
    }

    /// The feedback sink.
    pub fn feedback(&self) -> &Arc<FeedbackSink> {
        &self.feedback
    }

    /// The configuration the context was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Active roles. Empty when no session is active.
    pub async fn roles(&self) -> Vec<SessionRole> {
        let mut roles = Vec::with_capacity(2);
        if self.host.is_hosting().await {
            roles.push(SessionRole::Host);
        }
        if self.peer.is_connected().await {
            roles.push(SessionRole::Peer);
        }
        roles
    }
}
