//! PeerController - the role that consumes media from a host.
//!
//! Owns the available-file listing and the player. Media requested from the
//! host is decoded and handed to the [`PlaybackController`] as a load.

use std::sync::Arc;
use std::time::Duration;

use mediasync_core::{listing_from_names, PlaybackState};
use mediasync_types::{Command, ConnectData, MediaFile, RequestMediaData};
use tokio::sync::Mutex;

use crate::channel::CommandChannel;
use crate::context::SessionRole;
use crate::error::{ControllerError, InFlightGuard};
use crate::feedback::{FeedbackSink, Severity};
use crate::playback::PlaybackController;
use crate::presentation::{PeerView, PlayerView, PresentationPort};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct PeerState {
    connected: bool,
    server_address: Option<String>,
    files: Vec<MediaFile>,
}

impl PeerState {
    fn view(&self) -> PeerView {
        PeerView {
            connected: self.connected,
            files: self.files.clone(),
        }
    }
}

/// Peer-side session controller.
pub struct PeerController<T: Transport> {
    channel: Arc<CommandChannel<T>>,
    feedback: Arc<FeedbackSink>,
    presentation: Arc<dyn PresentationPort>,
    state: Mutex<PeerState>,
    player: Mutex<PlaybackController>,
    guard: InFlightGuard,
}

impl<T: Transport> PeerController<T> {
    /// Create a disconnected peer controller with an idle player.
    pub fn new(
        channel: Arc<CommandChannel<T>>,
        feedback: Arc<FeedbackSink>,
        presentation: Arc<dyn PresentationPort>,
    ) -> Self {
        let player = PlaybackController::new(presentation.clone());
        Self {
            channel,
            feedback,
            presentation,
            state: Mutex::new(PeerState::default()),
            player: Mutex::new(player),
            guard: InFlightGuard::new(),
        }
    }

    /// Connect to the host at `address`, identifying as `client_id`.
    pub async fn connect(&self, address: &str, client_id: &str) -> Result<(), ControllerError> {
        let address = address.trim();
        let client_id = client_id.trim();
        if address.is_empty() {
            return Err(self.reject(ControllerError::Validation(
                "Please enter the server address".to_string(),
            )));
        }
        if client_id.is_empty() {
            return Err(self.reject(ControllerError::Validation(
                "Please enter a client ID".to_string(),
            )));
        }

        let _ticket = self.guard.acquire("connect").map_err(|e| self.reject(e))?;

        self.feedback.log(
            &format!("Connecting to {} as {}", address, client_id),
            Severity::Info,
        );

        let data = self
            .channel
            .send(&Command::connect_client(address, client_id))
            .await
            .map_err(|e| self.fail("Failed to connect", e.into()))?;
        let listing =
            ConnectData::from_data(&data).map_err(|e| self.fail("Failed to connect", e.into()))?;

        let offered = listing.files.len();
        let files = listing_from_names(listing.files);
        let view = {
            let mut state = self.state.lock().await;
            state.connected = true;
            state.server_address = Some(address.to_string());
            state.files = files;
            state.view()
        };
        self.presentation.render_peer(&view);

        self.feedback.report(
            &format!("Connected to {} ({} media files available)", address, view.files.len()),
            Severity::Success,
        );
        if offered > 0 && view.files.is_empty() {
            self.feedback.report(
                "The host offers no supported media files",
                Severity::Warning,
            );
        }
        Ok(())
    }

    /// Disconnect from the host and reset the player.
    pub async fn disconnect(&self) -> Result<(), ControllerError> {
        let _ticket = self.guard.acquire("disconnect").map_err(|e| self.reject(e))?;

        self.channel
            .send(&Command::disconnect_client())
            .await
            .map_err(|e| self.fail("Failed to disconnect", e.into()))?;

        let view = {
            let mut state = self.state.lock().await;
            *state = PeerState::default();
            state.view()
        };
        self.player.lock().await.clear();
        self.presentation.render_peer(&view);
        self.feedback.report("Disconnected from server", Severity::Info);
        Ok(())
    }

    /// Request `filename` from the host and play it.
    ///
    /// The player is only touched once the payload has been decoded.
    pub async fn request_media(&self, filename: &str) -> Result<(), ControllerError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(self.reject(ControllerError::Validation(
                "Please select a file to play".to_string(),
            )));
        }

        self.feedback
            .log(&format!("Requesting {}", filename), Severity::Info);

        let data = self
            .channel
            .send(&Command::request_media(filename))
            .await
            .map_err(|e| self.fail("Failed to request media", e.into()))?;
        let delivered = RequestMediaData::from_data(&data)
            .map_err(|e| self.fail("Failed to request media", e.into()))?;

        self.player
            .lock()
            .await
            .load(&delivered.media_data)
            .map_err(|e| self.fail("Failed to load media", e.into()))?;

        self.feedback.report(
            &format!("Now playing {}", delivered.media_data.filename),
            Severity::Success,
        );
        Ok(())
    }

    /// Start or resume playback.
    pub async fn play(&self) -> PlaybackState {
        self.player.lock().await.play()
    }

    /// Pause playback.
    pub async fn pause(&self) -> PlaybackState {
        self.player.lock().await.pause()
    }

    /// Stop playback and rewind.
    pub async fn stop(&self) -> PlaybackState {
        self.player.lock().await.stop()
    }

    /// Record playback progress reported by the surface.
    pub async fn advance(&self, elapsed: Duration) -> Duration {
        self.player.lock().await.advance(elapsed)
    }

    /// Whether a connection is active.
    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connected
    }

    /// Address of the connected host.
    pub async fn server_address(&self) -> Option<String> {
        self.state.lock().await.server_address.clone()
    }

    /// Files the host offers.
    pub async fn files(&self) -> Vec<MediaFile> {
        self.state.lock().await.files.clone()
    }

    /// Current player state.
    pub async fn playback_state(&self) -> PlaybackState {
        self.player.lock().await.state()
    }

    /// Player snapshot.
    pub async fn player_view(&self) -> PlayerView {
        self.player.lock().await.view()
    }

    /// Peer snapshot.
    pub async fn view(&self) -> PeerView {
        self.state.lock().await.view()
    }

    /// [`SessionRole::Peer`] while connected, else [`SessionRole::None`].
    pub async fn role(&self) -> SessionRole {
        if self.is_connected().await {
            SessionRole::Peer
        } else {
            SessionRole::None
        }
    }

    fn reject(&self, err: ControllerError) -> ControllerError {
        self.feedback.report(&err.to_string(), Severity::Error);
        err
    }

    fn fail(&self, what: &str, err: ControllerError) -> ControllerError {
        self.feedback
            .report(&format!("{}: {}", what, err), Severity::Error);
        err
    }
}
