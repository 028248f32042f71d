//! HostController - the role that offers media to peers.
//!
//! Owns the loaded file listing and the connected-peer list. Both are only
//! ever replaced wholesale (from a backend listing) or cleared wholesale (on
//! stop). User input is checked locally before any command is sent.

use std::sync::Arc;

use mediasync_core::{
    classify, filter_media, is_valid_path, media_listing, normalize_directory, selection_summary,
};
use mediasync_types::{Command, ConnectedPeer, MediaFile, SelectedFile, StartServerData};
use tokio::sync::Mutex;
use tracing::debug;

use crate::channel::CommandChannel;
use crate::context::SessionRole;
use crate::error::{ControllerError, InFlightGuard};
use crate::feedback::{FeedbackSink, Severity};
use crate::presentation::{HostView, PresentationPort, SelectionView};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct HostState {
    active: bool,
    files: Vec<MediaFile>,
    peers: Vec<ConnectedPeer>,
    selection: Vec<MediaFile>,
}

impl HostState {
    fn view(&self) -> HostView {
        HostView {
            active: self.active,
            files: self.files.clone(),
            peers: self.peers.clone(),
        }
    }
}

/// Host-side session controller.
pub struct HostController<T: Transport> {
    channel: Arc<CommandChannel<T>>,
    feedback: Arc<FeedbackSink>,
    presentation: Arc<dyn PresentationPort>,
    state: Mutex<HostState>,
    guard: InFlightGuard,
}

impl<T: Transport> HostController<T> {
    /// Create an inactive host controller.
    pub fn new(
        channel: Arc<CommandChannel<T>>,
        feedback: Arc<FeedbackSink>,
        presentation: Arc<dyn PresentationPort>,
    ) -> Self {
        Self {
            channel,
            feedback,
            presentation,
            state: Mutex::new(HostState::default()),
            guard: InFlightGuard::new(),
        }
    }

    /// Start hosting the media in `raw_directory` on `port`.
    ///
    /// Both inputs come straight from the user. The port must be a non-zero
    /// number and the directory must look like a filesystem path; otherwise
    /// the call fails without contacting the backend.
    pub async fn start_hosting(&self, port: &str, raw_directory: &str) -> Result<(), ControllerError> {
        let port = parse_port(port).map_err(|e| self.reject(e))?;

        let directory = normalize_directory(raw_directory);
        if directory.is_empty() {
            return Err(self.reject(ControllerError::Validation(
                "Please enter a media directory path".to_string(),
            )));
        }
        if !is_valid_path(&directory) {
            return Err(self.reject(ControllerError::PathRejected(format!(
                "\"{}\" does not look like a directory path. Type the full folder path, \
                 for example C:\\Users\\you\\Videos or /home/you/Videos",
                directory
            ))));
        }

        let _ticket = self.guard.acquire("start hosting").map_err(|e| self.reject(e))?;

        self.feedback.log(
            &format!("Starting server on port {} with directory: {}", port, directory),
            Severity::Info,
        );

        let data = self
            .channel
            .send(&Command::start_server(port, &directory))
            .await
            .map_err(|e| self.fail("Failed to start server", e.into()))?;
        let listing = StartServerData::from_data(&data)
            .map_err(|e| self.fail("Failed to start server", e.into()))?;

        let reported = listing.files.len();
        let files = media_listing(listing.files);
        let view = {
            let mut state = self.state.lock().await;
            state.active = true;
            state.files = files;
            state.peers = listing.peers;
            state.view()
        };
        self.presentation.render_host(&view);

        self.feedback.report(
            &format!("Server started on port {} with {} media files", port, view.files.len()),
            Severity::Success,
        );
        if view.files.is_empty() {
            debug!(reported, "no recognized media in host listing");
            self.feedback
                .report("No media files found in the directory", Severity::Warning);
        }
        Ok(())
    }

    /// Stop hosting. Safe to call when not hosting.
    pub async fn stop_hosting(&self) -> Result<(), ControllerError> {
        let _ticket = self.guard.acquire("stop hosting").map_err(|e| self.reject(e))?;

        self.channel
            .send(&Command::stop_server())
            .await
            .map_err(|e| self.fail("Failed to stop server", e.into()))?;

        let view = {
            let mut state = self.state.lock().await;
            state.active = false;
            state.files.clear();
            state.peers.clear();
            state.view()
        };
        self.presentation.render_host(&view);
        self.feedback.report("Server stopped", Severity::Info);
        Ok(())
    }

    /// Ask the backend to push `filename` to every connected peer.
    ///
    /// Success only means the backend accepted the request.
    pub async fn stream_to_peers(&self, filename: &str) -> Result<(), ControllerError> {
        let filename = filename.trim();
        if filename.is_empty() {
            return Err(self.reject(ControllerError::Validation(
                "Please select a file to stream".to_string(),
            )));
        }

        self.channel
            .send(&Command::stream_media(filename))
            .await
            .map_err(|e| self.fail("Failed to stream media", e.into()))?;

        self.feedback.report(
            &format!("Streaming {} to all connected clients", filename),
            Severity::Success,
        );
        Ok(())
    }

    /// Take a batch of locally picked files.
    ///
    /// Non-media entries are dropped. If nothing usable remains the previous
    /// selection is kept and `None` is returned.
    pub async fn select_files(&self, files: Vec<SelectedFile>) -> Option<SelectionView> {
        if files.is_empty() {
            return None;
        }

        let picked = files.len();
        let media = filter_media(files);
        if media.is_empty() {
            self.feedback.report(
                &format!("None of the {} selected files is a supported media file", picked),
                Severity::Warning,
            );
            return None;
        }

        let selection: Vec<MediaFile> = media
            .into_iter()
            .map(|f| {
                let kind = classify(&f.name);
                MediaFile::new(&f.name, f.size, kind)
            })
            .collect();
        let view = SelectionView {
            summary: selection_summary(selection.len()),
            files: selection.clone(),
        };

        self.state.lock().await.selection = selection;
        self.presentation.render_selection(&view);
        self.feedback.log(
            &format!("Selected {} media files", view.files.len()),
            Severity::Info,
        );
        Some(view)
    }

    /// Replace the connected-peer list with a snapshot pushed by the backend.
    ///
    /// Ignored (returns `false`) unless hosting is active.
    pub async fn apply_peer_snapshot(&self, peers: Vec<ConnectedPeer>) -> bool {
        let view = {
            let mut state = self.state.lock().await;
            if !state.active {
                debug!(count = peers.len(), "ignoring peer snapshot while not hosting");
                return false;
            }
            state.peers = peers;
            state.view()
        };
        self.presentation.render_host(&view);
        true
    }

    /// Whether hosting is active.
    pub async fn is_hosting(&self) -> bool {
        self.state.lock().await.active
    }

    /// The loaded media listing.
    pub async fn files(&self) -> Vec<MediaFile> {
        self.state.lock().await.files.clone()
    }

    /// The connected peers.
    pub async fn peers(&self) -> Vec<ConnectedPeer> {
        self.state.lock().await.peers.clone()
    }

    /// The current local selection.
    pub async fn selection(&self) -> Vec<MediaFile> {
        self.state.lock().await.selection.clone()
    }

    /// Snapshot for rendering.
    pub async fn view(&self) -> HostView {
        self.state.lock().await.view()
    }

    /// [`SessionRole::Host`] while hosting, else [`SessionRole::None`].
    pub async fn role(&self) -> SessionRole {
        if self.is_hosting().await {
            SessionRole::Host
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

fn parse_port(raw: &str) -> Result<u16, ControllerError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ControllerError::Validation(
            "Please enter a port number".to_string(),
        ));
    }
    match raw.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(ControllerError::Validation(format!(
            "Invalid port number: {}",
            raw
        ))),
    }
}
