//! Presentation port: how controllers reach the rendering surface.
//!
//! Controllers push immutable view snapshots after every state change and
//! borrow media resources (decoded bytes + MIME type) for the player. The
//! surface hands back a [`ResourceHandle`] per resource; the player releases
//! it when the media is replaced or cleared.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use mediasync_core::PlaybackState;
use mediasync_types::{ConnectedPeer, MediaFile, MediaKind};

/// Snapshot of the host role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostView {
    /// Whether hosting is active.
    pub active: bool,
    /// Files offered to peers.
    pub files: Vec<MediaFile>,
    /// Peers currently connected.
    pub peers: Vec<ConnectedPeer>,
}

/// Snapshot of the peer role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeerView {
    /// Whether a connection to a host is active.
    pub connected: bool,
    /// Files the host offers.
    pub files: Vec<MediaFile>,
}

/// Snapshot of the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerView {
    /// Lifecycle state.
    pub state: PlaybackState,
    /// Loaded file name, if any.
    pub filename: Option<String>,
    /// Loaded media kind.
    pub kind: MediaKind,
    /// Current position.
    pub position: Duration,
    /// Resource backing the loaded media.
    pub resource: Option<ResourceHandle>,
}

/// Snapshot of a local file selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionView {
    /// Display text, e.g. `"2 media files selected"`.
    pub summary: String,
    /// Selected media files.
    pub files: Vec<MediaFile>,
}

/// Decoded media handed to the surface.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaResource {
    /// Source file name.
    pub filename: String,
    /// Media kind.
    pub kind: MediaKind,
    /// MIME type for the bytes.
    pub mime_type: &'static str,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for MediaResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaResource")
            .field("filename", &self.filename)
            .field("kind", &self.kind)
            .field("mime_type", &self.mime_type)
            .field("bytes", &format!("[{} bytes]", self.bytes.len()))
            .finish()
    }
}

/// Opaque handle to a resource created by the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceHandle(pub u64);

impl fmt::Display for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resource:{}", self.0)
    }
}

/// The rendering surface as seen by the controllers.
pub trait PresentationPort: Send + Sync {
    /// Show the host role.
    fn render_host(&self, view: &HostView);

    /// Show the peer role.
    fn render_peer(&self, view: &PeerView);

    /// Show the player.
    fn render_player(&self, view: &PlayerView);

    /// Show a local file selection.
    fn render_selection(&self, _view: &SelectionView) {}

    /// Make `resource` playable and return a handle to it.
    fn create_resource(&self, resource: &MediaResource) -> ResourceHandle;

    /// Free a handle previously returned by `create_resource`.
    fn release_resource(&self, handle: ResourceHandle);
}

/// A surface that shows nothing.
#[derive(Debug, Default)]
pub struct NullPresentation {
    next_handle: Mutex<u64>,
}

impl NullPresentation {
    /// Create a null surface.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PresentationPort for NullPresentation {
    fn render_host(&self, _view: &HostView) {}

    fn render_peer(&self, _view: &PeerView) {}

    fn render_player(&self, _view: &PlayerView) {}

    fn create_resource(&self, _resource: &MediaResource) -> ResourceHandle {
        let mut next = self
            .next_handle
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *next = next.wrapping_add(1);
        ResourceHandle(*next)
    }

    fn release_resource(&self, _handle: ResourceHandle) {}
}

/// A surface that records everything it is asked to show.
///
/// Clones share state, so a test can keep one clone while the context owns
/// another.
#[derive(Debug, Default, Clone)]
pub struct RecordingPresentation {
    inner: Arc<Mutex<RecordingInner>>,
}

#[derive(Debug, Default)]
struct RecordingInner {
    hosts: Vec<HostView>,
    peers: Vec<PeerView>,
    players: Vec<PlayerView>,
    selections: Vec<SelectionView>,
    created: Vec<(ResourceHandle, MediaResource)>,
    released: Vec<ResourceHandle>,
    next_handle: u64,
}

impl RecordingPresentation {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every host view rendered, in order.
    pub fn host_views(&self) -> Vec<HostView> {
        self.inner.lock().unwrap().hosts.clone()
    }

    /// Every peer view rendered, in order.
    pub fn peer_views(&self) -> Vec<PeerView> {
        self.inner.lock().unwrap().peers.clone()
    }

    /// Every player view rendered, in order.
    pub fn player_views(&self) -> Vec<PlayerView> {
        self.inner.lock().unwrap().players.clone()
    }

    /// The sequence of player states rendered.
    pub fn player_states(&self) -> Vec<PlaybackState> {
        self.inner
            .lock()
            .unwrap()
            .players
            .iter()
            .map(|view| view.state)
            .collect()
    }

    /// Every selection rendered, in order.
    pub fn selection_views(&self) -> Vec<SelectionView> {
        self.inner.lock().unwrap().selections.clone()
    }

    /// Resources created, in order.
    pub fn created_resources(&self) -> Vec<MediaResource> {
        let inner = self.inner.lock().unwrap();
        inner.created.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Handles released, in order.
    pub fn released_handles(&self) -> Vec<ResourceHandle> {
        self.inner.lock().unwrap().released.clone()
    }

    /// Handles created and not yet released.
    pub fn live_resources(&self) -> Vec<ResourceHandle> {
        let inner = self.inner.lock().unwrap();
        inner
            .created
            .iter()
            .map(|(handle, _)| *handle)
            .filter(|handle| !inner.released.contains(handle))
            .collect()
    }
}

impl PresentationPort for RecordingPresentation {
    fn render_host(&self, view: &HostView) {
        self.inner.lock().unwrap().hosts.push(view.clone());
    }

    fn render_peer(&self, view: &PeerView) {
        self.inner.lock().unwrap().peers.push(view.clone());
    }

    fn render_player(&self, view: &PlayerView) {
        self.inner.lock().unwrap().players.push(view.clone());
    }

    fn render_selection(&self, view: &SelectionView) {
        self.inner.lock().unwrap().selections.push(view.clone());
    }

    fn create_resource(&self, resource: &MediaResource) -> ResourceHandle {
        let mut inner = self.inner.lock().unwrap();
        inner.next_handle = inner.next_handle.wrapping_add(1);
        let handle = ResourceHandle(inner.next_handle);
        inner.created.push((handle, resource.clone()));
        handle
    }

    fn release_resource(&self, handle: ResourceHandle) {
        self.inner.lock().unwrap().released.push(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(name: &str) -> MediaResource {
        MediaResource {
            filename: name.into(),
            kind: MediaKind::Video,
            mime_type: "video/mp4",
            bytes: vec![0; 4096],
        }
    }

    #[test]
    fn recorder_tracks_live_resources() {
        let surface = RecordingPresentation::new();
        let first = surface.create_resource(&resource("a.mp4"));
        let second = surface.create_resource(&resource("b.mp4"));
        assert_ne!(first, second);
        assert_eq!(surface.live_resources(), vec![first, second]);

        surface.release_resource(first);
        assert_eq!(surface.live_resources(), vec![second]);
        assert_eq!(surface.released_handles(), vec![first]);
    }

    #[test]
    fn recorder_clones_share_state() {
        let surface = RecordingPresentation::new();
        let port: Arc<dyn PresentationPort> = Arc::new(surface.clone());

        port.render_host(&HostView {
            active: true,
            ..Default::default()
        });
        port.render_selection(&SelectionView::default());

        assert_eq!(surface.host_views().len(), 1);
        assert!(surface.host_views()[0].active);
        assert_eq!(surface.selection_views().len(), 1);
    }

    #[test]
    fn resource_debug_hides_bytes() {
        let rendered = format!("{:?}", resource("a.mp4"));
        assert!(rendered.contains("[4096 bytes]"));
        assert!(!rendered.contains("0, 0"));
    }

    #[test]
    fn handle_counter_wraps_instead_of_panicking() {
        let surface = NullPresentation {
            next_handle: Mutex::new(u64::MAX),
        };
        assert_eq!(surface.create_resource(&resource("a.mp4")), ResourceHandle(0));
        assert_eq!(surface.create_resource(&resource("b.mp4")), ResourceHandle(1));
    }

    #[test]
    fn null_surface_issues_distinct_handles() {
        let surface = NullPresentation::new();
        let a = surface.create_resource(&resource("a.mp4"));
        let b = surface.create_resource(&resource("a.mp4"));
        assert_ne!(a, b);
        assert_eq!(a.to_string(), "resource:1");
    }
}
