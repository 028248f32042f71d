//! PlaybackController - drives the player from delivered media.
//!
//! Wraps the pure [`PlaybackState`] machine and performs its actions against
//! the presentation port: creating a resource for each load, releasing the
//! previous one, and keeping the position in step with the lifecycle.

use std::sync::Arc;
use std::time::Duration;

use mediasync_core::{classify, mime_type, PlaybackAction, PlaybackEvent, PlaybackState};
use mediasync_types::{MediaKind, MediaPayload, PayloadError};
use tracing::debug;

use crate::presentation::{MediaResource, PlayerView, PresentationPort, ResourceHandle};

#[derive(Debug, Clone)]
struct LoadedMedia {
    filename: String,
    kind: MediaKind,
    handle: ResourceHandle,
}

/// The peer's media player.
pub struct PlaybackController {
    state: PlaybackState,
    media: Option<LoadedMedia>,
    position: Duration,
    presentation: Arc<dyn PresentationPort>,
}

impl PlaybackController {
    /// Create an idle player rendering to `presentation`.
    pub fn new(presentation: Arc<dyn PresentationPort>) -> Self {
        Self {
            state: PlaybackState::Idle,
            media: None,
            position: Duration::ZERO,
            presentation,
        }
    }

    /// Load delivered media and start playing it.
    ///
    /// The payload is decoded first; if that fails the player is untouched.
    pub fn load(&mut self, payload: &MediaPayload) -> Result<(), PayloadError> {
        let bytes = payload.decode_bytes()?;
        let reported: MediaKind = payload.media_type.parse().unwrap_or_default();
        let kind = if reported.is_recognized() {
            reported
        } else {
            classify(&payload.filename)
        };

        let resource = MediaResource {
            filename: payload.filename.clone(),
            kind,
            mime_type: mime_type(kind, &payload.filename),
            bytes,
        };
        debug!(filename = %resource.filename, mime = resource.mime_type, "loading media");
        self.apply(PlaybackEvent::Load, Some(resource));
        Ok(())
    }

    /// Start or resume output. Inert when nothing is loaded or already playing.
    pub fn play(&mut self) -> PlaybackState {
        self.apply(PlaybackEvent::Play, None);
        self.state
    }

    /// Pause output. Inert unless playing.
    pub fn pause(&mut self) -> PlaybackState {
        self.apply(PlaybackEvent::Pause, None);
        self.state
    }

    /// Stop output and rewind.
    pub fn stop(&mut self) -> PlaybackState {
        self.apply(PlaybackEvent::Stop, None);
        self.state
    }

    /// Drop the loaded media and return to Idle.
    pub fn clear(&mut self) {
        self.apply(PlaybackEvent::Clear, None);
    }

    /// Record playback progress reported by the surface. Ignored unless playing.
    pub fn advance(&mut self, elapsed: Duration) -> Duration {
        if self.state.is_playing() {
            self.position = self.position.saturating_add(elapsed);
        }
        self.position
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Current position.
    pub fn position(&self) -> Duration {
        self.position
    }

    /// Name of the loaded file.
    pub fn loaded_file(&self) -> Option<&str> {
        self.media.as_ref().map(|m| m.filename.as_str())
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> PlayerView {
        PlayerView {
            state: self.state,
            filename: self.media.as_ref().map(|m| m.filename.clone()),
            kind: self.media.as_ref().map(|m| m.kind).unwrap_or_default(),
            position: self.position,
            resource: self.media.as_ref().map(|m| m.handle),
        }
    }

    fn apply(&mut self, event: PlaybackEvent, mut incoming: Option<MediaResource>) {
        let (next, actions) = self.state.on_event(event);
        self.state = next;

        let mut autoplay = false;
        for action in &actions {
            match action {
                PlaybackAction::ReleaseResource => {
                    if let Some(media) = self.media.take() {
                        self.presentation.release_resource(media.handle);
                    }
                }
                PlaybackAction::AcquireResource => {
                    if let Some(resource) = incoming.take() {
                        let handle = self.presentation.create_resource(&resource);
                        self.media = Some(LoadedMedia {
                            filename: resource.filename,
                            kind: resource.kind,
                            handle,
                        });
                        self.position = Duration::ZERO;
                    }
                }
                PlaybackAction::Autoplay => autoplay = true,
                PlaybackAction::SeekToStart => self.position = Duration::ZERO,
                // Output itself is the surface's job; it follows the rendered state.
                PlaybackAction::StartOutput | PlaybackAction::PauseOutput => {}
            }
        }

        if !actions.is_empty() {
            self.presentation.render_player(&self.view());
        }
        if autoplay {
            self.apply(PlaybackEvent::Play, None);
        }
    }
}
