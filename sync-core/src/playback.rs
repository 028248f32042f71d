//! Playback lifecycle state machine.
//!
//! Pure and side-effect-free, like the rest of this crate: events go in, a new
//! state plus a list of actions come out. The client's playback controller
//! performs the actions (acquiring and releasing media resources, driving
//! output, resetting the position).
//!
//! ```text
//!   Idle ──Load──► Loaded ──Play (autoplay)──► Playing ──Pause──► Paused
//!                                                 ▲                  │
//!                                                 └───────Play───────┘
//!   any non-Idle state ──Stop──► Stopped ──Play──► Playing
//!   any state ──Clear──► Idle
//! ```
//!
//! A media resource exists exactly when the state is not [`PlaybackState::Idle`],
//! so the machine can tell on its own when the previous one must be released.

/// Playback lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Nothing loaded. Initial state, and the state after a disconnect.
    #[default]
    Idle,
    /// Media loaded, output not started yet.
    Loaded,
    /// Output running.
    Playing,
    /// Output paused at the current position.
    Paused,
    /// Output stopped, position back at the start.
    Stopped,
}

/// Inputs to the playback state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// New media was delivered.
    Load,
    /// User pressed play (also fed automatically after a load).
    Play,
    /// User pressed pause.
    Pause,
    /// User pressed stop.
    Stop,
    /// Session ended; discard everything.
    Clear,
}

/// Instructions for the playback controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Release the current media resource.
    ReleaseResource,
    /// Create a resource for the newly delivered media.
    AcquireResource,
    /// Feed [`PlaybackEvent::Play`] right away (load implies autoplay).
    Autoplay,
    /// Start or resume output.
    StartOutput,
    /// Halt output.
    PauseOutput,
    /// Move the position back to zero.
    SeekToStart,
}

impl PlaybackState {
    /// Create a state machine in the Idle state.
    pub fn new() -> Self {
        Self::Idle
    }

    /// Process an event and return the new state plus actions to execute.
    ///
    /// Events that do not apply to the current state leave it unchanged and
    /// produce no actions.
    pub fn on_event(self, event: PlaybackEvent) -> (Self, Vec<PlaybackAction>) {
        use PlaybackAction::*;

        match (self, event) {
            (state, PlaybackEvent::Load) => {
                let mut actions = Vec::with_capacity(3);
                if state.has_media() {
                    actions.push(ReleaseResource);
                }
                actions.push(AcquireResource);
                actions.push(Autoplay);
                (Self::Loaded, actions)
            }

            (Self::Loaded | Self::Paused | Self::Stopped, PlaybackEvent::Play) => {
                (Self::Playing, vec![StartOutput])
            }

            (Self::Playing, PlaybackEvent::Pause) => (Self::Paused, vec![PauseOutput]),

            (Self::Loaded | Self::Playing | Self::Paused | Self::Stopped, PlaybackEvent::Stop) => {
                (Self::Stopped, vec![PauseOutput, SeekToStart])
            }

            (Self::Idle, PlaybackEvent::Clear) => (Self::Idle, vec![]),
            (_, PlaybackEvent::Clear) => (Self::Idle, vec![ReleaseResource, SeekToStart]),

            // Inert controls
            (state, _) => (state, vec![]),
        }
    }

    /// Whether a media resource is held in this state.
    pub fn has_media(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Whether output is running.
    pub fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Lowercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loaded => "loaded",
            Self::Playing => "playing",
            Self::Paused => "paused",
            Self::Stopped => "stopped",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_STATES: [PlaybackState; 5] = [
        PlaybackState::Idle,
        PlaybackState::Loaded,
        PlaybackState::Playing,
        PlaybackState::Paused,
        PlaybackState::Stopped,
    ];

    #[test]
    fn starts_idle() {
        assert_eq!(PlaybackState::new(), PlaybackState::Idle);
        assert!(!PlaybackState::new().has_media());
    }

    #[test]
    fn load_from_idle_acquires_and_autoplays() {
        let (state, actions) = PlaybackState::Idle.on_event(PlaybackEvent::Load);
        assert_eq!(state, PlaybackState::Loaded);
        assert_eq!(
            actions,
            vec![PlaybackAction::AcquireResource, PlaybackAction::Autoplay]
        );
    }

    #[test]
    fn load_over_existing_media_releases_first() {
        for state in ALL_STATES.into_iter().filter(|s| s.has_media()) {
            let (next, actions) = state.on_event(PlaybackEvent::Load);
            assert_eq!(next, PlaybackState::Loaded);
            assert_eq!(actions[0], PlaybackAction::ReleaseResource);
            assert!(actions.contains(&PlaybackAction::Autoplay));
        }
    }

    #[test]
    fn autoplay_reaches_playing() {
        let (loaded, _) = PlaybackState::Idle.on_event(PlaybackEvent::Load);
        let (playing, actions) = loaded.on_event(PlaybackEvent::Play);
        assert_eq!(playing, PlaybackState::Playing);
        assert_eq!(actions, vec![PlaybackAction::StartOutput]);
    }

    #[test]
    fn play_resumes_from_paused_and_stopped() {
        for state in [PlaybackState::Paused, PlaybackState::Stopped] {
            let (next, _) = state.on_event(PlaybackEvent::Play);
            assert_eq!(next, PlaybackState::Playing);
        }
    }

    #[test]
    fn play_is_inert_when_idle_or_playing() {
        for state in [PlaybackState::Idle, PlaybackState::Playing] {
            let (next, actions) = state.on_event(PlaybackEvent::Play);
            assert_eq!(next, state);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn pause_only_applies_while_playing() {
        let (next, actions) = PlaybackState::Playing.on_event(PlaybackEvent::Pause);
        assert_eq!(next, PlaybackState::Paused);
        assert_eq!(actions, vec![PlaybackAction::PauseOutput]);

        for state in ALL_STATES.into_iter().filter(|s| !s.is_playing()) {
            let (next, actions) = state.on_event(PlaybackEvent::Pause);
            assert_eq!(next, state);
            assert!(actions.is_empty());
        }
    }

    #[test]
    fn stop_from_any_loaded_state_resets_position() {
        for state in ALL_STATES.into_iter().filter(|s| s.has_media()) {
            let (next, actions) = state.on_event(PlaybackEvent::Stop);
            assert_eq!(next, PlaybackState::Stopped);
            assert!(actions.contains(&PlaybackAction::SeekToStart));
        }
    }

    #[test]
    fn stop_is_inert_when_idle() {
        let (next, actions) = PlaybackState::Idle.on_event(PlaybackEvent::Stop);
        assert_eq!(next, PlaybackState::Idle);
        assert!(actions.is_empty());
    }

    #[test]
    fn clear_returns_to_idle_from_anywhere() {
        for state in ALL_STATES {
            let (next, actions) = state.on_event(PlaybackEvent::Clear);
            assert_eq!(next, PlaybackState::Idle);
            assert_eq!(
                actions.contains(&PlaybackAction::ReleaseResource),
                state.has_media()
            );
        }
    }
}
