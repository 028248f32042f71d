//! Controller errors and the single-flight guard.

use std::sync::atomic::{AtomicBool, Ordering};

use mediasync_types::PayloadError;
use thiserror::Error;

use crate::channel::CommandError;

/// Errors returned by the host and peer controllers.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// User input failed a local check; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// The directory did not look like a filesystem path; nothing was sent.
    #[error("{0}")]
    PathRejected(String),

    /// The backend command failed.
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Another session operation is still waiting for the backend.
    #[error("{0} already in progress")]
    InFlight(&'static str),

    /// The backend answered with data the controller could not use.
    #[error("invalid response data: {0}")]
    Payload(#[from] PayloadError),
}

impl ControllerError {
    /// Whether the error was raised before anything reached the backend.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::PathRejected(_) | Self::InFlight(_)
        )
    }
}

/// Allows at most one guarded operation at a time.
#[derive(Debug, Default)]
pub struct InFlightGuard {
    busy: AtomicBool,
}

/// Proof that a guarded operation is running. Dropping it frees the guard.
#[derive(Debug)]
pub struct InFlightTicket<'a> {
    guard: &'a InFlightGuard,
}

impl InFlightGuard {
    /// Create an idle guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard for `operation`, failing fast when it is taken.
    pub fn acquire(&self, operation: &'static str) -> Result<InFlightTicket<'_>, ControllerError> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlightTicket { guard: self })
            .map_err(|_| ControllerError::InFlight(operation))
    }

    /// Whether a guarded operation is running.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for InFlightTicket<'_> {
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}
