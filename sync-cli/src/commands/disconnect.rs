//! Disconnect the peer session.

use anyhow::{Context, Result};
use mediasync_client::{ClientConfig, SyncContext, UiEvent};
use std::sync::Arc;

use crate::terminal::TerminalPresentation;

/// Run the disconnect command.
pub async fn run(config: ClientConfig) -> Result<()> {
    let context = SyncContext::connect_http(config, Arc::new(TerminalPresentation::new()))
        .context("Failed to create backend client")?;

    context
        .dispatch(UiEvent::Disconnect)
        .await
        .context("Failed to disconnect")?;
    Ok(())
}
