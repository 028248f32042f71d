//! Stop hosting.

use anyhow::{Context, Result};
use mediasync_client::{ClientConfig, SyncContext, UiEvent};
use std::sync::Arc;

use crate::terminal::TerminalPresentation;

/// Run the stop command.
pub async fn run(config: ClientConfig) -> Result<()> {
    let context = SyncContext::connect_http(config, Arc::new(TerminalPresentation::new()))
        .context("Failed to create backend client")?;

    context
        .dispatch(UiEvent::StopHosting)
        .await
        .context("Failed to stop hosting")?;
    Ok(())
}
