//! Connect to a host as a peer.

use anyhow::{Context, Result};
use mediasync_client::{ClientConfig, SyncContext, UiEvent};
use std::path::PathBuf;
use std::sync::Arc;

use crate::terminal::TerminalPresentation;

/// Run the peer command.
pub async fn run(
    config: ClientConfig,
    address: &str,
    client_id: &str,
    request: Option<&str>,
    output: Option<PathBuf>,
) -> Result<()> {
    let surface = match output {
        Some(dir) => TerminalPresentation::with_output_dir(dir),
        None => TerminalPresentation::new(),
    };
    let context = SyncContext::connect_http(config, Arc::new(surface))
        .context("Failed to create backend client")?;

    context
        .dispatch(UiEvent::Connect {
            address: address.to_string(),
            client_id: client_id.to_string(),
        })
        .await
        .context("Failed to connect")?;

    if let Some(filename) = request {
        context
            .dispatch(UiEvent::RequestMedia {
                filename: filename.to_string(),
            })
            .await
            .with_context(|| format!("Failed to play {}", filename))?;
    }

    Ok(())
}
