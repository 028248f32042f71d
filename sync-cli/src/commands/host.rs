//! Start hosting a media directory.

use anyhow::{Context, Result};
use mediasync_client::{ClientConfig, SyncContext, UiEvent};
use std::sync::Arc;

use crate::terminal::TerminalPresentation;

/// Run the host command.
pub async fn run(config: ClientConfig, port: &str, dir: &str, stream: Option<&str>) -> Result<()> {
    let context = SyncContext::connect_http(config, Arc::new(TerminalPresentation::new()))
        .context("Failed to create backend client")?;

    context
        .dispatch(UiEvent::StartHosting {
            port: port.to_string(),
            directory: dir.to_string(),
        })
        .await
        .context("Failed to start hosting")?;

    if let Some(filename) = stream {
        context
            .dispatch(UiEvent::StreamToPeers {
                filename: filename.to_string(),
            })
            .await
            .context("Failed to stream media")?;
        println!("Streaming {} to all connected peers", filename);
    }

    Ok(())
}
