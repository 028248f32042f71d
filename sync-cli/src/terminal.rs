//! Terminal rendering surface.
//!
//! Views are printed to stdout. Media resources optionally land in an output
//! directory and are deleted again when their handle is released.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use mediasync_client::{
    HostView, MediaResource, PeerView, PlayerView, PresentationPort, ResourceHandle,
    SelectionView,
};
use mediasync_types::MediaFile;
use tracing::warn;

/// Prints views and optionally materializes media files.
#[derive(Debug, Default)]
pub struct TerminalPresentation {
    output_dir: Option<PathBuf>,
    resources: Mutex<Resources>,
}

#[derive(Debug, Default)]
struct Resources {
    next: u64,
    written: HashMap<ResourceHandle, PathBuf>,
}

impl TerminalPresentation {
    /// A surface that only prints.
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that also writes delivered media into `dir`.
    pub fn with_output_dir(dir: PathBuf) -> Self {
        Self {
            output_dir: Some(dir),
            resources: Mutex::default(),
        }
    }

    fn write_resource(&self, dir: &Path, resource: &MediaResource) -> std::io::Result<PathBuf> {
        // Never let a delivered name escape the output directory.
        let name = Path::new(&resource.filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "media.bin".into());
        std::fs::create_dir_all(dir)?;
        let path = dir.join(name);
        std::fs::write(&path, &resource.bytes)?;
        Ok(path)
    }
}

fn print_listing(files: &[MediaFile]) {
    if files.is_empty() {
        println!("  (no media files)");
    }
    for file in files {
        println!("  {:<6} {:>12}  {}", file.kind.as_str(), format_size(file.size), file.name);
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    if bytes == 0 {
        return "-".to_string();
    }
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

impl PresentationPort for TerminalPresentation {
    fn render_host(&self, view: &HostView) {
        if !view.active {
            println!("Hosting: stopped");
            return;
        }
        println!("Hosting: active ({} media files)", view.files.len());
        print_listing(&view.files);
        if !view.peers.is_empty() {
            println!("Connected peers:");
            for peer in &view.peers {
                println!("  {} (since {})", peer.id, peer.connected_time);
            }
        }
    }

    fn render_peer(&self, view: &PeerView) {
        if !view.connected {
            println!("Peer: disconnected");
            return;
        }
        println!("Peer: connected ({} media files available)", view.files.len());
        print_listing(&view.files);
    }

    fn render_player(&self, view: &PlayerView) {
        match &view.filename {
            Some(name) => println!("Player: {} {} ({})", view.state.label(), name, view.kind),
            None => println!("Player: {}", view.state.label()),
        }
    }

    fn render_selection(&self, view: &SelectionView) {
        println!("{}", view.summary);
    }

    fn create_resource(&self, resource: &MediaResource) -> ResourceHandle {
        let mut resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        resources.next = resources.next.wrapping_add(1);
        let handle = ResourceHandle(resources.next);

        if let Some(dir) = &self.output_dir {
            match self.write_resource(dir, resource) {
                Ok(path) => {
                    println!(
                        "Saved {} ({}, {}) to {}",
                        resource.filename,
                        resource.mime_type,
                        format_size(resource.bytes.len() as u64),
                        path.display()
                    );
                    resources.written.insert(handle, path);
                }
                Err(e) => warn!(filename = %resource.filename, error = %e, "failed to write media"),
            }
        }
        handle
    }

    fn release_resource(&self, handle: ResourceHandle) {
        let mut resources = self.resources.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = resources.written.remove(&handle) {
            if let Err(e) = std::fs::remove_file(&path) {
                warn!(path = %path.display(), error = %e, "failed to remove media");
            }
        }
    }
}
