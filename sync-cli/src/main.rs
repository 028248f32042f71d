//! # mediasync
//!
//! Terminal front end for MediaSync.
//!
//! ## Commands
//!
//! - `host`: Start hosting a media directory
//! - `stop`: Stop hosting
//! - `peer`: Connect to a host and optionally play one file
//! - `disconnect`: Disconnect the peer session
//! - `check-path`: Run the directory path validator
//! - `classify`: Show media kind and MIME type per file
//!
//! ## Example
//!
//! ```bash
//! # Host a folder on port 8080 and push one file to every peer
//! mediasync host --port 8080 --dir "C:\Users\me\Videos" --stream intro.mp4
//!
//! # On another machine, connect and fetch a file into ./media
//! mediasync peer --address 192.168.1.20:8080 --id living-room --request intro.mp4 --output ./media
//!
//! # Talk to a backend on another port
//! mediasync --endpoint http://127.0.0.1:3100/api stop
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod terminal;

use commands::{check_path, classify, disconnect, host, peer, stop};

const DEFAULT_LOG_FILTER: &str = "mediasync=info,mediasync_client=info";

/// Terminal front end for MediaSync.
#[derive(Parser, Debug)]
#[command(name = "mediasync")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Backend command endpoint, overrides the config file
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Log level (trace, debug, info, warn, error), overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start hosting a media directory
    Host {
        /// Port the backend should serve peers on
        #[arg(long, short)]
        port: String,

        /// Media directory to offer
        #[arg(long, short)]
        dir: String,

        /// Stream this file to every peer once hosting is up
        #[arg(long)]
        stream: Option<String>,
    },

    /// Stop hosting
    Stop,

    /// Connect to a host as a peer
    Peer {
        /// Host address (ip:port)
        #[arg(long, short)]
        address: String,

        /// Client identifier shown to the host
        #[arg(long, short)]
        id: String,

        /// Request and play this file after connecting
        #[arg(long, short)]
        request: Option<String>,

        /// Write delivered media into this directory
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Disconnect the peer session
    Disconnect,

    /// Check whether text would be accepted as a directory path
    CheckPath {
        /// Text to check
        input: String,
    },

    /// Show media kind and MIME type per file name
    Classify {
        /// File names
        #[arg(required = true)]
        files: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    let config_path = cli.config;
    let endpoint = cli.endpoint;
    let load_config = || config::load(config_path.as_deref(), endpoint.as_deref());

    match cli.command {
        Commands::Host { port, dir, stream } => {
            host::run(load_config()?, &port, &dir, stream.as_deref()).await?;
        }
        Commands::Stop => {
            stop::run(load_config()?).await?;
        }
        Commands::Peer {
            address,
            id,
            request,
            output,
        } => {
            peer::run(load_config()?, &address, &id, request.as_deref(), output).await?;
        }
        Commands::Disconnect => {
            disconnect::run(load_config()?).await?;
        }
        Commands::CheckPath { input } => {
            if !check_path::run(&input) {
                std::process::exit(1);
            }
        }
        Commands::Classify { files } => {
            classify::run(&files);
        }
    }

    Ok(())
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(format!("mediasync={0},mediasync_client={0}", level)),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
