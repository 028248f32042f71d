//! # mediasync-types
//!
//! Wire types shared by the MediaSync crates.
//!
//! - [`Command`], [`Request`], [`Response`] - the backend RPC envelope
//! - [`MediaFile`], [`MediaKind`], [`ConnectedPeer`], [`SelectedFile`] - listings
//! - [`MediaPayload`] and the typed response views in [`data`]
//! - [`PayloadError`] - decoding errors

#![warn(missing_docs)]
#![warn(clippy::all)]

mod command;
pub mod data;
mod error;
mod media;

pub use command::{Command, CommandName, Request, Response};
pub use data::{ConnectData, RequestMediaData, StartServerData};
pub use error::PayloadError;
pub use media::{ConnectedPeer, MediaFile, MediaKind, MediaPayload, NamedFile, SelectedFile};
