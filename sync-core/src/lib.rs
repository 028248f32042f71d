//! # mediasync-core
//!
//! Pure logic for MediaSync (no I/O, instant tests).
//!
//! - [`path`]: heuristic validation of typed directory paths
//! - [`media`]: media kind classification, filtering and MIME lookup
//! - [`playback`]: the playback lifecycle state machine
//!
//! The client crate performs the actual I/O (backend commands, resource
//! management, rendering) and interprets the actions produced here.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod media;
pub mod path;
pub mod playback;

pub use media::{
    classify, filter_media, listing_from_names, media_listing, mime_type, selection_summary,
};
pub use path::{is_valid_path, normalize_directory};
pub use playback::{PlaybackAction, PlaybackEvent, PlaybackState};
