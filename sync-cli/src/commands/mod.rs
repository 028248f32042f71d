//! CLI command implementations.

pub mod check_path;
pub mod classify;
pub mod disconnect;
pub mod host;
pub mod peer;
pub mod stop;
