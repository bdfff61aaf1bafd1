//! Endpoint and client settings
//!
//! Settings come from an optional TOML file. Every field has a default that points
//! at the public npm and GitHub services, so an empty (or missing) file is valid.

#[expect(clippy::module_inception, reason = "mirrors the file layout of the other modules")]
mod config;

pub use config::{Config, DEFAULT_CONFIG_FILE};
