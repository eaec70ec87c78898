//! Configuration file handling

#[expect(clippy::module_inception, reason = "Matches the layout of the other modules")]
mod config;

pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML};
