//! Configuration
//!
//! A single YAML file, by default `~/.config/kbridge/config.yaml`. A missing
//! file means all defaults.

mod error;
mod file;

pub use error::{ConfigError, ConfigResult};
pub use file::{ConfigFile, FileConfigProvider, ServerTransport, DEFAULT_BATCH_DELAY_MS};
