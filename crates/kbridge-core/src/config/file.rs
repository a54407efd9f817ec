//! File-based configuration (YAML)
//!
//! User-level config lives at ~/.config/kbridge/config.yaml; `--config`
//! points somewhere else.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::knowledge::KnowledgeBase;
use crate::logging::LogLevel;
use crate::orchestrator::DEFAULT_MODEL;

use super::error::ConfigResult;

/// Default pause between batch queries
pub const DEFAULT_BATCH_DELAY_MS: u64 = 1000;

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_batch_delay_ms() -> u64 {
    DEFAULT_BATCH_DELAY_MS
}

/// How the client reaches the knowledge server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "transport", rename_all = "lowercase")]
pub enum ServerTransport {
    /// Spawn the server and speak MCP over its stdin/stdout
    ///
    /// Without a command, the running executable is launched with `serve`.
    Stdio {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        command: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<String>,
        #[serde(default, skip_serializing_if = "HashMap::is_empty")]
        env: HashMap<String, String>,
    },
    /// Connect to a running server over streamable HTTP
    Http { url: String },
}

impl Default for ServerTransport {
    fn default() -> Self {
        ServerTransport::Stdio {
            command: None,
            args: Vec::new(),
            env: HashMap::new(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Model id used for queries and semantic search
    #[serde(default = "default_model")]
    pub model: String,

    /// Knowledge server connection
    #[serde(default)]
    pub server: ServerTransport,

    /// Corpus file; defaults to the kbridge data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<PathBuf>,

    /// Pause between batch queries, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Per-request limit for MCP calls, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Address `serve` listens on for streamable HTTP (e.g. "127.0.0.1:8050");
    /// stdio when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,

    /// Minimum level written to stderr
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            model: default_model(),
            server: ServerTransport::default(),
            knowledge_base: None,
            batch_delay_ms: DEFAULT_BATCH_DELAY_MS,
            request_timeout_secs: None,
            listen: None,
            log_level: LogLevel::default(),
        }
    }
}

impl ConfigFile {
    /// Corpus location, configured or default
    pub fn knowledge_base_path(&self) -> PathBuf {
        self.knowledge_base
            .clone()
            .unwrap_or_else(KnowledgeBase::default_path)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// File-based configuration provider
///
/// # Example
///
/// ```no_run
/// use kbridge_core::config::FileConfigProvider;
///
/// let config = FileConfigProvider::user().load().unwrap_or_default();
/// println!("model: {}", config.model);
/// ```
#[derive(Debug, Clone)]
pub struct FileConfigProvider {
    path: PathBuf,
}

impl FileConfigProvider {
    /// Create a provider for a specific path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a user-level config provider (~/.config/kbridge/config.yaml)
    pub fn user() -> Self {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        Self::new(config_dir.join("kbridge").join("config.yaml"))
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the config file exists
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load config from file; a missing file gives the defaults
    pub fn load(&self) -> ConfigResult<ConfigFile> {
        if !self.path.exists() {
            return Ok(ConfigFile::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        Ok(serde_yaml::from_str(&content)?)
    }

    /// Save config to file
    pub fn save(&self, config: &ConfigFile) -> ConfigResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_yaml::to_string(config)?)?;
        Ok(())
    }
}
