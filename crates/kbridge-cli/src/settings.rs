//! Effective settings: config file plus command-line overrides

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use kbridge_core::{
    ConfigFile, ConsoleLogger, EnvSecretStore, FileConfigProvider, GenaiBackend, Logger, McpClient,
    ModelBackend, ServerTransport,
};

use crate::cli::Cli;

/// Everything a subcommand needs to know about its environment
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: ConfigFile,
    pub config_path: Option<PathBuf>,
    pub model: String,
}

impl Settings {
    /// Read the config file named on the command line, or the user config
    pub fn load(cli: &Cli) -> Result<Self> {
        let provider = match &cli.config {
            Some(path) => FileConfigProvider::new(path),
            None => FileConfigProvider::user(),
        };
        let config = provider
            .load()
            .with_context(|| format!("Failed to load config from {}", provider.path().display()))?;

        Ok(Self::from_config(config, cli.config.clone(), cli.model.clone()))
    }

    pub fn from_config(config: ConfigFile, config_path: Option<PathBuf>, model: Option<String>) -> Self {
        let model = model.unwrap_or_else(|| config.model.clone());
        Self {
            config,
            config_path,
            model,
        }
    }

    /// HTTP listen address for `serve`: the flag, else the config; `None` means stdio
    pub fn listen_addr(&self, flag: Option<String>, force_stdio: bool) -> Option<String> {
        if force_stdio {
            return None;
        }
        flag.or_else(|| self.config.listen.clone())
    }

    /// Logger writing to stderr at the configured level
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::new(ConsoleLogger::new().with_level(self.config.log_level))
    }

    /// Program, arguments and extra environment of the stdio server
    ///
    /// Without a configured command the current executable is relaunched with
    /// `serve --stdio`, forwarding `--config` and `--model` so both sides agree.
    pub fn server_command(&self) -> Result<Option<(String, Vec<String>, HashMap<String, String>)>> {
        let ServerTransport::Stdio { command, args, env } = &self.config.server else {
            return Ok(None);
        };

        if let Some(command) = command {
            return Ok(Some((command.clone(), args.clone(), env.clone())));
        }

        let exe = std::env::current_exe().context("Cannot locate the kbridge executable")?;
        let mut server_args = Vec::new();
        if let Some(path) = &self.config_path {
            server_args.push("--config".to_string());
            server_args.push(path.display().to_string());
        }
        server_args.push("--model".to_string());
        server_args.push(self.model.clone());
        server_args.push("serve".to_string());
        server_args.push("--stdio".to_string());

        Ok(Some((exe.display().to_string(), server_args, env.clone())))
    }

    /// Open a session with the configured knowledge server
    pub async fn connect(&self, logger: Arc<dyn Logger>) -> Result<McpClient> {
        let client = match &self.config.server {
            ServerTransport::Http { url } => McpClient::connect_http(url, logger).await?,
            ServerTransport::Stdio { .. } => {
                let (program, args, env) = self
                    .server_command()?
                    .context("stdio transport without a command")?;
                McpClient::connect_child_process(&program, &args, &env, logger).await?
            }
        };

        Ok(client.with_request_timeout(self.config.request_timeout()))
    }

    /// Model backend for the query pipeline; needs an API key
    pub fn backend(&self, logger: Arc<dyn Logger>) -> Result<Arc<dyn ModelBackend>> {
        let backend = GenaiBackend::from_secrets(&self.model, &EnvSecretStore::new(), logger)
            .context("Set GEMINI_API_KEY (or GOOGLE_API_KEY) to use the client")?;
        Ok(Arc::new(backend))
    }
}
