//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for kbridge
#[derive(Parser, Debug)]
#[command(name = "kbridge")]
#[command(author, version, about = "Ask an LLM questions answered by MCP tools")]
#[command(long_about = r#"
kbridge connects a function-calling LLM to the tools of an MCP server.
By default it launches its own company knowledge base server as a child
process and talks to it over stdio. `serve --http <ADDR>` runs the server
as a long-lived streamable HTTP endpoint at http://<ADDR>/mcp instead.

Configuration is read from (in priority order):
1. --config <path>                  Explicit config file
2. ~/.config/kbridge/config.yaml    User config

The model API key is read from GEMINI_API_KEY (or GOOGLE_API_KEY).

Example:
  kbridge chat
  kbridge batch "What is the dress code?" "How many sick days do I get?"
  kbridge serve
  kbridge serve --http 127.0.0.1:8050
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Model to use (overrides the config file)
    #[arg(short, long, value_name = "MODEL", global = true)]
    pub model: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the knowledge base MCP server (stdio unless an HTTP address is set)
    Serve {
        /// Serve streamable HTTP on this address (overrides `listen` in the config)
        #[arg(long, value_name = "ADDR", conflicts_with = "stdio")]
        http: Option<String>,

        /// Force stdio even when the config sets `listen`
        #[arg(long)]
        stdio: bool,
    },

    /// Interactive session: type questions, 'quit' to leave
    Chat,

    /// Run queries one after another (a built-in list when none are given)
    Batch {
        /// Queries to run
        queries: Vec<String>,
    },
}
