//! CLI entrypoint for kbridge
//!
//! `serve` runs the knowledge base MCP server; `chat` and `batch` run the
//! client side against it.

mod batch;
mod chat;
mod cli;
mod serve;
mod settings;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli)?;

    match cli.command {
        Command::Serve { http, stdio } => serve::run(&settings, http, stdio).await,
        Command::Chat => chat::run(&settings).await,
        Command::Batch { queries } => batch::run(&settings, queries).await,
    }
}
