//! `kbridge chat`: interactive session

use std::io::Write;

use anyhow::Result;
use kbridge_core::{QueryOrchestrator, ToolSession};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::settings::Settings;

/// What to do with one line of input
#[derive(Debug, PartialEq, Eq)]
pub enum Input<'a> {
    Quit,
    Skip,
    Query(&'a str),
}

pub fn classify(line: &str) -> Input<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Input::Skip;
    }
    match line.to_lowercase().as_str() {
        "quit" | "exit" | "q" => Input::Quit,
        _ => Input::Query(line),
    }
}

fn prompt() {
    print!("\n> ");
    let _ = std::io::stdout().flush();
}

pub async fn run(settings: &Settings) -> Result<()> {
    let logger = settings.logger();

    println!("=== kbridge Interactive Client ===");
    println!("Type 'quit' or 'exit' to end the session");
    println!("Connecting to MCP server...");

    let backend = settings.backend(logger.clone())?;
    let orchestrator = QueryOrchestrator::new(backend, settings.model.clone(), logger.clone());
    let client = settings.connect(logger).await?;

    let tools = client.list_tools().await?;
    println!("\nConnected! Available tools ({}):", tools.len());
    for tool in &tools {
        println!("  - {}: {}", tool.name, tool.description);
    }
    println!("\nReady for queries!");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                println!("\nUse 'quit' to exit gracefully.");
                continue;
            }
        };

        // EOF
        let Some(line) = line else { break };

        let query = match classify(&line) {
            Input::Quit => break,
            Input::Skip => continue,
            Input::Query(query) => query,
        };

        println!("\n{}", "=".repeat(50));
        tokio::select! {
            response = orchestrator.process_query(&client, query) => {
                println!("Response:");
                println!("{}", response);
            }
            _ = tokio::signal::ctrl_c() => {
                println!("\nQuery cancelled. Use 'quit' to exit gracefully.");
            }
        }
        println!("{}", "=".repeat(50));
    }

    client.close().await?;
    Ok(())
}
