//! `kbridge batch`: run queries one after another

use std::sync::Arc;

use anyhow::Result;
use kbridge_core::{McpClient, QueryOrchestrator, ToolSession};

use crate::settings::Settings;

/// Queries run when none are given on the command line
pub const DEFAULT_QUERIES: &[&str] = &["dress code?"];

/// Queries given on the command line, or the built-in list
pub fn queries_or_default(queries: Vec<String>) -> Vec<String> {
    if queries.is_empty() {
        DEFAULT_QUERIES.iter().map(|q| q.to_string()).collect()
    } else {
        queries
    }
}

pub async fn run(settings: &Settings, queries: Vec<String>) -> Result<()> {
    let logger = settings.logger();
    let queries = queries_or_default(queries);

    println!("=== kbridge Batch Client ===");
    println!("Connecting to MCP server...");

    let backend = settings.backend(logger.clone())?;
    let orchestrator = QueryOrchestrator::new(backend, settings.model.clone(), logger.clone());
    let client = settings.connect(logger).await?;

    tokio::select! {
        result = run_queries(&client, &orchestrator, &queries, settings) => result?,
        _ = tokio::signal::ctrl_c() => println!("\n\nShutting down gracefully..."),
    }

    client.close().await?;
    Ok(())
}

async fn run_queries(
    client: &McpClient,
    orchestrator: &QueryOrchestrator,
    queries: &[String],
    settings: &Settings,
) -> Result<()> {
    let tools = client.list_tools().await?;
    let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
    println!("\nConnected! Available tools: {:?}", names);

    let total = queries.len();
    for (i, query) in queries.iter().enumerate() {
        println!("\n{}", "=".repeat(60));
        println!("Query {}/{}: {}", i + 1, total, query);
        println!("{}", "-".repeat(60));

        let response = orchestrator.process_query(client, query).await;
        println!("Response:");
        println!("{}", response);

        if i + 1 < total {
            tokio::time::sleep(settings.config.batch_delay()).await;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_queries() {
        assert_eq!(queries_or_default(Vec::new()), vec!["dress code?".to_string()]);
        assert_eq!(
            queries_or_default(vec!["vacation?".to_string()]),
            vec!["vacation?".to_string()]
        );
    }
}
