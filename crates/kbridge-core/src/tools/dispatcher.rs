//! Tool dispatch
//!
//! Runs a model-requested tool on the session and turns whatever comes back
//! into display text. Every failure is folded into the returned string so the
//! caller always has something to show.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::logging::Logger;
use crate::mcp::{McpError, ToolSession};
use crate::types::{ContentBlock, ToolDescriptor, ToolOutput};

/// Errors that can occur while dispatching a tool call
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error(transparent)]
    Session(#[from] McpError),

    #[error("could not format tool output: {0}")]
    Format(#[from] serde_json::Error),
}

/// Call `name` after checking it against a fresh tool listing
pub async fn dispatch(
    session: &dyn ToolSession,
    name: &str,
    arguments: Map<String, Value>,
    logger: &dyn Logger,
) -> String {
    match session.list_tools().await {
        Ok(listing) => dispatch_listed(session, &listing, name, arguments, logger).await,
        Err(e) => failure(name, &DispatchError::from(e), logger),
    }
}

/// Call `name` after checking it against an existing listing
pub async fn dispatch_listed(
    session: &dyn ToolSession,
    listing: &[ToolDescriptor],
    name: &str,
    arguments: Map<String, Value>,
    logger: &dyn Logger,
) -> String {
    match try_dispatch(session, listing, name, arguments, logger).await {
        Ok(text) => text,
        Err(e) => failure(name, &e, logger),
    }
}

async fn try_dispatch(
    session: &dyn ToolSession,
    listing: &[ToolDescriptor],
    name: &str,
    arguments: Map<String, Value>,
    logger: &dyn Logger,
) -> Result<String, DispatchError> {
    if !listing.iter().any(|tool| tool.name == name) {
        return Err(DispatchError::UnknownTool(name.to_string()));
    }

    logger.info(&format!("[ToolDispatcher] Executing {} with {} argument(s)", name, arguments.len()));
    let output = session.call_tool(name, arguments).await?;
    normalize_output(&output)
}

fn failure(name: &str, error: &DispatchError, logger: &dyn Logger) -> String {
    logger.error(&format!("[ToolDispatcher] {} failed: {}", name, error));
    format!("Error executing tool {}: {}", name, error)
}

/// Reduce a tool output to display text
///
/// The first content block is used. Text that parses as JSON is re-indented
/// with two spaces; anything else is returned unchanged.
pub fn normalize_output(output: &ToolOutput) -> Result<String, DispatchError> {
    let raw = match output {
        ToolOutput::Blocks(blocks) => match blocks.first() {
            Some(ContentBlock::Text { text }) => text.clone(),
            Some(block @ ContentBlock::Other { .. }) => serde_json::to_string(block)?,
            None => serde_json::to_string(blocks)?,
        },
        ToolOutput::Value(Value::String(text)) => text.clone(),
        ToolOutput::Value(value) => serde_json::to_string(value)?,
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(parsed) => Ok(serde_json::to_string_pretty(&parsed)?),
        Err(_) => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::mcp::MockSession;
    use serde_json::json;

    fn kb_session(output: ToolOutput) -> MockSession {
        MockSession::new().with_tool(ToolDescriptor::new("get_knowledge_base", "Search"), output)
    }

    #[test]
    fn test_json_text_is_pretty_printed() {
        let text = normalize_output(&ToolOutput::text(r#"{"a":1}"#)).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_plain_text_passes_unchanged() {
        let text = normalize_output(&ToolOutput::text("Q: Vacation?\nA: 15 days")).unwrap();
        assert_eq!(text, "Q: Vacation?\nA: 15 days");
    }

    #[test]
    fn test_only_first_block_used() {
        let output = ToolOutput::Blocks(vec![ContentBlock::text("first"), ContentBlock::text("second")]);
        assert_eq!(normalize_output(&output).unwrap(), "first");
    }

    #[test]
    fn test_bare_value_and_empty_blocks() {
        assert_eq!(normalize_output(&ToolOutput::Value(json!(7))).unwrap(), "7");
        assert_eq!(normalize_output(&ToolOutput::Value(json!("hi"))).unwrap(), "hi");
        assert_eq!(normalize_output(&ToolOutput::Blocks(vec![])).unwrap(), "[]");
    }

    #[test]
    fn test_non_text_block_serialized() {
        let output = ToolOutput::Blocks(vec![ContentBlock::Other {
            value: json!({ "uri": "file:///a" }),
        }]);
        let text = normalize_output(&output).unwrap();
        assert!(text.contains("\"uri\": \"file:///a\""));
    }

    #[tokio::test]
    async fn test_dispatch_returns_tool_text() {
        let session = kb_session(ToolOutput::text("Casual dress"));
        let mut args = Map::new();
        args.insert("query".to_string(), json!("dress code"));

        let text = dispatch(&session, "get_knowledge_base", args, &NoOpLogger::new()).await;
        assert_eq!(text, "Casual dress");
        assert_eq!(session.calls()[0].1["query"], json!("dress code"));
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let session = kb_session(ToolOutput::text("unused"));
        let text = dispatch(&session, "launch_rockets", Map::new(), &NoOpLogger::new()).await;

        assert!(text.starts_with("Error executing tool "));
        assert!(text.contains("launch_rockets"));
        assert!(session.calls().is_empty());
    }

    #[tokio::test]
    async fn test_session_failure_is_reported() {
        let session = MockSession::new().with_listed_tool(ToolDescriptor::new("flaky", ""));
        let listing = session.list_tools().await.unwrap();

        let text = dispatch_listed(&session, &listing, "flaky", Map::new(), &NoOpLogger::new()).await;
        assert!(text.starts_with("Error executing tool flaky: "));
    }

    #[tokio::test]
    async fn test_listing_failure_is_reported() {
        let session = MockSession::new().failing_listing();
        let text = dispatch(&session, "anything", Map::new(), &NoOpLogger::new()).await;
        assert!(text.starts_with("Error executing tool anything: "));
    }
}
