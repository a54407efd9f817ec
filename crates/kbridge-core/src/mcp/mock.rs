//! In-process tool session for tests

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use crate::types::{ToolDescriptor, ToolOutput};

use super::client::{McpError, McpResult};
use super::session::ToolSession;

/// Tool session with a fixed listing and canned outputs
///
/// Calls to a tool without a canned output fail with `ToolCallFailed`, like a
/// server that doesn't know the tool.
#[derive(Default)]
pub struct MockSession {
    tools: Vec<ToolDescriptor>,
    outputs: HashMap<String, ToolOutput>,
    fail_listing: bool,
    calls: Mutex<Vec<(String, Map<String, Value>)>>,
}

impl MockSession {
    /// Create a session without tools
    pub fn new() -> Self {
        Self::default()
    }

    /// Expose a tool that answers with `output`
    pub fn with_tool(mut self, descriptor: ToolDescriptor, output: ToolOutput) -> Self {
        self.outputs.insert(descriptor.name.clone(), output);
        self.tools.push(descriptor);
        self
    }

    /// Expose a tool that has no canned output (calling it fails)
    pub fn with_listed_tool(mut self, descriptor: ToolDescriptor) -> Self {
        self.tools.push(descriptor);
        self
    }

    /// Make `list_tools` fail as if the transport dropped
    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Calls received so far
    pub fn calls(&self) -> Vec<(String, Map<String, Value>)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl ToolSession for MockSession {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        if self.fail_listing {
            return Err(McpError::ConnectionFailed("session closed".to_string()));
        }
        Ok(self.tools.clone())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput> {
        self.calls.lock().push((name.to_string(), arguments));
        self.outputs
            .get(name)
            .cloned()
            .ok_or_else(|| McpError::ToolCallFailed(format!("no output for {}", name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_session_records_calls() {
        let session = MockSession::new()
            .with_tool(ToolDescriptor::new("echo", "Echo"), ToolOutput::text("hi"));

        assert_eq!(session.list_tools().await.unwrap().len(), 1);
        let output = session.call_tool("echo", Map::new()).await.unwrap();
        assert_eq!(output, ToolOutput::text("hi"));
        assert_eq!(session.calls()[0].0, "echo");

        assert!(session.call_tool("missing", Map::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_failing_listing() {
        let session = MockSession::new().failing_listing();
        assert!(session.list_tools().await.is_err());
    }
}
