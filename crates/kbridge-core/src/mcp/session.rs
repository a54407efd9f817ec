//! Tool session abstraction

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::{ToolDescriptor, ToolOutput};

use super::client::McpResult;

/// A live connection to a tool-hosting server
///
/// Implementations:
/// - `McpClient`: rmcp client over a child process or streamable HTTP
/// - `MockSession`: canned tools for tests
#[async_trait]
pub trait ToolSession: Send + Sync {
    /// List the tools the server currently exposes
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>>;

    /// Invoke a tool by name with keyed arguments
    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput>;
}
