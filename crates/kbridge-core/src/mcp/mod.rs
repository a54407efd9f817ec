//! MCP (Model Context Protocol) client side
//!
//! Uses the official rmcp SDK to connect to MCP servers, either by spawning
//! the server as a child process (stdio) or over streamable HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use kbridge_core::mcp::{McpClient, ToolSession};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger::new());
//!
//! // Spawn the knowledge server and talk to it over stdio
//! let client = McpClient::connect_child_process("kbridge", &["serve".into()], &Default::default(), logger).await?;
//!
//! let tools = client.list_tools().await?;
//! let result = client.call_tool("get_knowledge_base", args).await?;
//! ```

mod client;
mod mock;
mod session;

pub use client::{McpClient, McpError, McpResult};
pub use mock::MockSession;
pub use session::ToolSession;
