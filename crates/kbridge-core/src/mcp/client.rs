//! MCP Client using the official rmcp SDK
//!
//! Connects to MCP servers by spawning them (stdio) or over HTTP.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rmcp::{
    model::{CallToolRequestParams, ClientCapabilities, ClientInfo, Implementation},
    service::RunningService,
    transport::TokioChildProcess,
    RoleClient, ServiceExt,
};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::process::Command;

use crate::logging::Logger;
use crate::types::{ToolDescriptor, ToolOutput};

use super::session::ToolSession;

/// MCP client errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Initialization failed: {0}")]
    InitializationFailed(String),

    #[error("Tool call failed: {0}")]
    ToolCallFailed(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Protocol error: {0}")]
    Protocol(String),
}

pub type McpResult<T> = Result<T, McpError>;

/// MCP client for the knowledge server or any other MCP server
pub struct McpClient {
    /// The underlying rmcp running service
    client: RunningService<RoleClient, ClientInfo>,
    /// Per-request timeout; `None` leaves it to the transport
    request_timeout: Option<Duration>,
    /// Logger
    logger: Arc<dyn Logger>,
}

fn client_info() -> ClientInfo {
    ClientInfo {
        meta: None,
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "kbridge".to_string(),
            title: Some("kbridge".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),
            website_url: None,
            icons: None,
        },
    }
}

impl McpClient {
    /// Spawn an MCP server process and connect to it over its stdio
    pub async fn connect_child_process(
        program: &str,
        args: &[String],
        env: &HashMap<String, String>,
        logger: Arc<dyn Logger>,
    ) -> McpResult<Self> {
        logger.info(&format!("[McpClient] Spawning server: {} {}", program, args.join(" ")));

        let mut command = Command::new(program);
        command.args(args).envs(env);

        let transport = TokioChildProcess::new(command)
            .map_err(|e| McpError::ConnectionFailed(e.to_string()))?;

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client,
            request_timeout: None,
            logger,
        })
    }

    /// Connect to an MCP server over HTTP (Streamable HTTP transport)
    pub async fn connect_http(url: &str, logger: Arc<dyn Logger>) -> McpResult<Self> {
        use rmcp::transport::StreamableHttpClientTransport;

        logger.info(&format!("[McpClient] Connecting to HTTP: {}", url));

        let transport = StreamableHttpClientTransport::from_uri(url);

        let client = client_info()
            .serve(transport)
            .await
            .map_err(|e| McpError::InitializationFailed(e.to_string()))?;

        logger.info("[McpClient] Connected and initialized successfully");

        Ok(Self {
            client,
            request_timeout: None,
            logger,
        })
    }

    /// Bound every request by `timeout`
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    async fn bounded<T, F>(&self, fut: F) -> McpResult<T>
    where
        F: Future<Output = McpResult<T>>,
    {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| McpError::Timeout(limit))?,
            None => fut.await,
        }
    }

    /// Get server info
    pub fn server_info(&self) -> Option<&Implementation> {
        self.client.peer_info().map(|info| &info.server_info)
    }

    /// Close the connection
    pub async fn close(self) -> McpResult<()> {
        self.logger.info("[McpClient] Closing connection");
        self.client
            .cancel()
            .await
            .map_err(|e| McpError::Protocol(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ToolSession for McpClient {
    async fn list_tools(&self) -> McpResult<Vec<ToolDescriptor>> {
        let result = self
            .bounded(async {
                self.client
                    .list_tools(Default::default())
                    .await
                    .map_err(|e| McpError::Protocol(e.to_string()))
            })
            .await?;

        self.logger.info(&format!("[McpClient] Listed {} tools", result.tools.len()));

        Ok(result.tools.into_iter().map(ToolDescriptor::from).collect())
    }

    async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> McpResult<ToolOutput> {
        self.logger.info(&format!("[McpClient] Calling tool: {}", name));

        let params = CallToolRequestParams {
            meta: None,
            name: name.to_owned().into(),
            arguments: Some(arguments),
            task: None,
        };

        let result = self
            .bounded(async {
                self.client
                    .call_tool(params)
                    .await
                    .map_err(|e| McpError::ToolCallFailed(e.to_string()))
            })
            .await?;

        if result.is_error.unwrap_or(false) {
            self.logger.warn(&format!("[McpClient] Tool {} reported an error result", name));
        }

        Ok(ToolOutput::from(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_info() {
        let info = client_info();
        assert_eq!(info.client_info.name, "kbridge");
        assert_eq!(info.client_info.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_connection_error() {
        let result = McpClient::connect_child_process(
            "/nonexistent/kbridge-server",
            &[],
            &HashMap::new(),
            Arc::new(crate::logging::NoOpLogger::new()),
        )
        .await;
        assert!(matches!(result, Err(McpError::ConnectionFailed(_))));
    }

    #[test]
    fn test_timeout_display() {
        let err = McpError::Timeout(Duration::from_secs(5));
        assert_eq!(err.to_string(), "Request timed out after 5s");
    }
}
