//! Knowledge base MCP server
//!
//! Exposes the `KnowledgeRetriever` as a single MCP tool, either on stdio or
//! as a streamable HTTP endpoint. On stdio all logging must go to stderr.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars, tool, tool_handler, tool_router,
    transport::streamable_http_server::{
        session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
    },
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::net::TcpListener;

use crate::knowledge::KnowledgeRetriever;
use crate::logging::Logger;

/// Name the server announces during initialization
pub const SERVER_NAME: &str = "Company Knowledge Base Server";

/// Route of the MCP endpoint in HTTP mode
pub const MCP_HTTP_PATH: &str = "/mcp";

/// Server lifecycle errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Failed to start server: {0}")]
    Start(String),

    #[error("Failed to listen on {addr}: {message}")]
    Bind { addr: String, message: String },

    #[error("Server stopped abnormally: {0}")]
    Stopped(String),
}

/// Parameters for the get_knowledge_base tool
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct KnowledgeQuery {
    /// The user's question about company policies or information
    pub query: String,
}

/// MCP server handler backed by a knowledge retriever
#[derive(Clone)]
pub struct KnowledgeServer {
    retriever: Arc<KnowledgeRetriever>,
    logger: Arc<dyn Logger>,
    tool_router: ToolRouter<Self>,
}

impl KnowledgeServer {
    pub fn new(retriever: Arc<KnowledgeRetriever>, logger: Arc<dyn Logger>) -> Self {
        Self {
            retriever,
            logger,
            tool_router: Self::tool_router(),
        }
    }

    /// Serve on stdin/stdout until the client disconnects
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        let logger = self.logger.clone();
        logger.info(&format!(
            "[KnowledgeServer] Starting MCP server with stdio transport ({} search)",
            self.retriever.strategy().name()
        ));

        let service = self
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| ServerError::Start(e.to_string()))?;

        let reason = service
            .waiting()
            .await
            .map_err(|e| ServerError::Stopped(e.to_string()))?;

        logger.info(&format!("[KnowledgeServer] Server stopped: {:?}", reason));
        Ok(())
    }

    /// Axum router with the MCP endpoint mounted at `/mcp`
    ///
    /// Every HTTP session gets its own clone of the handler; they all share
    /// the same retriever.
    pub fn http_router(self) -> axum::Router {
        let service = StreamableHttpService::new(
            move || Ok(self.clone()),
            LocalSessionManager::default().into(),
            StreamableHttpServerConfig::default(),
        );
        axum::Router::new().nest_service(MCP_HTTP_PATH, service)
    }

    /// Bind `addr` and serve streamable HTTP until the process stops
    pub async fn serve_http(self, addr: &str) -> Result<(), ServerError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| ServerError::Bind {
            addr: addr.to_string(),
            message: e.to_string(),
        })?;
        self.serve_http_listener(listener).await
    }

    /// Serve streamable HTTP on an already bound listener
    pub async fn serve_http_listener(self, listener: TcpListener) -> Result<(), ServerError> {
        let logger = self.logger.clone();
        let local = listener
            .local_addr()
            .map_err(|e| ServerError::Start(e.to_string()))?;
        logger.info(&format!(
            "[KnowledgeServer] Starting MCP server on http://{}{} ({} search)",
            local,
            MCP_HTTP_PATH,
            self.retriever.strategy().name()
        ));

        axum::serve(listener, self.http_router())
            .await
            .map_err(|e| ServerError::Stopped(e.to_string()))?;

        logger.info("[KnowledgeServer] HTTP server stopped");
        Ok(())
    }
}

#[tool_router]
impl KnowledgeServer {
    #[tool(
        description = "Search and retrieve information from the company knowledge base. \
                       Use this for any questions about vacation and time-off policies, remote work, \
                       employee benefits, sick leave, dress codes, training and development, \
                       HR procedures, safety policies, or any other company policies or procedures."
    )]
    async fn get_knowledge_base(
        &self,
        Parameters(params): Parameters<KnowledgeQuery>,
    ) -> Result<CallToolResult, McpError> {
        self.logger.info(&format!(
            "[KnowledgeServer] get_knowledge_base called with query: {}",
            params.query
        ));

        let answer = self.retriever.retrieve(&params.query).await;
        Ok(CallToolResult::success(vec![Content::text(answer)]))
    }
}

#[tool_handler]
impl ServerHandler for KnowledgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                title: Some(SERVER_NAME.to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Company knowledge base. Use 'get_knowledge_base' with a natural language \
                 question about company policies, benefits or procedures."
                    .to_string(),
            ),
            ..Default::default()
        }
    }
}
