//! kbridge Core
//!
//! Bridges an LLM with function calling to tools served over MCP, and ships
//! the company knowledge base server those tools usually come from.
//!
//! ## Query pipeline
//!
//! The `QueryOrchestrator` lists the session's tools, adapts their schemas
//! for the model, asks the model, and either dispatches the requested tool or
//! returns the model's own text:
//!
//! ```rust,ignore
//! use kbridge_core::{QueryOrchestrator, McpClient, GenaiBackend, EnvSecretStore};
//!
//! let backend = GenaiBackend::from_secrets("gemini-1.5-flash", &EnvSecretStore::new(), logger.clone())?;
//! let orchestrator = QueryOrchestrator::new(Arc::new(backend), "gemini-1.5-flash", logger.clone());
//!
//! let session = McpClient::connect_child_process("kbridge", &["serve".into()], &env, logger).await?;
//! let answer = orchestrator.process_query(&session, "What is the dress code?").await;
//! ```
//!
//! ## Knowledge server
//!
//! ```rust,ignore
//! use kbridge_core::{KnowledgeBase, KnowledgeRetriever, KnowledgeServer};
//!
//! let kb = Arc::new(KnowledgeBase::load_or_seed(&path, logger.as_ref()));
//! let retriever = KnowledgeRetriever::from_secrets(kb, "gemini-1.5-flash", &EnvSecretStore::new(), logger.clone());
//! KnowledgeServer::new(Arc::new(retriever), logger).serve_stdio().await?;
//! // or: .serve_http("127.0.0.1:8050").await?, endpoint at http://127.0.0.1:8050/mcp
//! ```

pub mod types;
pub mod secrets;
pub mod logging;
pub mod config;
pub mod providers;
pub mod tools;
pub mod mcp;
pub mod knowledge;
pub mod orchestrator;
pub mod server;

// Re-export commonly used types
pub use types::{
    Candidate, ContentBlock, FunctionCall, ModelResponse, Part,
    ToolCall, ToolDeclaration, ToolDescriptor, ToolOutput,
};

pub use secrets::{SecretStore, SecretInfo, EnvSecretStore, MemorySecretStore};

pub use logging::{Logger, SharedLogger, LogLevel, NoOpLogger, ConsoleLogger, MemoryLogger};

pub use config::{ConfigError, ConfigFile, ConfigResult, FileConfigProvider, ServerTransport};

pub use providers::{GenerateRequest, ModelBackend, ProviderError, ProviderResult, GenaiBackend, MockBackend};

pub use tools::{adapt, interpret, dispatch, dispatch_listed, AdaptError, DispatchError, Interpretation};

// MCP client using official rmcp SDK
pub use mcp::{McpClient, McpError, McpResult, MockSession, ToolSession};

pub use knowledge::{KnowledgeBase, KnowledgeError, KnowledgeRetriever, QaRecord, Strategy};

pub use orchestrator::{QueryOrchestrator, QueryError, DEFAULT_MODEL};

pub use server::{KnowledgeServer, ServerError};
