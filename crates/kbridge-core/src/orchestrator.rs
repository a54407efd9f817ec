//! Query orchestration
//!
//! One user query, one pass: list the session's tools, ask the model with
//! those tools declared, then either run the requested tool or return the
//! model's own answer. Nothing is kept between queries.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use thiserror::Error;

use crate::logging::Logger;
use crate::mcp::{McpError, ToolSession};
use crate::providers::{GenerateRequest, ModelBackend, ProviderError};
use crate::tools::{adapt, dispatch_listed, interpret, Interpretation};

/// Default model id
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Errors that stop a query before it produces an answer
#[derive(Error, Debug)]
pub enum QueryError {
    #[error(transparent)]
    Session(#[from] McpError),

    #[error(transparent)]
    Backend(#[from] ProviderError),
}

/// Wrap the user query with instructions that steer the model toward the tools
pub fn enriched_prompt(query: &str) -> String {
    format!(
        "\nYou have access to company knowledge base tools. Please use the available tools to search for information about: {query}\n\
         \n\
         Available tools can help you find information about:\n\
         - Company policies (vacation, remote work, dress code)\n\
         - Employee benefits\n\
         - Sick leave policies\n\
         - Any other company-related information\n\
         \n\
         Please use the appropriate tool to search for this information rather than saying you don't have access to it.\n\
         \n\
         User question: {query}\n"
    )
}

/// Drives a single query through the model and the tool session
pub struct QueryOrchestrator {
    backend: Arc<dyn ModelBackend>,
    model: String,
    logger: Arc<dyn Logger>,
}

impl QueryOrchestrator {
    /// Create an orchestrator for `model` on `backend`
    pub fn new(backend: Arc<dyn ModelBackend>, model: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            backend,
            model: model.into(),
            logger,
        }
    }

    /// Model id used for every query
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answer `query`, always with a displayable string
    pub async fn process_query(&self, session: &dyn ToolSession, query: &str) -> String {
        self.logger.info(&format!("[QueryOrchestrator] Processing query: {}", query));

        match AssertUnwindSafe(self.run(session, query)).catch_unwind().await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e)) => {
                self.logger.error(&format!("[QueryOrchestrator] Query failed: {}", e));
                format!("Error processing query: {}", e)
            }
            Err(panic) => {
                let detail = panic_message(panic.as_ref());
                self.logger.error(&format!("[QueryOrchestrator] Query panicked: {}", detail));
                format!("Error processing query: {}", detail)
            }
        }
    }

    async fn run(&self, session: &dyn ToolSession, query: &str) -> Result<String, QueryError> {
        let listing = session.list_tools().await?;
        let declarations = adapt(&listing, self.logger.as_ref());
        self.logger.debug(&format!(
            "[QueryOrchestrator] Tools listed: {} of {} adapted",
            declarations.len(),
            listing.len()
        ));

        let request = GenerateRequest::new(self.model.clone(), enriched_prompt(query))
            .with_tools(declarations)
            .with_temperature(0.0);

        self.logger.debug(&format!("[QueryOrchestrator] Prompt sent to {}", self.backend.name()));
        let response = self.backend.generate(request).await?;

        match interpret(&response) {
            Interpretation::ToolCall(call) => {
                self.logger.info(&format!(
                    "[QueryOrchestrator] Tool call issued: {} {}",
                    call.name,
                    serde_json::Value::Object(call.arguments.clone())
                ));
                let output = dispatch_listed(
                    session,
                    &listing,
                    &call.name,
                    call.arguments,
                    self.logger.as_ref(),
                )
                .await;
                self.logger.debug("[QueryOrchestrator] Tool executed");
                Ok(output)
            }
            Interpretation::DirectText(text) => {
                self.logger.debug("[QueryOrchestrator] Direct answer");
                Ok(text)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unexpected panic".to_string()
    }
}
