//! Mock backend for testing
//!
//! Deterministic, configurable responses without network dependencies.
//! Every request is recorded so tests can assert on prompts and settings.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{Map, Value};

use super::error::{ProviderError, ProviderResult};
use super::traits::{GenerateRequest, ModelBackend};
use crate::logging::Logger;
use crate::types::{ModelResponse, Part};

/// Mock response mode
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Echo back the prompt as text
    Echo,
    /// Return this response for every request
    Fixed(ModelResponse),
    /// Pop responses in order; an exhausted script returns an empty response
    Script(Vec<ModelResponse>),
    /// Fail every request
    Error(String),
}

/// Mock model backend for testing
pub struct MockBackend {
    mode: MockMode,
    script: Mutex<VecDeque<ModelResponse>>,
    requests: Mutex<Vec<GenerateRequest>>,
    logger: Arc<dyn Logger>,
}

impl MockBackend {
    /// Create with a specific mode
    pub fn with_mode(mode: MockMode, logger: Arc<dyn Logger>) -> Self {
        let script = match &mode {
            MockMode::Script(responses) => responses.iter().cloned().collect(),
            _ => VecDeque::new(),
        };
        Self {
            mode,
            script: Mutex::new(script),
            requests: Mutex::new(Vec::new()),
            logger,
        }
    }

    /// Echo the prompt back
    pub fn echo(logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Echo, logger)
    }

    /// Always answer with this text
    pub fn text(text: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(ModelResponse::from_text(text)), logger)
    }

    /// Always request this tool call
    pub fn tool_call(name: impl Into<String>, args: Value, logger: Arc<dyn Logger>) -> Self {
        let args = match args {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self::with_mode(
            MockMode::Fixed(ModelResponse::from_parts(vec![Part::function_call(name, args)])),
            logger,
        )
    }

    /// Always return this response
    pub fn fixed(response: ModelResponse, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Fixed(response), logger)
    }

    /// Fail every request with this message
    pub fn error(message: impl Into<String>, logger: Arc<dyn Logger>) -> Self {
        Self::with_mode(MockMode::Error(message.into()), logger)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl ModelBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<ModelResponse> {
        self.logger.debug(&format!(
            "MockBackend: generate called with {} tool(s)",
            request.tools.len()
        ));
        let prompt = request.prompt.clone();
        self.requests.lock().push(request);

        match &self.mode {
            MockMode::Echo => Ok(ModelResponse::from_text(format!("Echo: {}", prompt))),
            MockMode::Fixed(response) => Ok(response.clone()),
            MockMode::Script(_) => Ok(self.script.lock().pop_front().unwrap_or_default()),
            MockMode::Error(message) => Err(ProviderError::Other(format!("Mock error: {}", message))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use serde_json::json;

    fn test_logger() -> Arc<dyn Logger> {
        Arc::new(NoOpLogger::new())
    }

    fn request(prompt: &str) -> GenerateRequest {
        GenerateRequest::new("mock-model", prompt)
    }

    #[tokio::test]
    async fn test_echo_mode() {
        let backend = MockBackend::echo(test_logger());
        let response = backend.generate(request("Hello, world!")).await.unwrap();
        assert_eq!(response.usable_text().as_deref(), Some("Echo: Hello, world!"));
    }

    #[tokio::test]
    async fn test_tool_call_mode() {
        let backend = MockBackend::tool_call("get_knowledge_base", json!({ "query": "x" }), test_logger());
        let response = backend.generate(request("anything")).await.unwrap();
        let call = response.candidates[0].parts[0].as_function_call().unwrap();
        assert_eq!(call.name, "get_knowledge_base");
    }

    #[tokio::test]
    async fn test_script_mode_runs_out() {
        let backend = MockBackend::with_mode(
            MockMode::Script(vec![ModelResponse::from_text("first")]),
            test_logger(),
        );
        let first = backend.generate(request("a")).await.unwrap();
        let second = backend.generate(request("b")).await.unwrap();

        assert_eq!(first.usable_text().as_deref(), Some("first"));
        assert!(second.candidates.is_empty());
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_error_mode() {
        let backend = MockBackend::error("boom", test_logger());
        let result = backend.generate(request("a")).await;
        assert!(result.is_err());
        assert_eq!(backend.requests()[0].prompt, "a");
    }
}
