//! Model backend trait definition

use async_trait::async_trait;

use crate::types::{ModelResponse, ToolDeclaration};
use super::error::ProviderResult;

/// A single generation request
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Model identifier as used by the backend (e.g. "gemini-1.5-flash")
    pub model: String,
    /// Prompt sent as the single user turn
    pub prompt: String,
    /// Tools the model may call
    pub tools: Vec<ToolDeclaration>,
    /// Temperature for response generation
    pub temperature: f32,
    /// Maximum tokens to generate
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    /// Create a request with no tools and temperature 0
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            tools: Vec::new(),
            temperature: 0.0,
            max_output_tokens: None,
        }
    }

    /// Set tools
    pub fn with_tools(mut self, tools: Vec<ToolDeclaration>) -> Self {
        self.tools = tools;
        self
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max output tokens
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }
}

/// Language model backend
///
/// Implementations:
/// - `GenaiBackend`: any provider the `genai` crate speaks (Gemini by default)
/// - `MockBackend`: scripted responses for tests
#[async_trait]
pub trait ModelBackend: Send + Sync {
    /// Backend name for logs (e.g., "gemini", "mock")
    fn name(&self) -> &str;

    /// Run one non-streaming generation
    async fn generate(&self, request: GenerateRequest) -> ProviderResult<ModelResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerateRequest::new("gemini-1.5-flash", "hello")
            .with_temperature(0.1)
            .with_max_output_tokens(1024);

        assert_eq!(request.model, "gemini-1.5-flash");
        assert!((request.temperature - 0.1).abs() < f32::EPSILON);
        assert_eq!(request.max_output_tokens, Some(1024));
        assert!(request.tools.is_empty());
    }
}
