//! GenaiBackend - model backend built on the genai crate
//!
//! One non-streaming chat call per `generate`. The provider is inferred from
//! the model id (Gemini unless the id says otherwise).

use std::sync::Arc;

use async_trait::async_trait;
use genai::Client;

use crate::logging::Logger;
use crate::secrets::SecretStore;
use crate::types::ModelResponse;

use super::error::{ProviderError, ProviderResult};
use super::genai_adapter::{
    create_client, from_genai_response, model_name, provider_for_model, to_genai_options,
    to_genai_request,
};
use super::traits::{GenerateRequest, ModelBackend};

/// Model backend using genai for all supported LLM APIs
pub struct GenaiBackend {
    /// Provider identifier used in logs and errors
    provider_id: String,
    /// Authenticated client
    client: Client,
    /// Logger for debug output
    logger: Arc<dyn Logger>,
}

impl GenaiBackend {
    /// Create a backend with an explicit API key
    pub fn new(provider_id: impl Into<String>, api_key: Option<String>, logger: Arc<dyn Logger>) -> Self {
        Self {
            provider_id: provider_id.into(),
            client: create_client(api_key),
            logger,
        }
    }

    /// Create a backend for `model`, resolving its key from `secrets`
    ///
    /// Returns `MissingApiKey` when the provider needs a key and none is
    /// available. Ollama runs without one.
    pub fn from_secrets(
        model: &str,
        secrets: &dyn SecretStore,
        logger: Arc<dyn Logger>,
    ) -> ProviderResult<Self> {
        let provider = provider_for_model(model);
        let api_key = secrets.get(provider);

        if api_key.is_none() && provider != "ollama" {
            return Err(ProviderError::missing_api_key(provider));
        }

        logger.info(&format!(
            "[GenaiBackend] Using provider {} (key from {})",
            provider,
            secrets.name()
        ));

        Ok(Self::new(provider, api_key, logger))
    }
}

#[async_trait]
impl ModelBackend for GenaiBackend {
    fn name(&self) -> &str {
        &self.provider_id
    }

    async fn generate(&self, request: GenerateRequest) -> ProviderResult<ModelResponse> {
        let model = model_name(&request.model);
        self.logger.debug(&format!(
            "[GenaiBackend] generate: provider={}, model={}, tools={}, temperature={}",
            self.provider_id,
            model,
            request.tools.len(),
            request.temperature
        ));

        let chat_req = to_genai_request(&request);
        let options = to_genai_options(&request);

        let response = self
            .client
            .exec_chat(model, chat_req, Some(&options))
            .await
            .map_err(|e| {
                self.logger.error(&format!("[GenaiBackend] Request failed: {}", e));
                ProviderError::api_error(self.provider_id.clone(), e.to_string())
            })?;

        let converted = from_genai_response(&response);
        self.logger.debug(&format!(
            "[GenaiBackend] Response with {} candidate(s)",
            converted.candidates.len()
        ));

        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::secrets::MemorySecretStore;

    #[test]
    fn test_from_secrets_requires_key() {
        let secrets = MemorySecretStore::new();
        let result = GenaiBackend::from_secrets("gemini-1.5-flash", &secrets, Arc::new(NoOpLogger));
        assert!(matches!(result, Err(ProviderError::MissingApiKey { ref provider }) if provider == "gemini"));
    }

    #[test]
    fn test_from_secrets_with_key() {
        let secrets = MemorySecretStore::new().with_secret("gemini", "test-key");
        let backend = GenaiBackend::from_secrets("gemini-1.5-flash", &secrets, Arc::new(NoOpLogger))
            .expect("backend should build");
        assert_eq!(backend.name(), "gemini");
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let secrets = MemorySecretStore::new();
        let backend = GenaiBackend::from_secrets("ollama/llama3", &secrets, Arc::new(NoOpLogger))
            .expect("ollama should not need a key");
        assert_eq!(backend.name(), "ollama");
    }
}
