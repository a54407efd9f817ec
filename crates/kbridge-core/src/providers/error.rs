//! Provider error types

use thiserror::Error;

/// Errors that can occur while talking to a model backend
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Missing API key
    #[error("API key is required for {provider}")]
    MissingApiKey { provider: String },

    /// API request failed
    #[error("{provider} API error: {message}")]
    ApiError { provider: String, message: String },

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Create an API error
    pub fn api_error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiError {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a missing API key error
    pub fn missing_api_key(provider: impl Into<String>) -> Self {
        Self::MissingApiKey {
            provider: provider.into(),
        }
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ProviderError::missing_api_key("gemini").to_string(),
            "API key is required for gemini"
        );
        assert_eq!(
            ProviderError::api_error("gemini", "quota exceeded").to_string(),
            "gemini API error: quota exceeded"
        );
        assert_eq!(ProviderError::Other("Mock error: x".to_string()).to_string(), "Mock error: x");
    }
}
