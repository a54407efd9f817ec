//! Model backend implementations
//!
//! ## Architecture
//!
//! `ModelBackend` is the only seam the rest of the crate sees. The real
//! implementation goes through the `genai` crate, which handles provider
//! protocols (Gemini, OpenAI, Anthropic, Ollama, ...) and function calling.
//! `MockBackend` is kept for tests.
//!
//! Auth flows through our `SecretStore`, not genai's env var lookup.

mod traits;
mod error;
mod genai_adapter;
mod genai_backend;
mod mock;

// Core traits and types
pub use traits::{GenerateRequest, ModelBackend};
pub use error::{ProviderError, ProviderResult};

// The real backend - every provider via genai
pub use genai_backend::GenaiBackend;
pub use genai_adapter::{model_name, provider_for_model};

// Mock backend for testing
pub use mock::{MockBackend, MockMode};
