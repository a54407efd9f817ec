//! Credential lookup for model backends
//!
//! - `SecretStore` trait for read-only credential lookup
//! - `EnvSecretStore`: environment variables (the production source)
//! - `MemorySecretStore`: in-memory, for tests and embedding

mod traits;
mod env_store;
mod memory_store;

pub use traits::{SecretStore, SecretInfo};
pub use env_store::EnvSecretStore;
pub use memory_store::MemorySecretStore;
