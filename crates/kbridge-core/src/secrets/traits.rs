//! Credential lookup for the model API key
//!
//! kbridge needs exactly one credential: the Gemini key. Its presence decides
//! whether the knowledge server answers semantically or by keyword, and the
//! client backend refuses to start without it.

/// Whether a key is available and which store holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretInfo {
    pub available: bool,
    /// Store name, or "none"
    pub source: String,
}

impl SecretInfo {
    pub fn new(available: bool, source: impl Into<String>) -> Self {
        Self {
            available,
            source: source.into(),
        }
    }

    pub fn not_found() -> Self {
        Self {
            available: false,
            source: "none".to_string(),
        }
    }
}

/// Read-only credential source
///
/// Callers ask for a provider name as returned by `provider_for_model`, so a
/// `gemini-1.5-flash` model looks up `gemini`. `EnvSecretStore` resolves that
/// to `GEMINI_API_KEY`, then `GOOGLE_API_KEY`. A raw variable name such as
/// `GEMINI_API_KEY` is also accepted and read as is.
///
/// ```
/// use kbridge_core::{MemorySecretStore, SecretStore};
///
/// let store = MemorySecretStore::new().with_secret("gemini", "test-key");
/// assert_eq!(store.get("gemini").as_deref(), Some("test-key"));
/// assert!(!store.get_info("openai").available);
/// ```
pub trait SecretStore: Send + Sync {
    /// Store name reported in `SecretInfo::source`
    fn name(&self) -> &str;

    /// Key for `provider` (or a raw variable name); empty values count as missing
    fn get(&self, key: &str) -> Option<String>;

    fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_info(&self, key: &str) -> SecretInfo {
        if self.has(key) {
            SecretInfo::new(true, self.name())
        } else {
            SecretInfo::not_found()
        }
    }
}
