//! Environment variable secret store

use std::collections::HashMap;
use std::env;

use once_cell::sync::Lazy;

use super::traits::SecretStore;

/// Provider name to the environment variables checked for it, in order
static PROVIDER_ENV_VARS: Lazy<HashMap<&'static str, &'static [&'static str]>> = Lazy::new(|| {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("gemini", &["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("google", &["GEMINI_API_KEY", "GOOGLE_API_KEY"]);
    m.insert("openai", &["OPENAI_API_KEY"]);
    m.insert("anthropic", &["ANTHROPIC_API_KEY"]);
    m.insert("groq", &["GROQ_API_KEY"]);
    m.insert("ollama", &[]);
    m
});

/// Secret store backed by the process environment
///
/// Provider names are mapped to their conventional variables
/// (`gemini` → `GEMINI_API_KEY`, then `GOOGLE_API_KEY`); anything else is read
/// as a variable name directly.
///
/// # Example
///
/// ```
/// use kbridge_core::secrets::{SecretStore, EnvSecretStore};
///
/// let store = EnvSecretStore::new();
/// let has_gemini = store.has("gemini");
/// # let _ = has_gemini;
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSecretStore;

impl EnvSecretStore {
    /// Create a new environment variable secret store
    pub fn new() -> Self {
        Self
    }

    /// The environment variables consulted for a provider
    pub fn env_vars_for(provider: &str) -> Option<&'static [&'static str]> {
        PROVIDER_ENV_VARS.get(provider.to_lowercase().as_str()).copied()
    }

    fn read(var: &str) -> Option<String> {
        env::var(var).ok().filter(|v| !v.is_empty())
    }
}

impl SecretStore for EnvSecretStore {
    fn name(&self) -> &str {
        "env"
    }

    fn get(&self, key: &str) -> Option<String> {
        if let Some(vars) = Self::env_vars_for(key) {
            return vars.iter().find_map(|var| Self::read(var));
        }
        Self::read(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_store_direct_variable() {
        env::set_var("KBRIDGE_TEST_SECRET_DIRECT", "value");

        let store = EnvSecretStore::new();
        assert_eq!(store.get("KBRIDGE_TEST_SECRET_DIRECT"), Some("value".to_string()));
        assert_eq!(store.get_info("KBRIDGE_TEST_SECRET_DIRECT").source, "env");

        env::remove_var("KBRIDGE_TEST_SECRET_DIRECT");
    }

    #[test]
    fn test_env_store_empty_is_missing() {
        env::set_var("KBRIDGE_TEST_SECRET_EMPTY", "");

        let store = EnvSecretStore::new();
        assert!(!store.has("KBRIDGE_TEST_SECRET_EMPTY"));

        env::remove_var("KBRIDGE_TEST_SECRET_EMPTY");
    }

    #[test]
    fn test_provider_mapping() {
        assert_eq!(
            EnvSecretStore::env_vars_for("Gemini"),
            Some(&["GEMINI_API_KEY", "GOOGLE_API_KEY"][..])
        );
        assert_eq!(EnvSecretStore::env_vars_for("ollama"), Some(&[][..]));
        assert_eq!(EnvSecretStore::env_vars_for("nonexistent"), None);
        assert!(!EnvSecretStore::new().has("ollama"));
    }
}
