use std::collections::HashMap;
use std::time::Duration;

/// Configuration record every provider factory receives.
///
/// This is the Rust shape of the out-of-scope "configuration loading"
/// collaborator (spec.md §1/§6): the core never parses env vars or config
/// files itself, it only defines the record a factory consumes. Unknown
/// `options` entries are ignored by factories that don't recognise them.
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// API key/token, if the provider requires authentication.
    pub api_key: Option<String>,
    /// Base URL for HTTP/WebSocket calls.
    pub base_url: Option<String>,
    /// Request timeout. Providers default this to 30-60s when unset.
    pub timeout: Option<Duration>,
    /// Provider-specific, freeform options.
    pub options: HashMap<String, serde_json::Value>,
}

impl ProviderConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Returns the configured timeout, or `default` when unset.
    pub fn timeout_or(&self, default: Duration) -> Duration {
        self.timeout.unwrap_or(default)
    }

    /// Reads a string option.
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.options.get(key).and_then(|v| v.as_str())
    }

    /// Reads an integer option.
    pub fn option_i64(&self, key: &str) -> Option<i64> {
        self.options.get(key).and_then(|v| v.as_i64())
    }

    /// Reads a boolean option.
    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.options.get(key).and_then(|v| v.as_bool())
    }

    /// Reads the API key, falling back to the given environment variable.
    pub fn api_key_or_env(&self, env_var: &str) -> Option<String> {
        self.api_key.clone().or_else(|| std::env::var(env_var).ok())
    }
}
