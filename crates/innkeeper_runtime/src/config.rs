//! Runtime configuration for innkeeper

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use innkeeper_constant::defaults;
use serde::Serialize;

/// LLM provider selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    #[default]
    Groq,
}

impl LlmProvider {
    pub const ALL: [LlmProvider; 1] = [LlmProvider::Groq];

    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "groq",
        }
    }

    /// Environment variable holding the provider's API key.
    pub fn api_key_env(&self) -> &'static str {
        match self {
            LlmProvider::Groq => "GROQ_API_KEY",
        }
    }
}

impl FromStr for LlmProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(LlmProvider::Groq),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Runtime configuration
#[derive(Debug, Clone, Serialize)]
pub struct RuntimeConfig {
    /// LLM provider
    pub provider: LlmProvider,
    /// Model identifier sent with every completion
    pub model: String,
    /// Hotel page the excerpt is taken from
    pub url: String,
    /// Maximum tokens for the assistant reply
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    /// Characters kept from the extracted page text
    pub excerpt_limit: usize,
    /// Timeout for the page fetch (the completion call has none)
    pub fetch_timeout_secs: u64,
    /// Minimum wait before retrying a failed fetch of the same page (0 = none)
    pub refetch_cooldown_secs: u64,
    /// Where exported transcripts are written
    pub export_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            provider: LlmProvider::default(),
            model: defaults::MODEL.to_string(),
            url: defaults::HOTEL_URL.to_string(),
            max_tokens: defaults::MAX_OUTPUT_TOKENS,
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
            excerpt_limit: defaults::EXCERPT_CHAR_LIMIT,
            fetch_timeout_secs: defaults::FETCH_TIMEOUT_SECS,
            refetch_cooldown_secs: defaults::REFETCH_COOLDOWN_SECS,
            export_dir: PathBuf::from("."),
        }
    }

    pub fn with_provider(mut self, provider: LlmProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }

    pub fn with_excerpt_limit(mut self, limit: usize) -> Self {
        self.excerpt_limit = limit;
        self
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_refetch_cooldown_secs(mut self, secs: u64) -> Self {
        self.refetch_cooldown_secs = secs;
        self
    }

    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn refetch_cooldown(&self) -> Duration {
        Duration::from_secs(self.refetch_cooldown_secs)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::new();

        if let Ok(provider_str) = std::env::var("INNKEEPER_PROVIDER") {
            if let Ok(provider) = provider_str.parse::<LlmProvider>() {
                config.provider = provider;
            }
        }

        if let Ok(model) = std::env::var("INNKEEPER_MODEL") {
            config.model = model;
        }

        if let Ok(url) = std::env::var("INNKEEPER_URL") {
            config.url = url;
        }

        if let Some(val) = parse_env("INNKEEPER_MAX_TOKENS") {
            config.max_tokens = val;
        }

        if let Some(val) = parse_env("INNKEEPER_TEMPERATURE") {
            config.temperature = val;
        }

        if let Some(val) = parse_env("INNKEEPER_TOP_P") {
            config.top_p = val;
        }

        if let Some(val) = parse_env("INNKEEPER_EXCERPT_LIMIT") {
            config.excerpt_limit = val;
        }

        if let Some(val) = parse_env("INNKEEPER_FETCH_TIMEOUT_SECS") {
            config.fetch_timeout_secs = val;
        }

        if let Some(val) = parse_env("INNKEEPER_REFETCH_COOLDOWN_SECS") {
            config.refetch_cooldown_secs = val;
        }

        if let Ok(dir) = std::env::var("INNKEEPER_EXPORT_DIR") {
            config.export_dir = PathBuf::from(dir);
        }

        config
    }
}

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_provider_as_str() {
        assert_eq!(LlmProvider::Groq.as_str(), "groq");
        assert_eq!(LlmProvider::Groq.api_key_env(), "GROQ_API_KEY");
    }

    #[test]
    fn test_llm_provider_from_str() {
        assert_eq!("groq".parse(), Ok(LlmProvider::Groq));
        assert_eq!("GROQ".parse(), Ok(LlmProvider::Groq));
        assert!("unknown".parse::<LlmProvider>().is_err());
    }

    #[test]
    fn test_runtime_config_new() {
        let config = RuntimeConfig::new();
        assert_eq!(config.provider, LlmProvider::Groq);
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.url, "https://sriraghavendrahotel.com/");
        assert_eq!(config.max_tokens, 500);
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.top_p, 1.0);
        assert_eq!(config.excerpt_limit, 4000);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert_eq!(config.refetch_cooldown(), Duration::from_secs(5));
    }

    #[test]
    fn test_runtime_config_builder() {
        let config = RuntimeConfig::new()
            .with_model("llama-3.3-70b-versatile")
            .with_url("https://hotel.test/")
            .with_max_tokens(256)
            .with_temperature(0.2)
            .with_top_p(0.9)
            .with_excerpt_limit(1000)
            .with_fetch_timeout_secs(3)
            .with_refetch_cooldown_secs(0)
            .with_export_dir("/tmp/exports");

        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.url, "https://hotel.test/");
        assert_eq!(config.max_tokens, 256);
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.top_p, 0.9);
        assert_eq!(config.excerpt_limit, 1000);
        assert_eq!(config.fetch_timeout_secs, 3);
        assert_eq!(config.refetch_cooldown(), Duration::ZERO);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    }

    #[test]
    fn test_parse_env_ignores_garbage() {
        // SAFETY: test-only env mutation on a key no other test reads.
        unsafe { std::env::set_var("INNKEEPER_TEST_PARSE_ENV", "not-a-number") };
        assert_eq!(parse_env::<u32>("INNKEEPER_TEST_PARSE_ENV"), None);
        unsafe { std::env::set_var("INNKEEPER_TEST_PARSE_ENV", " 42 ") };
        assert_eq!(parse_env::<u32>("INNKEEPER_TEST_PARSE_ENV"), Some(42));
        unsafe { std::env::remove_var("INNKEEPER_TEST_PARSE_ENV") };
    }
}
