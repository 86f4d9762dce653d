//! Session manager for innkeeper.
//!
//! The Runtime holds the page extractor and the completion client; the
//! [`Session`] it acts on is owned by the caller and passed in by reference,
//! one action at a time.
//!
//! Split into focused submodules:
//! - **excerpt**: when to (re)fetch the hotel page
//! - **chat**: appending a question and its answer

mod chat;
mod excerpt;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use innkeeper_core::{Session, Transcript};
use innkeeper_llms::{GroqProvider, Provider, ProviderRegistry};
use tracing::info;

use crate::completion::{CompletionClient, GenerationParams};
use crate::config::{LlmProvider, RuntimeConfig};
use crate::error::RuntimeError;
use crate::extract::{HttpExtractor, PageExtractor};

pub struct Runtime {
    config: RuntimeConfig,
    extractor: Arc<dyn PageExtractor>,
    completion: CompletionClient,
}

impl Runtime {
    /// Create a Runtime with the HTTP extractor and the configured provider.
    ///
    /// Fails if the provider's API key is missing.
    pub fn new(config: RuntimeConfig) -> Result<Self, RuntimeError> {
        let extractor = HttpExtractor::new(config.fetch_timeout(), config.excerpt_limit)?;
        let provider = Self::create_provider(&config.provider)?;
        Ok(Self::with_components(config, Arc::new(extractor), provider))
    }

    /// Create a Runtime from explicit parts.
    pub fn with_components(
        config: RuntimeConfig,
        extractor: Arc<dyn PageExtractor>,
        provider: Arc<dyn Provider>,
    ) -> Self {
        let completion = CompletionClient::new(provider, &config.model)
            .with_params(GenerationParams::from_config(&config));

        Self {
            config,
            extractor,
            completion,
        }
    }

    /// Create an LLM provider based on configuration.
    pub fn create_provider(provider: &LlmProvider) -> Result<Arc<dyn Provider>, RuntimeError> {
        match provider {
            LlmProvider::Groq => {
                let groq = GroqProvider::from_env()
                    .map_err(|e| RuntimeError::ProviderNotFound(format!("Groq: {}", e)))?;
                Ok(Arc::new(groq))
            }
        }
    }

    /// Registry of every provider whose credentials are available.
    pub fn build_registry() -> ProviderRegistry {
        LlmProvider::ALL
            .iter()
            .fold(ProviderRegistry::new(), |registry, provider| {
                match Self::create_provider(provider) {
                    Ok(p) => registry.register_arc(provider.as_str(), p),
                    Err(_) => registry,
                }
            })
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn completion(&self) -> &CompletionClient {
        &self.completion
    }

    /// Reset the session to empty. Safe to call on an already-empty session.
    pub fn clear(&self, session: &mut Session) {
        let dropped = session.turn_count();
        session.clear();
        info!(session.id = %session.id, dropped_turns = dropped, "Session cleared");
    }

    /// Render the conversation as a timestamped transcript. Leaves the session untouched.
    pub fn export(&self, session: &Session) -> Transcript {
        Transcript::new(session.turns(), Local::now())
    }

    /// Export and write the transcript into `dir`, returning the file path.
    pub fn export_to_dir(&self, session: &Session, dir: &Path) -> Result<PathBuf, RuntimeError> {
        let path = self.export(session).write_to(dir)?;
        info!(session.id = %session.id, path = %path.display(), "Transcript exported");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_provider_without_key() {
        // SAFETY: only this test touches GROQ_API_KEY in this crate.
        unsafe { std::env::remove_var("GROQ_API_KEY") };
        let result = Runtime::create_provider(&LlmProvider::Groq);
        assert!(matches!(result, Err(RuntimeError::ProviderNotFound(msg)) if msg.starts_with("Groq:")));
        assert!(Runtime::build_registry().list_providers().is_empty());
    }
}
