//! innkeeper_llms: provider-agnostic chat completions SDK.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                  ProviderRegistry                    │
//! │  ┌──────────────────────────────────────────────┐   │
//! │  │  HashMap<String, Arc<dyn Provider>>           │   │
//! │  └──────────────────────────────────────────────┘   │
//! │                       │                              │
//! │               ┌───────┴───────┐                      │
//! │               ▼               ▼                      │
//! │        ┌────────────┐   ┌──────────┐                 │
//! │        │    Groq    │   │ (future) │                 │
//! │        │  Provider  │   │          │                 │
//! │        └────────────┘   └──────────┘                 │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Every call is one-shot: no retries, no backoff, no streaming.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use innkeeper_llms::{GroqProvider, ProviderRegistry};
//!
//! let provider = GroqProvider::from_env().unwrap();
//! let registry = ProviderRegistry::new().register("groq", provider);
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export core abstractions
pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

// Re-export provider implementations
pub use providers::GroqProvider;

// Re-export commonly used types
pub use types::{
    FinishReason, GenerateOptions, GenerateRequest, GenerateResponse, Headers, Message, Role,
    Usage,
};
