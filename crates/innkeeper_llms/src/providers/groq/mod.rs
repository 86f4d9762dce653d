//! Groq provider module
//!
//! Implements the Provider trait against Groq's OpenAI-compatible chat API.
//! API docs: https://console.groq.com/docs/api-reference#chat-create

mod convert;
mod provider;
mod types;

pub use provider::GroqProvider;
pub use types::{GroqConfig, GroqRequest, GroqResponse};
