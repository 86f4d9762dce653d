//! Groq-specific types

use serde::{Deserialize, Serialize};

/// Configuration for Groq provider
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication
    pub api_key: String,
    /// Base URL (default: https://api.groq.com/openai/v1)
    pub base_url: String,
}

impl GroqConfig {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.groq.com/openai/v1";

    /// Create new config with API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        // Strip /chat/completions suffix if the full endpoint URL was given
        if let Some(stripped) = url.trim_end_matches('/').strip_suffix("/chat/completions") {
            url = stripped.to_string();
        }
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }
}

/// Groq chat completion request
#[derive(Debug, Serialize)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<GroqMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub stream: bool,
}

/// Groq message
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GroqMessage {
    pub role: String,
    pub content: String,
}

/// Groq chat completion response
#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<GroqChoice>,
    #[serde(default)]
    pub usage: Option<GroqUsage>,
}

/// Groq response choice
#[derive(Debug, Deserialize)]
pub struct GroqChoice {
    pub message: GroqResponseMessage,
    pub finish_reason: Option<String>,
}

/// Groq response message
#[derive(Debug, Deserialize)]
pub struct GroqResponseMessage {
    pub content: Option<String>,
}

/// Groq usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroqUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Groq `/models` listing
#[derive(Debug, Deserialize)]
pub struct GroqModelList {
    pub data: Vec<GroqModel>,
}

#[derive(Debug, Deserialize)]
pub struct GroqModel {
    pub id: String,
}
