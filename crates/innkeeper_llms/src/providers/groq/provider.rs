//! Groq provider implementation

use super::convert::{from_groq_response, to_groq_request};
use super::types::{GroqConfig, GroqModelList, GroqResponse};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Groq provider
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "GROQ_API_KEY";
    /// Environment variable overriding the base URL
    pub const BASE_URL_ENV: &'static str = "GROQ_BASE_URL";

    /// Create a new Groq provider
    pub fn new(config: GroqConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::MissingApiKey("groq".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("groq".to_string()))?;

        let mut config = GroqConfig::new(api_key);
        if let Ok(base_url) = std::env::var(Self::BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Self::new(config)
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn error_from_response(response: reqwest::Response) -> Error {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        Error::provider_error(format!("Groq API error {}: {}", status, error_text))
    }
}

#[async_trait]
impl Provider for GroqProvider {
    fn provider_id(&self) -> &str {
        "groq"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let url = format!("{}/models", self.config.base_url);
        let headers = self.build_headers(None);

        let response = self
            .client
            .get(&url)
            .headers(headers.to_reqwest_headers())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let list: GroqModelList = response.json().await?;
        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let groq_request = to_groq_request(&request);
        let headers = self.build_headers(request.options.headers.as_ref());

        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Sending Groq chat completion"
        );

        let response = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&groq_request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let groq_resp: GroqResponse = response.json().await?;
        from_groq_response(groq_resp)
    }
}
