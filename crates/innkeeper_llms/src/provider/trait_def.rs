//! The `Provider` trait implemented by every backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `"groq"`.
    fn provider_id(&self) -> &str;

    /// Headers for every request, with `custom_headers` merged on top.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Models the provider can serve. Defaults to none known.
    async fn list_models(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    /// Run a single completion. Never retried.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;
}
