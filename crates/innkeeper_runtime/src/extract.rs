//! Text extraction: fetch a hotel page and reduce it to a bounded excerpt.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use innkeeper_constant::app::USER_AGENT;
use innkeeper_core::Excerpt;
use innkeeper_observability::{fetch_span, record_duration, record_error};
use reqwest::Client;
use scraper::Html;
use thiserror::Error;
use tracing::{Instrument, debug, info};

use crate::error::{Result, RuntimeError};

/// Elements whose text never reaches the reader.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template", "noscript"];

/// Source of page excerpts. Never fails: problems come back as `Excerpt::Failed`.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Excerpt;
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP status {0}")]
    Status(reqwest::StatusCode),

    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("page has no visible text")]
    NoText,
}

/// Single-attempt HTTP GET with a fixed timeout, no retries.
pub struct HttpExtractor {
    client: Client,
    timeout: Duration,
    limit: usize,
}

impl HttpExtractor {
    pub fn new(timeout: Duration, limit: usize) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| RuntimeError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            timeout,
            limit,
        })
    }

    async fn fetch(&self, url: &str) -> std::result::Result<String, ExtractError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                ExtractError::Timeout(self.timeout.as_secs())
            } else {
                ExtractError::Transport(e)
            }
        };

        let response = self.client.get(url).send().await.map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status(status));
        }

        response.text().await.map_err(classify)
    }

    /// Fetch `url` and keep its visible text, rejecting pages that have none.
    async fn fetch_text(&self, url: &str) -> std::result::Result<String, ExtractError> {
        let text = html_to_text(&self.fetch(url).await?);
        if text.trim().is_empty() {
            return Err(ExtractError::NoText);
        }
        Ok(text)
    }
}

#[async_trait]
impl PageExtractor for HttpExtractor {
    async fn extract(&self, url: &str) -> Excerpt {
        let span = fetch_span!(url);
        async {
            let start = Instant::now();
            debug!("Fetching hotel page");

            let excerpt = match self.fetch_text(url).await {
                Ok(text) => {
                    let excerpt = Excerpt::ready(url, &text, self.limit);
                    let chars = excerpt.text().map_or(0, |t| t.chars().count());
                    tracing::Span::current().record("excerpt.chars", chars);
                    info!(chars, "Hotel page loaded");
                    excerpt
                }
                Err(e) => {
                    record_error(&e);
                    Excerpt::failed(url, e.to_string())
                }
            };

            record_duration("duration_ms", start.elapsed());
            excerpt
        }
        .instrument(span)
        .await
    }
}

/// Visible text of an HTML document: one trimmed, non-empty text node per line.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);

    document
        .root_element()
        .descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node.ancestors().any(|ancestor| {
                ancestor
                    .value()
                    .as_element()
                    .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
            });
            if hidden {
                return None;
            }
            let trimmed = text.trim();
            (!trimmed.is_empty()).then_some(trimmed)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
