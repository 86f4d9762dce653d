//! Completion client: turns an excerpt plus conversation into one chat call.

use std::sync::Arc;
use std::time::Instant;

use innkeeper_constant::defaults;
use innkeeper_core::{Excerpt, Role, Turn};
use innkeeper_llms::{GenerateOptions, GenerateRequest, Message, Provider};
use innkeeper_observability::{completion_span, record_duration, record_error};
use tracing::{Instrument, debug};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// Fixed sampling parameters sent with every completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: defaults::MAX_OUTPUT_TOKENS,
            temperature: defaults::TEMPERATURE,
            top_p: defaults::TOP_P,
        }
    }
}

impl GenerationParams {
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            top_p: config.top_p,
        }
    }

    fn options(&self) -> GenerateOptions {
        GenerateOptions::new()
            .max_tokens(self.max_tokens)
            .temperature(self.temperature)
            .top_p(self.top_p)
    }
}

pub struct CompletionClient {
    provider: Arc<dyn Provider>,
    model: String,
    params: GenerationParams,
    instruction: String,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            params: GenerationParams::default(),
            instruction: defaults::SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = instruction.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider_id(&self) -> &str {
        self.provider.provider_id()
    }

    /// Exactly one system message (instruction followed by the excerpt), then
    /// every turn in conversation order.
    pub fn build_messages(&self, excerpt: &Excerpt, history: &[Turn]) -> Vec<Message> {
        let mut messages = Vec::with_capacity(history.len() + 1);

        let mut system = self.instruction.clone();
        system.push_str(&excerpt.system_context());
        messages.push(Message::system(system));

        messages.extend(history.iter().map(|turn| match turn.role {
            Role::User => Message::user(turn.content.clone()),
            Role::Assistant => Message::assistant(turn.content.clone()),
        }));

        messages
    }

    /// Run one completion and return the trimmed text of the first choice.
    pub async fn complete(&self, excerpt: &Excerpt, history: &[Turn]) -> Result<String> {
        let messages = self.build_messages(excerpt, history);
        let span = completion_span!(self.provider_id(), self.model, messages.len());

        async {
            let start = Instant::now();
            let request = GenerateRequest::new(&self.model, messages).with_options(self.params.options());

            let result = self.provider.generate(request).await;
            record_duration("duration_ms", start.elapsed());

            match result {
                Ok(response) => {
                    debug!(
                        finish_reason = ?response.finish_reason,
                        chars = response.content.len(),
                        "Completion received"
                    );
                    Ok(response.text().to_string())
                }
                Err(e) => {
                    record_error(&e);
                    Err(RuntimeError::from(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use innkeeper_llms::{FinishReason, GenerateResponse, Headers, Role as LlmRole, Usage};
    use std::sync::Mutex;

    struct RecordingProvider {
        requests: Mutex<Vec<GenerateRequest>>,
        reply: std::result::Result<String, String>,
    }

    impl RecordingProvider {
        fn replying(text: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                reply: Err(message.to_string()),
            }
        }
    }

    #[async_trait]
    impl Provider for RecordingProvider {
        fn provider_id(&self) -> &str {
            "recording"
        }

        fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
            Headers::new()
        }

        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> innkeeper_llms::Result<GenerateResponse> {
            self.requests.lock().unwrap().push(request);
            match &self.reply {
                Ok(text) => Ok(GenerateResponse {
                    content: text.clone(),
                    usage: Usage::default(),
                    finish_reason: FinishReason::Stop,
                    metadata: None,
                }),
                Err(message) => Err(innkeeper_llms::Error::provider_error(message.clone())),
            }
        }
    }

    fn ready_excerpt() -> Excerpt {
        Excerpt::ready("https://hotel.test/", "Breakfast 7-10am. Dosa and idli.", 4000)
    }

    #[test]
    fn test_build_messages_empty_history() {
        let client = CompletionClient::new(Arc::new(RecordingProvider::replying("")), "m");
        let messages = client.build_messages(&ready_excerpt(), &[]);

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, LlmRole::System);
        assert_eq!(
            messages[0].content,
            format!(
                "{}Breakfast 7-10am. Dosa and idli.",
                defaults::SYSTEM_INSTRUCTION
            )
        );
    }

    #[test]
    fn test_build_messages_preserves_turn_order() {
        let client = CompletionClient::new(Arc::new(RecordingProvider::replying("")), "m");
        let history = vec![
            Turn::user("When is breakfast?"),
            Turn::assistant("7 to 10am."),
            Turn::user("Is there dosa?"),
        ];
        let messages = client.build_messages(&ready_excerpt(), &history);

        assert_eq!(messages.len(), 4);
        let roles: Vec<_> = messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![LlmRole::System, LlmRole::User, LlmRole::Assistant, LlmRole::User]
        );
        assert_eq!(messages[3].content, "Is there dosa?");
    }

    #[test]
    fn test_build_messages_failed_excerpt_goes_to_system() {
        let client = CompletionClient::new(Arc::new(RecordingProvider::replying("")), "m");
        let excerpt = Excerpt::failed("http://nowhere.invalid/", "dns error");
        let messages = client.build_messages(&excerpt, &[Turn::user("Hi")]);

        assert!(
            messages[0]
                .content
                .ends_with("Error fetching website: dns error")
        );
    }

    #[tokio::test]
    async fn test_complete_sends_params_and_trims() {
        let provider = Arc::new(RecordingProvider::replying("  We serve dosa.\n"));
        let client = CompletionClient::new(provider.clone(), "llama-3.1-8b-instant");

        let reply = client
            .complete(&ready_excerpt(), &[Turn::user("What food is served?")])
            .await
            .unwrap();
        assert_eq!(reply, "We serve dosa.");

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.model, "llama-3.1-8b-instant");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.options.max_tokens, Some(500));
        assert_eq!(request.options.temperature, Some(0.7));
        assert_eq!(request.options.top_p, Some(1.0));
    }

    #[tokio::test]
    async fn test_complete_propagates_provider_error() {
        let client = CompletionClient::new(Arc::new(RecordingProvider::failing("rate limited")), "m");
        let err = client
            .complete(&ready_excerpt(), &[Turn::user("Hi")])
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Provider error: rate limited");
    }

    #[tokio::test]
    async fn test_custom_params() {
        let provider = Arc::new(RecordingProvider::replying("ok"));
        let config = RuntimeConfig::new().with_max_tokens(64).with_temperature(0.1);
        let client = CompletionClient::new(provider.clone(), "m")
            .with_params(GenerationParams::from_config(&config))
            .with_instruction("Answer briefly:\n");

        client.complete(&Excerpt::Empty, &[]).await.unwrap();

        let requests = provider.requests.lock().unwrap();
        assert_eq!(requests[0].options.max_tokens, Some(64));
        assert_eq!(requests[0].options.temperature, Some(0.1));
        assert_eq!(requests[0].messages[0].content, "Answer briefly:\n");
    }
}
