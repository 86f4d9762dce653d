//! Conversion between unified types and Groq types

use serde_json::json;

use super::types::{GroqMessage, GroqRequest, GroqResponse};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateRequest, GenerateResponse, Message, Usage};

/// Convert unified request to Groq request
pub fn to_groq_request(req: &GenerateRequest) -> GroqRequest {
    GroqRequest {
        model: req.model.clone(),
        messages: req.messages.iter().map(to_groq_message).collect(),
        max_tokens: req.options.max_tokens,
        temperature: req.options.temperature,
        top_p: req.options.top_p,
        stop: req.options.stop_sequences.clone(),
        stream: false,
    }
}

fn to_groq_message(msg: &Message) -> GroqMessage {
    GroqMessage {
        role: msg.role.as_str().to_string(),
        content: msg.content.clone(),
    }
}

/// Convert Groq response to unified response, keeping only the first choice
pub fn from_groq_response(resp: GroqResponse) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_response("No choices in Groq response"))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| Error::invalid_response("No content in Groq response"))?;

    let usage = resp
        .usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        content,
        usage,
        finish_reason: FinishReason::parse(choice.finish_reason.as_deref()),
        metadata: Some(json!({
            "id": resp.id,
            "model": resp.model,
        })),
    })
}
