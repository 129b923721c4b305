//! Client for OpenAI-compatible `/chat/completions` endpoints.
//!
//! Works with the hosted OpenAI API and any server that mirrors its wire
//! format (vLLM, Ollama, LocalAI). Each call is a single request; failures
//! are surfaced to the caller rather than retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use scholarhub_core::essay::{
    build_system_prompt, build_user_prompt, count_words, max_tokens_for, EssayRequest,
};

use super::{EssayGenerator, GeneratedEssay, LlmConfig, LlmError};

/// Sampling temperature for essay drafts.
const TEMPERATURE: f32 = 0.7;

/// Essay generator backed by an OpenAI-compatible HTTP API.
pub struct OpenAiEssayGenerator {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiEssayGenerator {
    /// Build a generator from `config`.
    ///
    /// A missing API key is sent as an empty bearer token; use
    /// [`build_generator`](super::build_generator) to get the disabled
    /// generator instead.
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_url)
    }
}

/// Chat completion request body.
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

/// Chat completion response body. Only the fields we read are modelled.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

fn build_chat_request(model: &str, request: &EssayRequest) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage {
                role: "system",
                content: build_system_prompt(),
            },
            ChatMessage {
                role: "user",
                content: build_user_prompt(request),
            },
        ],
        max_tokens: max_tokens_for(request.target_words()),
        temperature: TEMPERATURE,
    }
}

/// Extract the essay text from a completion, falling back to the requested
/// model name when the response omits one.
fn parse_completion(response: ChatResponse, requested_model: &str) -> Result<GeneratedEssay, LlmError> {
    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .ok_or(LlmError::EmptyResponse)?;

    Ok(GeneratedEssay {
        word_count: count_words(&content),
        content,
        model: response.model.unwrap_or_else(|| requested_model.to_string()),
    })
}

#[async_trait]
impl EssayGenerator for OpenAiEssayGenerator {
    async fn generate(&self, request: &EssayRequest) -> Result<GeneratedEssay, LlmError> {
        let body = build_chat_request(&self.model, request);

        tracing::debug!(
            model = %self.model,
            max_tokens = body.max_tokens,
            essay_type = %request.essay_type,
            "Requesting essay completion",
        );

        let response = self
            .client
            .post(self.chat_completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "LLM API returned an error");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatResponse = response.json().await?;
        parse_completion(completion, &self.model)
    }
}
