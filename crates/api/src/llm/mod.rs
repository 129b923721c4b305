//! Essay generation through an OpenAI-compatible chat completions API.
//!
//! Handlers depend on the [`EssayGenerator`] trait object held in
//! [`AppState`](crate::state::AppState), so tests can swap in an
//! in-process stub and deployments without an API key get
//! [`DisabledEssayGenerator`].

pub mod openai;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use scholarhub_core::essay::EssayRequest;

pub use openai::OpenAiEssayGenerator;

/// Default base URL of the chat completions API.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1";
/// Default model name.
const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the LLM backend.
#[derive(Clone)]
pub struct LlmConfig {
    /// Base URL, e.g. `https://api.openai.com/v1` (no trailing slash).
    pub api_url: String,
    /// Bearer token. `None` disables essay generation.
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmConfig {
    /// Load LLM settings from environment variables.
    ///
    /// | Env Var            | Default                     |
    /// |--------------------|-----------------------------|
    /// | `LLM_API_URL`      | `https://api.openai.com/v1` |
    /// | `LLM_API_KEY`      | unset (generation disabled) |
    /// | `LLM_MODEL`        | `gpt-4o-mini`               |
    /// | `LLM_TIMEOUT_SECS` | `60`                        |
    pub fn from_env() -> Self {
        let api_url = std::env::var("LLM_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let api_key = std::env::var("LLM_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_url,
            api_key,
            model,
            timeout_secs,
        }
    }

    /// A config with generation disabled.
    pub fn disabled() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            api_key: None,
            model: DEFAULT_MODEL.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Errors from the essay generation backend.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key is configured.
    #[error("Essay generation is not configured")]
    NotConfigured,

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("LLM API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered without any text.
    #[error("LLM API returned an empty completion")]
    EmptyResponse,
}

/// A generated essay draft.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedEssay {
    pub content: String,
    pub word_count: i32,
    /// Model that produced the draft.
    pub model: String,
}

/// Produces essay drafts from a validated [`EssayRequest`].
#[async_trait]
pub trait EssayGenerator: Send + Sync {
    async fn generate(&self, request: &EssayRequest) -> Result<GeneratedEssay, LlmError>;
}

/// Generator used when no API key is configured.
pub struct DisabledEssayGenerator;

#[async_trait]
impl EssayGenerator for DisabledEssayGenerator {
    async fn generate(&self, _request: &EssayRequest) -> Result<GeneratedEssay, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

/// Build the generator described by `config`.
///
/// Fails only if the HTTP client cannot be constructed.
pub fn build_generator(config: &LlmConfig) -> Result<Arc<dyn EssayGenerator>, LlmError> {
    match &config.api_key {
        Some(_) => Ok(Arc::new(OpenAiEssayGenerator::new(config)?)),
        None => {
            tracing::warn!("LLM_API_KEY not set; essay generation is disabled");
            Ok(Arc::new(DisabledEssayGenerator))
        }
    }
}
