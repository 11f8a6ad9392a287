//! LLM Client: the single point of entry for all classifier calls in the curator.
//!
//! ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
//! Pipeline code depends on the `Classifier` trait, never on `LlmClient` itself.
//!
//! Models are hardcoded per tier to prevent drift between runs.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// Root of the OpenAI-compatible API; `/chat/completions` is appended.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Cheap model used for the high-volume True/False fan-out calls.
pub const FAST_MODEL: &str = "gpt-3.5-turbo";
/// Stronger model used where answer quality matters more than cost.
pub const QUALITY_MODEL: &str = "gpt-4";
const MAX_BACKOFF: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Whether another attempt could plausibly succeed.
    ///
    /// Rate limits, server errors, timeouts and garbled bodies are transient.
    /// Auth failures and rejected requests are not: retrying them only burns time.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            LlmError::Api { status, .. } => matches!(status, 408 | 409 | 429) || *status >= 500,
            LlmError::Parse(_) | LlmError::EmptyContent => true,
        }
    }
}

/// Which model family a request should go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelTier {
    #[default]
    Fast,
    Quality,
}

impl ModelTier {
    pub fn model(self) -> &'static str {
        match self {
            ModelTier::Fast => FAST_MODEL,
            ModelTier::Quality => QUALITY_MODEL,
        }
    }
}

/// A role-tagged block of prompt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }
}

/// Generated text plus the total tokens the call consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub tokens: u32,
}

/// Request/response classifier contract consumed by the curation pipeline.
///
/// Implementations own their retry policy; callers see either an answer or a
/// failure that is not worth retrying.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(
        &self,
        messages: &[ChatMessage],
        tier: ModelTier,
    ) -> Result<Completion, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

impl ChatResponse {
    fn into_completion(self) -> Result<Completion, LlmError> {
        let tokens = self.usage.map(|u| u.total_tokens).unwrap_or(0);
        let text = self
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|t| !t.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;
        Ok(Completion { text, tokens })
    }
}

/// The single LLM client used by the curation service.
/// Wraps the OpenAI chat completions API with bounded retry and exponential backoff.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    base_backoff: Duration,
}

impl LlmClient {
    pub fn new(api_key: String, max_retries: u32, base_backoff: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .build()?,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries,
            base_backoff,
        })
    }

    /// Points the client at another OpenAI-compatible endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn call_once(
        &self,
        messages: &[ChatMessage],
        tier: ModelTier,
    ) -> Result<Completion, LlmError> {
        let request_body = ChatRequest {
            model: tier.model(),
            messages,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&body)?;
        parsed.into_completion()
    }
}

#[async_trait]
impl Classifier for LlmClient {
    /// Retries retryable failures up to `max_retries` times with exponential backoff.
    /// Once the budget is spent the last error is returned.
    async fn classify(
        &self,
        messages: &[ChatMessage],
        tier: ModelTier,
    ) -> Result<Completion, LlmError> {
        let mut attempt = 0;
        loop {
            match self.call_once(messages, tier).await {
                Ok(completion) => {
                    debug!(
                        "Classifier call succeeded: model={}, tokens={}",
                        tier.model(),
                        completion.tokens
                    );
                    return Ok(completion);
                }
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    attempt += 1;
                    let delay = backoff_delay(self.base_backoff, attempt);
                    warn!(
                        "Classifier attempt {} failed ({e}), retrying after {}ms...",
                        attempt,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// `base * 2^(attempt-1)`, capped at one minute.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 1u32 << attempt.saturating_sub(1).min(16);
    base.saturating_mul(factor).min(MAX_BACKOFF)
}
