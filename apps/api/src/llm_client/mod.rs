//! Completion client — the single point of entry for all chat-completion calls.
//!
//! No other module may call the completion API directly; generation goes through the
//! `CompletionService` trait so handlers can be exercised with a stub.
//!
//! Calls are never retried here. Callers decide what a rate-limited outcome means.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::generation::compiler::CompletionRequest;

#[cfg(test)]
pub mod stub;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Insufficient quota: {0}")]
    InsufficientQuota(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Completion returned empty content")]
    EmptyContent,
}

/// Token accounting reported by the completion service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

/// Anything that can turn a compiled request into generated text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    code: Option<String>,
}

/// Chat Completions client for OpenAI-compatible endpoints.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, CompletionError> {
        Ok(Self {
            client: Client::builder().timeout(REQUEST_TIMEOUT).build()?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionService for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            CompletionError::InvalidCredentials("OPENAI_API_KEY is not configured".to_string())
        })?;

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_content,
                },
            ],
            max_tokens: request.max_output_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!("Completion API returned {}", status);
            return Err(classify_failure(status, &text));
        }

        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyContent)?;

        debug!(
            "Completion succeeded: prompt_tokens={}, completion_tokens={}",
            parsed.usage.prompt_tokens, parsed.usage.completion_tokens
        );

        Ok(Completion {
            text: content,
            usage: parsed.usage,
        })
    }
}

/// Maps a non-success response onto the failure taxonomy.
///
/// Every 429 is rate limited, including one whose code is `insufficient_quota`.
/// The error code only decides the class of other statuses.
fn classify_failure(status: StatusCode, body: &str) -> CompletionError {
    let (message, code) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => (envelope.error.message, envelope.error.code),
        Err(_) => (body.to_string(), None),
    };

    match (status, code.as_deref()) {
        (StatusCode::TOO_MANY_REQUESTS, _) => CompletionError::RateLimited(message),
        (_, Some("insufficient_quota")) => CompletionError::InsufficientQuota(message),
        (_, Some("invalid_api_key")) | (StatusCode::UNAUTHORIZED, _) => {
            CompletionError::InvalidCredentials(message)
        }
        _ => CompletionError::Api {
            status: status.as_u16(),
            message,
        },
    }
}
