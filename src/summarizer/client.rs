//! OpenAI-compatible chat completion client
//!
//! The client is constructed once at startup from an explicitly supplied API
//! key and handed to the [`Summarizer`](super::Summarizer).

use crate::config::SummarizerConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors returned by a completion backend
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    #[error("Quota exceeded: {message}")]
    QuotaExceeded { message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("API error {status_code}: {message}")]
    Api { status_code: u16, message: String },

    #[error("Network error: {message}")]
    Network { message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl CompletionError {
    /// Returns true for the only failure kind that is worth retrying
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    /// Creates a user-role message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Body of a `/chat/completions` request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// Something that can turn a completion request into model text
pub trait CompletionBackend {
    /// Sends one request and returns the first choice's content
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}

/// Client for an OpenAI-compatible chat completion API
#[derive(Clone)]
pub struct OpenAiClient {
    /// The underlying reqwest client
    client: Client,

    /// Full URL of the chat completions endpoint
    endpoint: String,

    /// Bearer token
    api_key: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl OpenAiClient {
    /// Creates a client for `api_base` (e.g. `https://api.openai.com/v1`)
    pub fn new(
        api_base: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key: api_key.into(),
        })
    }

    /// Creates a client from the summarizer configuration and a resolved key
    pub fn from_config(
        config: &SummarizerConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.api_base,
            api_key,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// The chat completions URL this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionBackend for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        tracing::debug!("Sending completion request to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| CompletionError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::Network {
                message: e.to_string(),
            })?;

        if !status.is_success() {
            return Err(classify_status(status, &body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::MalformedResponse("response has no content".to_string()))
    }
}

/// Maps a non-success status and its body onto a completion error
///
/// A 429 carrying the `insufficient_quota` code is a billing problem, not a
/// transient limit, and is reported as `QuotaExceeded`.
fn classify_status(status: StatusCode, body: &str) -> CompletionError {
    let detail = serde_json::from_str::<ApiErrorBody>(body).ok();
    let message = detail
        .as_ref()
        .map(|d| d.error.message.clone())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.trim().to_string());
    let code = detail.and_then(|d| d.error.code);

    match status {
        StatusCode::TOO_MANY_REQUESTS if code.as_deref() == Some("insufficient_quota") => {
            CompletionError::QuotaExceeded { message }
        }
        StatusCode::TOO_MANY_REQUESTS => CompletionError::RateLimited { message },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => CompletionError::Auth { message },
        _ => CompletionError::Api {
            status_code: status.as_u16(),
            message,
        },
    }
}
