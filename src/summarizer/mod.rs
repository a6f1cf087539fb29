//! Summarizer module for turning merged page text into a summary
//!
//! This module handles:
//! - Building the single-turn summarization prompt
//! - Sending it through a [`CompletionBackend`]
//! - Retrying rate-limited requests with exponential backoff
//! - Reporting failures as a typed [`SummaryError`]

mod client;
mod retry;

pub use client::{ChatMessage, CompletionBackend, CompletionError, CompletionRequest, OpenAiClient};
pub use retry::{RetryError, RetryPolicy};

use crate::config::SummarizerConfig;
use thiserror::Error;

/// Why a summary could not be produced
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Summary failed: still rate limited after {attempts} attempts")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        last: CompletionError,
    },

    #[error("Summary failed: {0}")]
    Failed(#[from] CompletionError),
}

/// Sends merged text to a completion backend and returns its summary
#[derive(Debug, Clone)]
pub struct Summarizer<B> {
    backend: B,
    model: String,
    temperature: f32,
    prompt_template: String,
    retry: RetryPolicy,
}

impl<B: CompletionBackend> Summarizer<B> {
    /// Creates a summarizer with the model, prompt and retry settings from config
    pub fn from_config(backend: B, config: &SummarizerConfig) -> Self {
        Self {
            backend,
            model: config.model.clone(),
            temperature: config.temperature,
            prompt_template: config.prompt.clone(),
            retry: RetryPolicy::from_config(config),
        }
    }

    /// Replaces the retry policy
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Builds the request sent for `corpus`
    pub fn build_request(&self, corpus: &str) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(
                self.prompt_template.replace("{content}", corpus),
            )],
            temperature: self.temperature,
        }
    }

    /// Summarizes `corpus`, which the caller has already size-bounded
    ///
    /// An empty corpus is still sent; the model decides what to say about it.
    pub async fn summarize(&self, corpus: &str) -> Result<String, SummaryError> {
        let request = self.build_request(corpus);

        tracing::info!(
            "Requesting summary from {} ({} chars of content)",
            self.model,
            corpus.chars().count()
        );

        let backend = &self.backend;
        let request = &request;

        self.retry
            .run(
                move |_| backend.complete(request),
                CompletionError::is_rate_limit,
            )
            .await
            .map_err(|error| match error {
                RetryError::Exhausted { attempts, last } => {
                    tracing::error!("Giving up after {} rate-limited attempts", attempts);
                    SummaryError::RetriesExhausted { attempts, last }
                }
                RetryError::Fatal(error) => {
                    tracing::error!("Summary request failed: {}", error);
                    SummaryError::Failed(error)
                }
            })
    }
}
