//! Page-Digest: summarize a web page and its same-site neighbours
//!
//! This crate fetches a seed page, collects the same-site links it points to,
//! strips boilerplate markup from every page, merges the remaining text and asks
//! an OpenAI-compatible chat completion endpoint for a summary.

pub mod config;
pub mod crawler;
pub mod output;
pub mod pipeline;
pub mod summarizer;
pub mod url;

use thiserror::Error;

/// Main error type for Page-Digest startup and I/O operations
///
/// Failures that happen while a digest is running are not reported through
/// this type; see [`pipeline::DigestReport`].
#[derive(Debug, Error)]
pub enum DigestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Missing API credential: environment variable {var} is not set")]
    MissingCredential { var: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Page-Digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

// Re-export commonly used types
pub use config::Config;
pub use pipeline::{DigestReport, Pipeline, Warning};
pub use summarizer::{CompletionError, OpenAiClient, RetryPolicy, SummaryError, Summarizer};
pub use crate::url::{is_same_site, net_location, parse_seed_url, resolve_link};
