use serde::Deserialize;

/// Default prompt sent to the model; `{content}` is replaced by the merged corpus
pub const DEFAULT_PROMPT: &str =
    "Summarize only the key points of the following web page content:\n{content}";

/// Main configuration structure for Page-Digest
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Page fetching configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Corpus assembly configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum characters of merged text sent to the model
    #[serde(rename = "max-corpus-chars", default = "default_max_corpus_chars")]
    pub max_corpus_chars: usize,

    /// Optional per-page character cap applied before merging
    #[serde(rename = "max-page-chars", default)]
    pub max_page_chars: Option<usize>,
}

/// LLM endpoint and retry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the OpenAI-compatible API (without `/chat/completions`)
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// Name of the environment variable holding the API key
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Prompt template; must contain `{content}`
    #[serde(default = "default_prompt")]
    pub prompt: String,

    /// Total attempts made while the endpoint keeps rate limiting
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Backoff base in milliseconds; attempt `i` waits `base * 2^i`
    #[serde(rename = "backoff-base-ms", default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,

    /// Timeout for the completion request (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the summary text artifact
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_corpus_chars() -> usize {
    8000
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_temperature() -> f32 {
    0.5
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_backoff_base_ms() -> u64 {
    1000
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_summary_path() -> String {
    "summary.txt".to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_corpus_chars: default_max_corpus_chars(),
            max_page_chars: None,
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            model: default_model(),
            temperature: default_temperature(),
            prompt: default_prompt(),
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            summary_path: default_summary_path(),
        }
    }
}
