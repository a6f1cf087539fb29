use crate::config::types::{Config, FetchConfig, OutputConfig, PipelineConfig, SummarizerConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_pipeline_config(&config.pipeline)?;
    validate_summarizer_config(&config.summarizer)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates corpus limits
fn validate_pipeline_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.max_corpus_chars < 1 {
        return Err(ConfigError::Validation(format!(
            "max_corpus_chars must be >= 1, got {}",
            config.max_corpus_chars
        )));
    }

    if let Some(page_chars) = config.max_page_chars {
        if page_chars < 1 {
            return Err(ConfigError::Validation(format!(
                "max_page_chars must be >= 1 when set, got {}",
                page_chars
            )));
        }
    }

    Ok(())
}

/// Validates the LLM endpoint and retry settings
fn validate_summarizer_config(config: &SummarizerConfig) -> Result<(), ConfigError> {
    let api_base = Url::parse(&config.api_base)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api_base: {}", e)))?;

    if api_base.scheme() != "http" && api_base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api_base must use http or https, got '{}'",
            config.api_base
        )));
    }

    if config.api_key_env.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key_env cannot be empty".to_string(),
        ));
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ConfigError::Validation(format!(
            "temperature must be between 0.0 and 2.0, got {}",
            config.temperature
        )));
    }

    if !config.prompt.contains("{content}") {
        return Err(ConfigError::Validation(
            "prompt must contain the {content} placeholder".to_string(),
        ));
    }

    if config.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "max_attempts must be >= 1, got {}",
            config.max_attempts
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.summary_path.is_empty() {
        return Err(ConfigError::Validation(
            "summary_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_temperature_range() {
        let mut config = SummarizerConfig::default();
        config.temperature = 2.5;
        assert!(validate_summarizer_config(&config).is_err());

        config.temperature = -0.1;
        assert!(validate_summarizer_config(&config).is_err());

        config.temperature = 0.0;
        assert!(validate_summarizer_config(&config).is_ok());
    }

    #[test]
    fn test_validate_prompt_placeholder() {
        let mut config = SummarizerConfig::default();
        config.prompt = "Summarize this".to_string();
        assert!(matches!(
            validate_summarizer_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_api_base() {
        let mut config = SummarizerConfig::default();
        config.api_base = "not a url".to_string();
        assert!(matches!(
            validate_summarizer_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.api_base = "ftp://example.com/v1".to_string();
        assert!(matches!(
            validate_summarizer_config(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_validate_zero_attempts() {
        let mut config = SummarizerConfig::default();
        config.max_attempts = 0;
        assert!(validate_summarizer_config(&config).is_err());
    }

    #[test]
    fn test_validate_page_cap() {
        let config = PipelineConfig {
            max_corpus_chars: 8000,
            max_page_chars: Some(0),
        };
        assert!(validate_pipeline_config(&config).is_err());

        let config = PipelineConfig {
            max_corpus_chars: 8000,
            max_page_chars: Some(4000),
        };
        assert!(validate_pipeline_config(&config).is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        assert!(validate_fetch_config(&FetchConfig { timeout_secs: 0 }).is_err());
    }
}
