use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use page_digest::config::load_config;
///
/// let config = load_config(Path::new("digest.toml")).unwrap();
/// println!("Model: {}", config.summarizer.model);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

/// Loads the configuration at `path`, or the built-in defaults when no path is given
pub fn load_config_or_default(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let config = Config::default();
            validate(&config)?;
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[fetch]
timeout-secs = 10

[pipeline]
max-corpus-chars = 4000
max-page-chars = 1500

[summarizer]
api-base = "http://localhost:8080/v1"
api-key-env = "TEST_KEY"
model = "gpt-4o-mini"
temperature = 0.2
max-attempts = 5
backoff-base-ms = 250

[output]
summary-path = "./out.txt"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.pipeline.max_corpus_chars, 4000);
        assert_eq!(config.pipeline.max_page_chars, Some(1500));
        assert_eq!(config.summarizer.model, "gpt-4o-mini");
        assert_eq!(config.summarizer.api_key_env, "TEST_KEY");
        assert_eq!(config.summarizer.max_attempts, 5);
        assert_eq!(config.summarizer.backoff_base_ms, 250);
        assert_eq!(config.output.summary_path, "./out.txt");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.pipeline.max_corpus_chars, 8000);
        assert_eq!(config.pipeline.max_page_chars, None);
        assert_eq!(config.summarizer.model, "gpt-4o");
        assert_eq!(config.summarizer.temperature, 0.5);
        assert_eq!(config.summarizer.max_attempts, 3);
        assert_eq!(config.summarizer.backoff_base_ms, 1000);
        assert_eq!(config.summarizer.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.output.summary_path, "summary.txt");
    }

    #[test]
    fn test_partial_table_keeps_other_defaults() {
        let config = parse_config("[summarizer]\nmodel = \"other\"\n").unwrap();
        assert_eq!(config.summarizer.model, "other");
        assert_eq!(config.summarizer.temperature, 0.5);
        assert_eq!(config.summarizer.api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/digest.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[pipeline]\nmax-corpus-chars = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_config_or_default_without_path() {
        let config = load_config_or_default(None).unwrap();
        assert_eq!(config.pipeline.max_corpus_chars, 8000);
    }
}
