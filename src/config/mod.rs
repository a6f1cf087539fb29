//! Configuration module for Page-Digest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a digest can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use page_digest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("digest.toml")).unwrap();
//! println!("Corpus cap: {}", config.pipeline.max_corpus_chars);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, OutputConfig, PipelineConfig, SummarizerConfig, DEFAULT_PROMPT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
