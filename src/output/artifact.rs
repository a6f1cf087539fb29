//! Summary artifact writing
//!
//! The artifact is the summary text itself, written as UTF-8 with no framing.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Writes the summary to `output_path`, replacing any existing file
///
/// # Arguments
///
/// * `summary` - The summary text
/// * `output_path` - Destination, usually `summary.txt`
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote the artifact
/// * `Err(OutputError)` - Failed to create or write the file
pub fn write_summary_artifact(summary: &str, output_path: &Path) -> OutputResult<()> {
    let to_error = |source| OutputError::Write {
        path: output_path.display().to_string(),
        source,
    };

    let mut file = File::create(output_path).map_err(to_error)?;
    file.write_all(summary.as_bytes()).map_err(to_error)?;

    tracing::info!("Summary written to {}", output_path.display());

    Ok(())
}
