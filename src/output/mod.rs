//! Output module for presenting digest results
//!
//! This module handles:
//! - Formatting the digest report for the terminal
//! - Writing the summary text artifact

mod artifact;
mod report;

pub use artifact::{write_summary_artifact, OutputError, OutputResult};
pub use report::{format_corpus, format_report, print_report};
