//! Page-Digest main entry point
//!
//! This is the command-line interface for the Page-Digest summarizer.

use anyhow::Context;
use clap::Parser;
use page_digest::config::{load_config_or_default, Config};
use page_digest::crawler::build_http_client;
use page_digest::output::{format_corpus, print_report, write_summary_artifact};
use page_digest::pipeline::{gather, Pipeline};
use page_digest::summarizer::{OpenAiClient, Summarizer};
use page_digest::url::parse_seed_url;
use page_digest::DigestError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Page-Digest: summarize a web page and its same-site links
///
/// Page-Digest fetches the seed page, follows every same-site link it contains
/// one hop deep, strips boilerplate markup, and asks an OpenAI-compatible model
/// for a concise summary of the merged text.
#[derive(Parser, Debug)]
#[command(name = "page-digest")]
#[command(version = "1.0.0")]
#[command(about = "Summarize a web page and its same-site links", long_about = None)]
struct Cli {
    /// Seed page URL (http or https)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the summary (overrides output.summary-path)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Do not write the summary file
    #[arg(long, conflicts_with = "output")]
    no_save: bool,

    /// Collect and extract text only; do not call the model
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_config_or_default(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("loading {}", path.display()),
        None => "validating default configuration".to_string(),
    })?;

    let seed = parse_seed_url(&cli.url).map_err(DigestError::from)?;

    if cli.dry_run {
        handle_dry_run(&config, &seed).await?;
        return Ok(ExitCode::SUCCESS);
    }

    handle_digest(&config, &cli, &seed).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_digest=info,warn"),
            1 => EnvFilter::new("page_digest=debug,info"),
            2 => EnvFilter::new("page_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handles the --dry-run mode: gathers text and shows what would be sent
async fn handle_dry_run(config: &Config, seed: &url::Url) -> page_digest::Result<()> {
    println!("=== Page-Digest Dry Run ===\n");

    let client = build_http_client(&config.fetch)?;
    let corpus = gather(&client, seed, &config.pipeline).await;

    print!("{}", format_corpus(&corpus));
    println!(
        "\n✓ Would send {} chars to {}",
        corpus.text.chars().count(),
        config.summarizer.model
    );

    Ok(())
}

/// Handles the main digest operation
async fn handle_digest(config: &Config, cli: &Cli, seed: &url::Url) -> anyhow::Result<ExitCode> {
    let api_key = std::env::var(&config.summarizer.api_key_env).map_err(|_| {
        DigestError::MissingCredential {
            var: config.summarizer.api_key_env.clone(),
        }
    })?;

    let client = build_http_client(&config.fetch).map_err(DigestError::from)?;
    let backend =
        OpenAiClient::from_config(&config.summarizer, api_key).map_err(DigestError::from)?;
    let summarizer = Summarizer::from_config(backend, &config.summarizer);
    let pipeline = Pipeline::new(client, summarizer, config.pipeline.clone());

    tracing::info!("Starting digest of {}", seed);
    let report = pipeline.run(seed).await;

    print_report(&report);

    let Some(summary) = report.summary_text() else {
        return Ok(ExitCode::FAILURE);
    };

    if !cli.no_save {
        let path = cli
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(&config.output.summary_path));
        write_summary_artifact(summary, &path).map_err(DigestError::from)?;
        println!("\n✓ Summary saved to: {}", path.display());
    }

    Ok(ExitCode::SUCCESS)
}
