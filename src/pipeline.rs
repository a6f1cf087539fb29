//! Pipeline driver - collect, extract, merge, summarize
//!
//! A digest run never fails as a whole. Fetch problems degrade to empty
//! values plus a [`Warning`], and summarization problems are carried in the
//! report as a [`SummaryError`].

use crate::config::PipelineConfig;
use crate::crawler::{collect_links, fetch_page_text};
use crate::summarizer::{CompletionBackend, Summarizer, SummaryError};
use reqwest::Client;
use std::fmt;
use url::Url;

/// Separator placed between page texts in the merged corpus
pub const PAGE_SEPARATOR: &str = "\n\n";

/// A non-fatal problem encountered while gathering text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The seed page could not be fetched, so no links were followed
    LinkCollection { url: String, message: String },

    /// A page could not be fetched; its text is empty
    TextExtraction { url: String, message: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LinkCollection { url, message } => {
                write!(f, "could not collect links from {}: {}", url, message)
            }
            Self::TextExtraction { url, message } => {
                write!(f, "could not extract text from {}: {}", url, message)
            }
        }
    }
}

/// Text gathered from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub url: Url,
    pub text: String,
}

/// Everything gathered before summarization
#[derive(Debug, Clone)]
pub struct Corpus {
    /// The seed URL
    pub seed: Url,

    /// Same-site links collected from the seed
    pub links: Vec<Url>,

    /// Seed first, then links in collected order
    pub pages: Vec<PageText>,

    /// Merged, truncated text sent to the model
    pub text: String,

    /// Whether the merged text was cut at the corpus limit
    pub truncated: bool,

    /// Non-fatal problems, in the order they happened
    pub warnings: Vec<Warning>,
}

/// Result of one full digest run
#[derive(Debug)]
pub struct DigestReport {
    pub corpus: Corpus,
    pub summary: Result<String, SummaryError>,
}

impl DigestReport {
    /// The summary text, if the model produced one
    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_deref().ok()
    }
}

/// Truncates `text` to at most `max_chars` characters
///
/// Returns the truncated text and whether anything was removed.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

/// Joins page texts with blank lines and caps the result at `max_chars`
///
/// # Example
///
/// ```
/// use page_digest::pipeline::merge_texts;
///
/// let (merged, truncated) = merge_texts(&["Hello", "world"], 100);
/// assert_eq!(merged, "Hello\n\nworld");
/// assert!(!truncated);
/// ```
pub fn merge_texts<S: AsRef<str>>(texts: &[S], max_chars: usize) -> (String, bool) {
    let merged = texts
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR);

    let (capped, truncated) = truncate_chars(&merged, max_chars);
    (capped.to_string(), truncated)
}

/// Collects links from `seed`, extracts text from every page and merges it
///
/// Pages are fetched one at a time, seed first.
pub async fn gather(client: &Client, seed: &Url, limits: &PipelineConfig) -> Corpus {
    let mut warnings = Vec::new();

    tracing::info!("Collecting links from {}", seed);
    let links = match collect_links(client, seed).await {
        Ok(links) => links,
        Err(e) => {
            let warning = Warning::LinkCollection {
                url: seed.to_string(),
                message: e.to_string(),
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
            Vec::new()
        }
    };
    tracing::info!("Collected {} same-site links", links.len());

    let mut pages = Vec::with_capacity(links.len() + 1);
    for url in std::iter::once(seed).chain(links.iter()) {
        let text = match fetch_page_text(client, url).await {
            Ok(text) => text,
            Err(e) => {
                let warning = Warning::TextExtraction {
                    url: url.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!("{}", warning);
                warnings.push(warning);
                String::new()
            }
        };

        let text = match limits.max_page_chars {
            Some(max) => truncate_chars(&text, max).0.to_string(),
            None => text,
        };

        pages.push(PageText {
            url: url.clone(),
            text,
        });
    }

    let texts: Vec<&str> = pages.iter().map(|p| p.text.as_str()).collect();
    let (text, truncated) = merge_texts(&texts, limits.max_corpus_chars);
    if truncated {
        tracing::info!(
            "Merged text truncated to {} characters",
            limits.max_corpus_chars
        );
    }

    Corpus {
        seed: seed.clone(),
        links,
        pages,
        text,
        truncated,
        warnings,
    }
}

/// Runs complete digests: gather, then summarize
pub struct Pipeline<B> {
    client: Client,
    summarizer: Summarizer<B>,
    limits: PipelineConfig,
}

impl<B: CompletionBackend> Pipeline<B> {
    /// Creates a pipeline from a page client, a summarizer and corpus limits
    pub fn new(client: Client, summarizer: Summarizer<B>, limits: PipelineConfig) -> Self {
        Self {
            client,
            summarizer,
            limits,
        }
    }

    /// Runs one digest for `seed`; the summarizer is always invoked
    pub async fn run(&self, seed: &Url) -> DigestReport {
        let corpus = gather(&self.client, seed, &self.limits).await;
        let summary = self.summarizer.summarize(&corpus.text).await;

        match &summary {
            Ok(_) => tracing::info!("Digest of {} complete", seed),
            Err(e) => tracing::warn!("Digest of {} finished without a summary: {}", seed, e),
        }

        DigestReport { corpus, summary }
    }
}
