//! Plain-text extraction from HTML pages
//!
//! Boilerplate subtrees are skipped entirely; every remaining text node is
//! trimmed and the non-empty ones are joined with single spaces.
//!
//! The document is walked with an explicit open/close traversal rather than
//! recursion, so nesting depth is bounded by memory and not by the stack.

use crate::crawler::fetcher::{fetch_html, FetchError};
use ego_tree::iter::Edge;
use reqwest::Client;
use scraper::{ElementRef, Html, Node};
use url::Url;

/// Elements whose whole subtree is dropped before text extraction
pub const BOILERPLATE_TAGS: &[&str] = &["script", "style", "header", "footer", "nav"];

/// The parser runs with scripting enabled, so `<noscript>` content arrives as
/// one raw-text node holding markup. It is re-parsed as a fragment.
const NOSCRIPT_TAG: &str = "noscript";

/// Fetches a page and returns its visible text
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The page to fetch
///
/// # Returns
///
/// * `Ok(String)` - Extracted text (may be empty)
/// * `Err(FetchError)` - The page could not be fetched
pub async fn fetch_page_text(client: &Client, url: &Url) -> Result<String, FetchError> {
    let html = fetch_html(client, url).await?;
    let text = visible_text(&html);

    tracing::debug!("Extracted {} chars from {}", text.chars().count(), url);

    Ok(text)
}

/// Renders an HTML document as plain text without boilerplate markup
///
/// # Example
///
/// ```
/// use page_digest::crawler::visible_text;
///
/// let html = "<html><body><nav>Menu</nav><p>Hello</p> <p>world</p></body></html>";
/// assert_eq!(visible_text(html), "Hello world");
/// ```
pub fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut parts = Vec::new();

    collect_text(document.root_element(), true, &mut parts);

    parts.join(" ")
}

/// Pushes the trimmed text nodes under `root` in document order
///
/// When `expand_noscript` is false, raw `<noscript>` text is dropped instead
/// of re-parsed; fragments are only expanded one level deep.
fn collect_text(root: ElementRef<'_>, expand_noscript: bool, parts: &mut Vec<String>) {
    let mut skip_depth = 0usize;
    let mut noscript_depth = 0usize;

    for edge in root.traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) if BOILERPLATE_TAGS.contains(&element.name()) => {
                    skip_depth += 1;
                }
                Node::Element(element) if element.name() == NOSCRIPT_TAG => {
                    noscript_depth += 1;
                }
                Node::Text(text) if skip_depth == 0 => {
                    if noscript_depth == 0 {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            parts.push(trimmed.to_string());
                        }
                    } else if expand_noscript {
                        let fragment = Html::parse_fragment(text);
                        collect_text(fragment.root_element(), false, parts);
                    }
                }
                _ => {}
            },
            Edge::Close(node) => {
                if let Node::Element(element) = node.value() {
                    if BOILERPLATE_TAGS.contains(&element.name()) {
                        skip_depth -= 1;
                    } else if element.name() == NOSCRIPT_TAG {
                        noscript_depth -= 1;
                    }
                }
            }
        }
    }
}
