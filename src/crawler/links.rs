//! Same-site link collection
//!
//! Extracts every `<a href>` from a page, resolves it against the seed,
//! strips the fragment and keeps it when it stays on the seed's site.

use crate::crawler::fetcher::{fetch_html, FetchError};
use crate::url::{is_same_site, net_location, resolve_link};
use reqwest::Client;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Fetches the seed page and returns the unique same-site links it contains
///
/// Links keep the order of their first appearance in the document.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `seed` - The seed URL
///
/// # Returns
///
/// * `Ok(Vec<Url>)` - Same-site links, possibly empty
/// * `Err(FetchError)` - The seed could not be fetched
pub async fn collect_links(client: &Client, seed: &Url) -> Result<Vec<Url>, FetchError> {
    let html = fetch_html(client, seed).await?;
    let links = same_site_links(&html, seed);

    tracing::debug!("Found {} same-site links on {}", links.len(), seed);

    Ok(links)
}

/// Extracts unique same-site links from an HTML document
///
/// # Example
///
/// ```
/// use page_digest::crawler::same_site_links;
/// use url::Url;
///
/// let seed = Url::parse("https://a.com/").unwrap();
/// let html = r#"<a href="/x#sec1">X</a><a href="https://b.org/">B</a>"#;
/// let links = same_site_links(html, &seed);
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "https://a.com/x");
/// ```
pub fn same_site_links(html: &str, seed: &Url) -> Vec<Url> {
    let Some(seed_location) = net_location(seed) else {
        return Vec::new();
    };

    let document = Html::parse_document(html);
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&a_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };

        let Some(link) = resolve_link(href, seed) else {
            continue;
        };

        if !is_same_site(&seed_location, &link) {
            continue;
        }

        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}
