//! Crawler module for page fetching and processing
//!
//! This module contains the single-hop crawling logic, including:
//! - HTTP fetching with error classification
//! - Same-site link collection from the seed page
//! - Boilerplate-free text extraction

mod extract;
mod fetcher;
mod links;

pub use extract::{fetch_page_text, visible_text, BOILERPLATE_TAGS};
pub use fetcher::{build_http_client, fetch_html, FetchError};
pub use links::{collect_links, same_site_links};
