//! URL handling module for Page-Digest
//!
//! This module provides seed URL validation, link resolution with fragment
//! stripping, and the same-site check used by the link collector.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{is_same_site, net_location};
pub use normalize::{parse_seed_url, resolve_link};
