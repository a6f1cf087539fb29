use crate::UrlError;
use url::Url;

/// Parses and validates a seed URL supplied by the user
///
/// The seed must be absolute, use HTTP or HTTPS, and carry a host.
///
/// # Examples
///
/// ```
/// use page_digest::url::parse_seed_url;
///
/// let url = parse_seed_url("https://example.com/docs").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert!(parse_seed_url("example.com").is_err());
/// ```
pub fn parse_seed_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Resolves an href against a base URL and strips its fragment
///
/// Returns None when the href cannot be resolved or does not point at an
/// HTTP(S) resource.
///
/// # Examples
///
/// ```
/// use page_digest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://a.com/docs/").unwrap();
/// let link = resolve_link("x#sec1", &base).unwrap();
/// assert_eq!(link.as_str(), "https://a.com/docs/x");
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    let mut resolved = base.join(href).ok()?;

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    resolved.set_fragment(None);

    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://a.com/dir/page").unwrap()
    }

    #[test]
    fn test_fragment_is_stripped() {
        let url = resolve_link("https://a.com/x#sec1", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/x");
    }

    #[test]
    fn test_empty_fragment_is_stripped() {
        let url = resolve_link("/x#", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/x");
    }

    #[test]
    fn test_fragment_only_resolves_to_base() {
        let url = resolve_link("#top", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/dir/page");
    }

    #[test]
    fn test_relative_path_resolution() {
        let url = resolve_link("other", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/dir/other");

        let url = resolve_link("../up", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/up");
    }

    #[test]
    fn test_query_is_kept() {
        let url = resolve_link("/search?q=rust#results", &base_url()).unwrap();
        assert_eq!(url.as_str(), "https://a.com/search?q=rust");
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        assert!(resolve_link("mailto:someone@a.com", &base_url()).is_none());
        assert!(resolve_link("javascript:void(0)", &base_url()).is_none());
        assert!(resolve_link("ftp://a.com/file", &base_url()).is_none());
    }

    #[test]
    fn test_empty_href_rejected() {
        assert!(resolve_link("   ", &base_url()).is_none());
    }

    #[test]
    fn test_parse_seed_url() {
        assert!(parse_seed_url("https://example.com").is_ok());
        assert!(parse_seed_url("  http://example.com/page  ").is_ok());

        assert!(matches!(
            parse_seed_url("example.com"),
            Err(UrlError::Parse(_))
        ));
        assert!(matches!(
            parse_seed_url("ftp://example.com"),
            Err(UrlError::InvalidScheme(_))
        ));
    }
}
