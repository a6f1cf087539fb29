use url::Url;

/// Returns the network location of a URL: the host plus any explicit port
///
/// Default ports are omitted, so `https://example.com:443/` yields
/// `example.com`.
///
/// # Examples
///
/// ```
/// use page_digest::url::net_location;
/// use url::Url;
///
/// let url = Url::parse("http://Example.COM:8080/path").unwrap();
/// assert_eq!(net_location(&url), Some("example.com:8080".to_string()));
/// ```
pub fn net_location(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}

/// Checks whether `candidate` belongs to the seed's site
///
/// A candidate matches when its network location contains the seed's network
/// location as a substring. The check is deliberately loose: subdomains such as
/// `blog.example.com` match `example.com`, but so does the unrelated
/// `notexample.com`.
pub fn is_same_site(seed_location: &str, candidate: &Url) -> bool {
    net_location(candidate)
        .map(|location| location.contains(seed_location))
        .unwrap_or(false)
}
