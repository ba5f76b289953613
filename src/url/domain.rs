use url::Url;

/// Extracts the lowercase host from a URL
///
/// Returns `None` for URLs without a host (`mailto:`, `data:` and friends).
///
/// # Examples
///
/// ```
/// use url::Url;
/// use indexnow_pipeline::url::extract_domain;
///
/// let url = Url::parse("https://Example.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Checks whether a URL's host equals `domain`, ignoring case
///
/// Subdomains do not match: `www.example.com` is not `example.com`.
pub fn matches_domain(url: &Url, domain: &str) -> bool {
    extract_domain(url).is_some_and(|host| host.eq_ignore_ascii_case(domain))
}
