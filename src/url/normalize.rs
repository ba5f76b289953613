use crate::url::domain::{extract_domain, matches_domain};
use crate::UrlError;
use url::Url;

/// Normalizes a sitemap URL for submission under `domain`
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject if the host does not match `domain` (case-insensitive)
/// 3. Enforce HTTPS
/// 4. Append a trailing slash to the path if it is missing
///
/// Query string and fragment are left untouched.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
/// * `domain` - The hostname the URL must belong to
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Malformed, foreign or unsupported URL
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::url::normalize_for_domain;
///
/// let url = normalize_for_domain("http://EXAMPLE.com/about?tab=team", "example.com").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about/?tab=team");
/// ```
pub fn normalize_for_domain(url_str: &str, domain: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    let host = extract_domain(&url).ok_or(UrlError::MissingDomain)?;
    if !matches_domain(&url, domain) {
        return Err(UrlError::DomainMismatch {
            expected: domain.to_lowercase(),
            found: host,
        });
    }

    if url.scheme() != "https" {
        url.set_scheme("https").map_err(|_| {
            UrlError::InvalidScheme(format!("Cannot convert {} to https", url.scheme()))
        })?;
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
