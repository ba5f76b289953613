//! Lightweight `<loc>` extraction
//!
//! Sitemaps produced by the static export are well-formed and only their
//! `<loc>` values matter, so the raw text is scanned with a regular
//! expression instead of being run through a full XML parser.

use regex::Regex;
use std::sync::LazyLock;

static LOC_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<loc>(.*?)</loc>").expect("loc pattern is a valid regex")
});

/// Extracts the text of every `<loc>` element in document order
///
/// Surrounding whitespace is trimmed, XML entities are decoded and empty
/// elements are skipped.
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::collector::extract_locs;
///
/// let xml = "<urlset><url><loc>https://example.com/?a=1&amp;b=2</loc></url></urlset>";
/// assert_eq!(extract_locs(xml), vec!["https://example.com/?a=1&b=2"]);
/// ```
pub fn extract_locs(xml: &str) -> Vec<String> {
    LOC_PATTERN
        .captures_iter(xml)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|loc| !loc.is_empty())
        .map(decode_entities)
        .collect()
}

/// Decodes the five predefined XML entities
fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    // &amp; last so "&amp;lt;" stays "&lt;"
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}
