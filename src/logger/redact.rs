use regex::{NoExpand, Regex};
use std::sync::LazyLock;

/// Replacement text used when no marker is configured
pub const DEFAULT_REDACTION_MARKER: &str = "***REDACTED***";

/// Standalone runs of 8-128 hex digits, the shape of an IndexNow key
///
/// Word boundaries are ASCII-only, so a key glued to a non-ASCII letter
/// still counts as standalone.
static KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[0-9a-fA-F]{8,128}(?-u:\b)").expect("key pattern is a valid regex")
});

/// Masks key-like substrings with [`DEFAULT_REDACTION_MARKER`]
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::logger::redact_api_key;
///
/// assert_eq!(
///     redact_api_key("Error with key a1b2c3d4e5f60718"),
///     "Error with key ***REDACTED***"
/// );
/// assert_eq!(redact_api_key("Color: #ff0000"), "Color: #ff0000");
/// ```
pub fn redact_api_key(text: &str) -> String {
    redact_with_marker(text, DEFAULT_REDACTION_MARKER)
}

/// Masks key-like substrings with a custom marker
///
/// The marker is inserted literally; `$` has no special meaning.
pub fn redact_with_marker(text: &str, marker: &str) -> String {
    KEY_PATTERN.replace_all(text, NoExpand(marker)).into_owned()
}
