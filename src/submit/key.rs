/// Shortest key the notification API accepts
pub const MIN_KEY_LENGTH: usize = 8;

/// Longest key the notification API accepts
pub const MAX_KEY_LENGTH: usize = 128;

/// Checks that an API key is 8-128 hexadecimal characters
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::submit::validate_api_key;
///
/// assert!(validate_api_key("a1b2c3d4"));
/// assert!(!validate_api_key("xyz"));
/// assert!(!validate_api_key(&"a".repeat(129)));
/// ```
pub fn validate_api_key(key: &str) -> bool {
    (MIN_KEY_LENGTH..=MAX_KEY_LENGTH).contains(&key.len())
        && key.chars().all(|c| c.is_ascii_hexdigit())
}
