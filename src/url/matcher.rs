/// Checks whether a URL path is excluded from submission
///
/// Matching is a plain substring test, not a path-segment comparison:
/// `/thank-you/` also excludes `/contact/thank-you/`, and a pattern such as
/// `thank-you` excludes `/blog/thank-you-post/`.
///
/// # Examples
///
/// ```
/// use indexnow_pipeline::url::is_excluded;
///
/// let excludes = vec!["/thank-you/".to_string()];
/// assert!(is_excluded("/thank-you/", &excludes));
/// assert!(is_excluded("/blog/thank-you/", &excludes));
/// assert!(!is_excluded("/about/", &excludes));
/// ```
pub fn is_excluded(path: &str, exclude_paths: &[String]) -> bool {
    exclude_paths
        .iter()
        .any(|pattern| path.contains(pattern.as_str()))
}
