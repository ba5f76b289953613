//! Sitemap URL collection
//!
//! This module turns a generated sitemap into the list of URLs that gets
//! announced to the notification endpoint:
//! - `<loc>` extraction from the raw sitemap text
//! - Domain filtering and HTTPS/trailing-slash normalization
//! - Path exclusions
//! - De-duplication and sorting

mod sitemap;

pub use sitemap::extract_locs;

use crate::url::{is_excluded, normalize_for_domain};
use crate::CollectError;
use std::collections::BTreeSet;
use std::path::Path;

/// Collects submission-ready URLs from a sitemap file
///
/// # Arguments
///
/// * `domain` - Hostname every URL must belong to
/// * `exclude_paths` - Path substrings that keep a URL out of the result
/// * `sitemap_path` - Location of the sitemap document
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Unique, sorted, normalized URLs
/// * `Err(CollectError)` - Empty domain or unreadable sitemap
///
/// # Example
///
/// ```no_run
/// use indexnow_pipeline::collector::collect_urls;
/// use std::path::Path;
///
/// let urls = collect_urls(
///     "example.com",
///     &["/thank-you/".to_string()],
///     Path::new("out/sitemap.xml"),
/// )
/// .unwrap();
/// println!("{} URLs ready for submission", urls.len());
/// ```
pub fn collect_urls(
    domain: &str,
    exclude_paths: &[String],
    sitemap_path: &Path,
) -> Result<Vec<String>, CollectError> {
    if domain.trim().is_empty() {
        return Err(CollectError::EmptyDomain);
    }

    let xml = std::fs::read_to_string(sitemap_path).map_err(|source| CollectError::Read {
        path: sitemap_path.to_path_buf(),
        source,
    })?;

    let urls = collect_urls_from_str(&xml, domain, exclude_paths)?;

    tracing::info!(
        "Collected {} URLs for {} from {}",
        urls.len(),
        domain,
        sitemap_path.display()
    );

    Ok(urls)
}

/// Runs the collection steps over an in-memory sitemap document
///
/// Individual malformed or foreign URLs are dropped without failing the
/// whole document.
pub fn collect_urls_from_str(
    xml: &str,
    domain: &str,
    exclude_paths: &[String],
) -> Result<Vec<String>, CollectError> {
    let domain = domain.trim();
    if domain.is_empty() {
        return Err(CollectError::EmptyDomain);
    }

    let mut unique = BTreeSet::new();
    let mut skipped = 0usize;
    let mut excluded = 0usize;

    for loc in extract_locs(xml) {
        let url = match normalize_for_domain(&loc, domain) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping sitemap entry {}: {}", loc, e);
                skipped += 1;
                continue;
            }
        };

        if is_excluded(url.path(), exclude_paths) {
            tracing::debug!("Excluding {}", url);
            excluded += 1;
            continue;
        }

        unique.insert(url.to_string());
    }

    if skipped > 0 || excluded > 0 {
        tracing::debug!(
            "Dropped {} invalid/foreign and {} excluded sitemap entries",
            skipped,
            excluded
        );
    }

    // BTreeSet iteration is already sorted and duplicate-free
    Ok(unique.into_iter().collect())
}
