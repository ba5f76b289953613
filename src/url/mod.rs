//! URL handling module
//!
//! This module provides domain extraction, submission normalization and
//! exclusion matching for sitemap URLs.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, matches_domain};
pub use matcher::is_excluded;
pub use normalize::normalize_for_domain;
