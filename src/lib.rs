//! IndexNow pipeline: sitemap collection, search-engine notification and
//! submission logging
//!
//! This crate reads a generated sitemap, turns its entries into a clean list of
//! submission-ready URLs, pushes them to an IndexNow-style notification API in
//! batches and keeps a rotating JSON Lines log of every attempt.

pub mod collector;
pub mod config;
pub mod logger;
pub mod pipeline;
pub mod submit;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for pipeline operations
///
/// Only caller or input mistakes end up here. Transient network and remote
/// failures are reported through [`submit::SubmissionResult`] instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Collection error: {0}")]
    Collect(#[from] CollectError),

    #[error("Submission error: {0}")]
    Submit(#[from] submit::SubmitError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("No API key configured (set site.key or the INDEXNOW_KEY environment variable)")]
    MissingKey,
}

/// Sitemap collection errors
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("Domain is required")]
    EmptyDomain,

    #[error("Failed to read sitemap {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,

    #[error("URL host {found} does not match {expected}")]
    DomainMismatch { expected: String, found: String },
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use collector::{collect_urls, collect_urls_from_str};
pub use config::Config;
pub use logger::{redact_api_key, LogEntry, Statistics, SubmissionLogger};
pub use pipeline::{run_pipeline, PipelineReport};
pub use submit::{
    batch_urls, validate_api_key, SubmissionClient, SubmissionRequest, SubmissionResult,
};
