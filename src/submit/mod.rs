//! Notification submission module
//!
//! This module contains everything needed to announce URLs to an
//! IndexNow-style endpoint:
//! - Request and result types
//! - API key validation
//! - Batching of large URL lists
//! - The HTTP submission client and its status classification

mod batch;
mod client;
mod key;

pub use batch::batch_urls;
pub use client::{build_http_client, SubmissionClient, DEFAULT_USER_AGENT};
pub use key::{validate_api_key, MAX_KEY_LENGTH, MIN_KEY_LENGTH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Maximum number of URLs the endpoint accepts in one request
pub const MAX_URLS_PER_REQUEST: usize = 10_000;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Caller mistakes detected before any network I/O
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Missing required parameter: {0}")]
    MissingField(&'static str),

    #[error("Invalid API key format: expected 8-128 hexadecimal characters")]
    InvalidKey,

    #[error("Batch size must be greater than 0, got {0}")]
    InvalidBatchSize(usize),
}

/// One notification request
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    /// Site hostname
    pub host: String,

    /// API key published at `key_location`
    pub key: String,

    /// HTTPS URL of the published key file
    pub key_location: String,

    /// URLs to announce; anything past [`MAX_URLS_PER_REQUEST`] is dropped
    pub url_list: Vec<String>,

    /// Time allowed for the whole request
    pub timeout: Duration,
}

impl SubmissionRequest {
    /// Creates a request with the default timeout
    pub fn new(
        host: impl Into<String>,
        key: impl Into<String>,
        key_location: impl Into<String>,
        url_list: Vec<String>,
    ) -> Self {
        Self {
            host: host.into(),
            key: key.into(),
            key_location: key_location.into(),
            url_list,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Checks required fields and key format
    pub fn validate(&self) -> Result<(), SubmitError> {
        if self.host.trim().is_empty() {
            return Err(SubmitError::MissingField("host"));
        }
        if self.key.is_empty() {
            return Err(SubmitError::MissingField("key"));
        }
        if self.key_location.trim().is_empty() {
            return Err(SubmitError::MissingField("keyLocation"));
        }
        if !validate_api_key(&self.key) {
            return Err(SubmitError::InvalidKey);
        }
        Ok(())
    }
}

/// Outcome of a single submission attempt
///
/// `status_code` is 0 when no HTTP response was received (network failure or
/// timeout).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub success: bool,
    pub status_code: u16,
    pub url_count: usize,
    pub timestamp: DateTime<Utc>,
    /// Wall-clock time of the attempt in milliseconds
    #[serde(rename = "duration")]
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
