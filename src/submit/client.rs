//! HTTP submission client
//!
//! This module handles the actual notification request, including:
//! - Building the HTTP client with a proper user agent string
//! - Encoding the JSON notification body
//! - Enforcing the per-request timeout
//! - Classifying HTTP statuses and network failures into a result

use crate::submit::{SubmissionRequest, SubmissionResult, SubmitError, MAX_URLS_PER_REQUEST};
use chrono::Utc;
use reqwest::header::{CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use std::time::Instant;

/// User agent sent with every notification
pub const DEFAULT_USER_AGENT: &str = concat!("indexnow-pipeline/", env!("CARGO_PKG_VERSION"));

/// Longest response-body excerpt kept in an error message
const MAX_DETAIL_CHARS: usize = 200;

/// Wire format of the notification body
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotificationBody<'a> {
    host: &'a str,
    key: &'a str,
    key_location: &'a str,
    url_list: &'a [String],
}

/// Builds an HTTP client for notification requests
///
/// No client-level timeout is set: the request deadline is the only one.
///
/// # Arguments
///
/// * `user_agent` - Value of the User-Agent header
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Client for an IndexNow-style notification endpoint
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: Client,
    endpoint: String,
}

impl SubmissionClient {
    /// Creates a client for `endpoint` with the default user agent
    pub fn new(endpoint: impl Into<String>) -> Result<Self, reqwest::Error> {
        let http = build_http_client(DEFAULT_USER_AGENT)?;
        Ok(Self::with_client(http, endpoint))
    }

    /// Creates a client reusing an existing `reqwest::Client`
    pub fn with_client(http: Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint notifications are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Submits a batch of URLs
    ///
    /// # Request Flow
    ///
    /// 1. Validate required fields and key format (no I/O on failure)
    /// 2. Truncate the list to [`MAX_URLS_PER_REQUEST`] with a warning
    /// 3. POST `{host, key, keyLocation, urlList}` as JSON
    /// 4. Classify the outcome
    ///
    /// # Outcome Mapping
    ///
    /// | Condition | success | status_code | error |
    /// |-----------|---------|-------------|-------|
    /// | HTTP 200 / 202 | true | status | none |
    /// | Other HTTP status | false | status | status message (+ body excerpt) |
    /// | Connection failure | false | 0 | `Network error: ...` |
    /// | Request deadline exceeded | false | 0 | `Request timeout after {n}ms` |
    ///
    /// # Returns
    ///
    /// * `Ok(SubmissionResult)` - For every runtime outcome, including failures
    /// * `Err(SubmitError)` - Only for invalid requests
    pub async fn submit_urls(
        &self,
        request: &SubmissionRequest,
    ) -> Result<SubmissionResult, SubmitError> {
        request.validate()?;

        let started = Instant::now();
        let timeout_ms = request.timeout.as_millis();

        let urls = if request.url_list.len() > MAX_URLS_PER_REQUEST {
            tracing::warn!(
                "URL list has {} entries, truncating to {}",
                request.url_list.len(),
                MAX_URLS_PER_REQUEST
            );
            &request.url_list[..MAX_URLS_PER_REQUEST]
        } else {
            &request.url_list[..]
        };

        let body = NotificationBody {
            host: &request.host,
            key: &request.key,
            key_location: &request.key_location,
            url_list: urls,
        };

        tracing::debug!("Submitting {} URLs to {}", urls.len(), self.endpoint);

        let (status_code, error) = match serde_json::to_vec(&body) {
            Err(e) => (0, Some(format!("Failed to encode request: {}", e))),
            Ok(payload) => {
                match tokio::time::timeout(request.timeout, self.post(payload)).await {
                    // Dropping the send future aborts the in-flight request
                    Err(_) => (0, Some(format!("Request timeout after {}ms", timeout_ms))),
                    // Includes deadlines set on a caller-supplied client
                    Ok(Err(e)) => (0, Some(format!("Network error: {}", e))),
                    Ok(Ok((status, text))) => classify_response(status, &text),
                }
            }
        };

        let result = SubmissionResult {
            success: error.is_none(),
            status_code,
            url_count: urls.len(),
            timestamp: Utc::now(),
            duration_ms: started.elapsed().as_millis() as u64,
            error,
        };

        match &result.error {
            None => tracing::info!(
                "Submitted {} URLs (HTTP {}, {}ms)",
                result.url_count,
                result.status_code,
                result.duration_ms
            ),
            Some(error) => tracing::warn!(
                "Submission of {} URLs failed: {}",
                result.url_count,
                error
            ),
        }

        Ok(result)
    }

    /// Sends the encoded body and reads the response text
    async fn post(&self, payload: Vec<u8>) -> Result<(StatusCode, String), reqwest::Error> {
        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json; charset=utf-8")
            .header(CONTENT_LENGTH, payload.len())
            .body(payload)
            .send()
            .await?;

        let status = response.status();
        // The body only feeds error details, so a broken body is not fatal
        let text = response.text().await.unwrap_or_default();

        Ok((status, text))
    }
}

/// Maps an HTTP response to `(status_code, error)`
fn classify_response(status: StatusCode, body: &str) -> (u16, Option<String>) {
    let code = status.as_u16();
    if status == StatusCode::OK || status == StatusCode::ACCEPTED {
        return (code, None);
    }

    let message = status_message(code);
    let error = match response_detail(body) {
        Some(detail) => format!("{}: {}", message, detail),
        None => message,
    };

    (code, Some(error))
}

/// Human-readable meaning of a failing status code
fn status_message(code: u16) -> String {
    match code {
        400 => "Bad request - invalid format".to_string(),
        403 => "Forbidden - invalid API key".to_string(),
        422 => "Unprocessable entity - invalid URLs".to_string(),
        429 => "Rate limit exceeded".to_string(),
        500.. => "Server error".to_string(),
        _ => format!("HTTP {}", code),
    }
}

/// Extracts a short explanation from an error response body
///
/// JSON bodies contribute their `message` field when present, otherwise
/// their compact form; anything else is used verbatim.
fn response_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let detail = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(json) => match json.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => json.to_string(),
        },
        Err(_) => body.to_string(),
    };

    Some(detail.chars().take(MAX_DETAIL_CHARS).collect())
}
