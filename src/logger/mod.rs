//! Submission log
//!
//! This module keeps an append-only JSON Lines record of every submission
//! attempt:
//! - API key redaction before anything touches disk
//! - Size-based rotation of the active file
//! - Rolling statistics and the low success-rate warning
//!
//! Logging is best-effort. Nothing here returns an error to the caller; a
//! failed write is echoed through `tracing` and reported as
//! [`LogOutcome::Fallback`].
//!
//! The log assumes a single writer. Append order is taken as chronological
//! order when computing statistics, which only holds while one deploy runs
//! at a time.

mod redact;
mod rotation;
pub mod stats;

pub use redact::{redact_api_key, redact_with_marker, DEFAULT_REDACTION_MARKER};
pub use rotation::{rotate_if_needed, rotated_path, RotationOutcome};
pub use stats::{parse_log, print_statistics, Statistics};

use crate::config::LoggerConfig;
use crate::submit::SubmissionResult;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// One line of the submission log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(flatten)]
    pub result: SubmissionResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_id: Option<String>,
}

impl LogEntry {
    pub fn new(result: SubmissionResult, deployment_id: Option<String>) -> Self {
        Self {
            result,
            deployment_id,
        }
    }
}

/// What happened to a log write
#[derive(Debug, Clone, PartialEq)]
pub enum LogOutcome {
    /// Entry appended to the active log
    Written {
        /// The previous file was rotated out before this write
        rotated: bool,
        /// The recent success rate fell below the configured threshold
        degraded: bool,
    },

    /// Entry could not be persisted and was echoed to the diagnostic log
    Fallback { reason: String },
}

/// Writer and reader for the submission log
#[derive(Debug, Clone)]
pub struct SubmissionLogger {
    config: LoggerConfig,
}

impl SubmissionLogger {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Path of the active log file
    pub fn log_path(&self) -> PathBuf {
        self.config.log_path()
    }

    /// Appends an entry to the log
    ///
    /// # Steps
    ///
    /// 1. Create the log directory if needed
    /// 2. Rotate the active file if it reached the size threshold
    /// 3. Redact key-like substrings from the error message
    /// 4. Append the entry as one JSON line
    /// 5. Warn when the recent success rate is below the threshold
    pub async fn log_submission(&self, entry: &LogEntry) -> LogOutcome {
        let entry = self.redact(entry);

        let rotated = match self.append(&entry).await {
            Ok(rotated) => rotated,
            Err(e) => {
                let line = serde_json::to_string(&entry).unwrap_or_else(|_| format!("{:?}", entry));
                tracing::error!(
                    "Failed to write submission log {}: {}; entry: {}",
                    self.log_path().display(),
                    e,
                    line
                );
                return LogOutcome::Fallback {
                    reason: e.to_string(),
                };
            }
        };

        let degraded = self.check_success_rate().await;

        LogOutcome::Written { rotated, degraded }
    }

    /// Statistics over the last `limit` parseable entries
    ///
    /// Missing, empty or unreadable logs give zero-valued statistics.
    pub async fn get_statistics(&self, limit: usize) -> Statistics {
        let path = self.log_path();
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Statistics::default(),
            Err(e) => {
                tracing::warn!("Cannot read submission log {}: {}", path.display(), e);
                return Statistics::default();
            }
        };

        let entries = parse_log(&content);
        let start = entries.len().saturating_sub(limit);
        Statistics::from_entries(&entries[start..])
    }

    /// Rotates the active log out once it reaches the size threshold
    pub async fn rotate_log_file(&self) -> RotationOutcome {
        rotate_if_needed(&self.log_path(), self.config.max_file_size).await
    }

    fn redact(&self, entry: &LogEntry) -> LogEntry {
        let mut entry = entry.clone();
        if let Some(error) = entry.result.error.take() {
            entry.result.error = Some(redact_with_marker(&error, &self.config.redaction_marker));
        }
        entry
    }

    /// Returns whether the active file was rotated before the write
    async fn append(&self, entry: &LogEntry) -> std::io::Result<bool> {
        tokio::fs::create_dir_all(&self.config.log_dir).await?;

        let rotated = matches!(self.rotate_log_file().await, RotationOutcome::Rotated(_));

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        Ok(rotated)
    }

    async fn check_success_rate(&self) -> bool {
        let window = self.config.stats_window;
        let stats = self.get_statistics(window).await;

        let degraded = stats.total_submissions >= window
            && stats.success_rate < self.config.success_rate_threshold;

        if degraded {
            tracing::warn!(
                "IndexNow success rate is {:.1}% over the last {} submissions (threshold {:.1}%)",
                stats.success_rate * 100.0,
                stats.total_submissions,
                self.config.success_rate_threshold * 100.0
            );
        }

        degraded
    }
}
