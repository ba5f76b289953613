//! Rolling submission statistics
//!
//! Statistics are recomputed from the log on every call and never cached.

use crate::logger::LogEntry;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Aggregate over the most recent log entries
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub total_submissions: usize,
    pub successful_submissions: usize,
    pub failed_submissions: usize,
    /// Fraction in `0.0..=1.0`; 0 when there are no entries
    pub success_rate: f64,
    pub last_successful_submission: Option<DateTime<Utc>>,
    pub average_url_count: f64,
}

impl Statistics {
    /// Computes statistics over `entries`, oldest first
    pub fn from_entries(entries: &[LogEntry]) -> Self {
        let total = entries.len();
        if total == 0 {
            return Self::default();
        }

        let successful = entries.iter().filter(|e| e.result.success).count();
        let url_total: usize = entries.iter().map(|e| e.result.url_count).sum();

        Self {
            total_submissions: total,
            successful_submissions: successful,
            failed_submissions: total - successful,
            success_rate: successful as f64 / total as f64,
            last_successful_submission: entries
                .iter()
                .rev()
                .find(|e| e.result.success)
                .map(|e| e.result.timestamp),
            average_url_count: url_total as f64 / total as f64,
        }
    }
}

/// Parses JSON Lines log content, skipping lines that do not parse
///
/// Blank lines are ignored silently; corrupt ones produce a warning naming
/// the 1-based line number.
pub fn parse_log(content: &str) -> Vec<LogEntry> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str::<LogEntry>(line) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Skipping malformed log line {}: {}", index + 1, e);
                None
            }
        })
        .collect()
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &Statistics) {
    println!("=== Submission Statistics ===\n");

    println!("Window:");
    println!("  Total submissions: {}", stats.total_submissions);
    println!("  Successful: {}", stats.successful_submissions);
    println!("  Failed: {}", stats.failed_submissions);
    println!();

    println!("Success Rate: {:.1}%", stats.success_rate * 100.0);
    println!("Average URLs per submission: {:.1}", stats.average_url_count);

    match stats.last_successful_submission {
        Some(ts) => println!("Last successful submission: {}", ts.to_rfc3339()),
        None => println!("Last successful submission: never"),
    }
}
