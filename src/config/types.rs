use serde::Deserialize;
use std::path::PathBuf;

/// Default sitemap location produced by the static export
pub const DEFAULT_SITEMAP_PATH: &str = "out/sitemap.xml";

/// Default IndexNow notification endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.indexnow.org/indexnow";

/// Main configuration structure for the pipeline
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub submission: SubmissionConfig,
    #[serde(default)]
    pub logger: LoggerConfig,
}

/// Identity of the site being announced
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Hostname every submitted URL must belong to
    pub domain: String,

    /// IndexNow API key; falls back to the INDEXNOW_KEY environment variable
    #[serde(default)]
    pub key: Option<String>,

    /// Public HTTPS location of the key file
    #[serde(rename = "key-location")]
    pub key_location: String,
}

/// Sitemap collection settings
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Path to the generated sitemap document
    #[serde(rename = "sitemap-path", default = "default_sitemap_path")]
    pub sitemap_path: PathBuf,

    /// Path substrings that keep a URL out of the submission
    #[serde(rename = "exclude-paths", default = "default_exclude_paths")]
    pub exclude_paths: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            sitemap_path: default_sitemap_path(),
            exclude_paths: default_exclude_paths(),
        }
    }
}

/// Notification endpoint settings
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum number of URLs sent in a single request
    #[serde(rename = "batch-size", default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
            batch_size: default_batch_size(),
        }
    }
}

/// Submission log settings
#[derive(Debug, Clone, Deserialize)]
pub struct LoggerConfig {
    /// Directory holding the active and rotated logs
    #[serde(rename = "log-dir", default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// File name of the active log inside `log_dir`
    #[serde(rename = "log-file", default = "default_log_file")]
    pub log_file: String,

    /// Size (bytes) at which the active log is rotated out
    #[serde(rename = "max-file-size", default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Number of recent entries used for the reliability check
    #[serde(rename = "stats-window", default = "default_stats_window")]
    pub stats_window: usize,

    /// Success rate below which a warning is emitted
    #[serde(
        rename = "success-rate-threshold",
        default = "default_success_rate_threshold"
    )]
    pub success_rate_threshold: f64,

    /// Replacement text for key-like substrings in error messages
    #[serde(rename = "redaction-marker", default = "default_redaction_marker")]
    pub redaction_marker: String,
}

impl LoggerConfig {
    /// Full path of the active log file
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            max_file_size: default_max_file_size(),
            stats_window: default_stats_window(),
            success_rate_threshold: default_success_rate_threshold(),
            redaction_marker: default_redaction_marker(),
        }
    }
}

fn default_sitemap_path() -> PathBuf {
    PathBuf::from(DEFAULT_SITEMAP_PATH)
}

fn default_exclude_paths() -> Vec<String> {
    vec!["/thank-you/".to_string()]
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_batch_size() -> usize {
    crate::submit::MAX_URLS_PER_REQUEST
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_log_file() -> String {
    "indexnow-submissions.json".to_string()
}

fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

fn default_stats_window() -> usize {
    10
}

fn default_success_rate_threshold() -> f64 {
    0.9
}

fn default_redaction_marker() -> String {
    crate::logger::DEFAULT_REDACTION_MARKER.to_string()
}
