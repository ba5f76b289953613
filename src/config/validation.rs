use crate::config::types::{
    CollectorConfig, Config, LoggerConfig, SiteConfig, SubmissionConfig,
};
use crate::submit::{validate_api_key, MAX_URLS_PER_REQUEST};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_collector_config(&config.collector)?;
    validate_submission_config(&config.submission)?;
    validate_logger_config(&config.logger)?;
    Ok(())
}

/// Validates the site identity
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_domain_string(&config.domain)?;

    let key = config.key.as_deref().ok_or(ConfigError::MissingKey)?;
    if !validate_api_key(key) {
        return Err(ConfigError::Validation(
            "key must be 8-128 hexadecimal characters".to_string(),
        ));
    }

    let location = Url::parse(&config.key_location).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid key-location '{}': {}",
            config.key_location, e
        ))
    })?;

    if location.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "key-location '{}' must use HTTPS scheme",
            config.key_location
        )));
    }

    Ok(())
}

/// Validates sitemap collection settings
fn validate_collector_config(config: &CollectorConfig) -> Result<(), ConfigError> {
    if config.sitemap_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "sitemap-path cannot be empty".to_string(),
        ));
    }

    if config.exclude_paths.iter().any(|p| p.is_empty()) {
        // An empty substring would exclude every URL
        return Err(ConfigError::Validation(
            "exclude-paths cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates endpoint settings
fn validate_submission_config(config: &SubmissionConfig) -> Result<(), ConfigError> {
    Url::parse(&config.endpoint).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", config.endpoint, e))
    })?;

    if config.timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout-ms must be greater than 0".to_string(),
        ));
    }

    if config.batch_size < 1 || config.batch_size > MAX_URLS_PER_REQUEST {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and {}, got {}",
            MAX_URLS_PER_REQUEST, config.batch_size
        )));
    }

    Ok(())
}

/// Validates log settings
fn validate_logger_config(config: &LoggerConfig) -> Result<(), ConfigError> {
    if config.log_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation("log-dir cannot be empty".to_string()));
    }

    if config.log_file.is_empty() {
        return Err(ConfigError::Validation(
            "log-file cannot be empty".to_string(),
        ));
    }

    if config.max_file_size == 0 {
        return Err(ConfigError::Validation(
            "max-file-size must be greater than 0".to_string(),
        ));
    }

    if config.stats_window < 1 {
        return Err(ConfigError::Validation(format!(
            "stats-window must be >= 1, got {}",
            config.stats_window
        )));
    }

    if !(0.0..=1.0).contains(&config.success_rate_threshold) {
        return Err(ConfigError::Validation(format!(
            "success-rate-threshold must be between 0 and 1, got {}",
            config.success_rate_threshold
        )));
    }

    if config.redaction_marker.is_empty() {
        return Err(ConfigError::Validation(
            "redaction-marker cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates a bare hostname such as `example.com`
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidDomain(
            "Domain cannot be empty".to_string(),
        ));
    }

    // Check for invalid characters
    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidDomain(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.com')",
            domain
        )));
    }

    Ok(())
}
