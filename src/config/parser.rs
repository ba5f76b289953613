use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Environment variable consulted when the config file carries no API key
pub const KEY_ENV_VAR: &str = "INDEXNOW_KEY";

/// Loads and parses a configuration file from the given path
///
/// The API key may be left out of the file and supplied through
/// [`KEY_ENV_VAR`] instead, which keeps it out of version control.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use indexnow_pipeline::config::load_config;
///
/// let config = load_config(Path::new("indexnow.toml")).unwrap();
/// println!("Sitemap: {}", config.collector.sitemap_path.display());
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    let config = apply_key_override(config, std::env::var(KEY_ENV_VAR).ok());

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

/// Fills in the API key from an external source when the file has none
///
/// A key written in the file always wins; blank values on either side are
/// treated as absent.
pub fn apply_key_override(mut config: Config, external_key: Option<String>) -> Config {
    let has_key = config
        .site
        .key
        .as_deref()
        .is_some_and(|k| !k.trim().is_empty());

    if !has_key {
        config.site.key = external_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
    }

    config
}

/// Computes a SHA-256 hash of the configuration file content
///
/// The hash is logged at startup so a submission log can be tied back to
/// the configuration that produced it.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}
