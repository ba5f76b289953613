//! Configuration module for the IndexNow pipeline
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use indexnow_pipeline::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("indexnow.toml")).unwrap();
//! println!("Announcing URLs for {}", config.site.domain);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CollectorConfig, Config, LoggerConfig, SiteConfig, SubmissionConfig, DEFAULT_ENDPOINT,
    DEFAULT_SITEMAP_PATH,
};

// Re-export parser functions
pub use parser::{
    apply_key_override, compute_config_hash, load_config, load_config_with_hash, KEY_ENV_VAR,
};
