//! IndexNow pipeline main entry point
//!
//! This is the command-line interface a deploy step calls after the static
//! export has written its sitemap.

use anyhow::Context;
use clap::Parser;
use indexnow_pipeline::config::{load_config_with_hash, Config};
use indexnow_pipeline::logger::{print_statistics, SubmissionLogger};
use indexnow_pipeline::pipeline::run_pipeline;
use indexnow_pipeline::{batch_urls, collect_urls};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// indexnow-pipeline: announce a site's sitemap to IndexNow
///
/// Reads the generated sitemap, keeps the URLs that belong to the configured
/// domain, submits them in batches and records every attempt in a rotating
/// JSON Lines log.
#[derive(Parser, Debug)]
#[command(name = "indexnow-pipeline")]
#[command(version)]
#[command(about = "Submit sitemap URLs to an IndexNow endpoint", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Collect and batch URLs without submitting anything
    #[arg(long, conflicts_with = "stats")]
    dry_run: bool,

    /// Show statistics from the submission log and exit
    #[arg(long, conflicts_with = "dry_run")]
    stats: bool,

    /// Identifier recorded with every log entry of this run
    #[arg(long, value_name = "ID")]
    deployment_id: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config)?;
        Ok(ExitCode::SUCCESS)
    } else if cli.stats {
        handle_stats(&config).await;
        Ok(ExitCode::SUCCESS)
    } else {
        handle_submit(&config, cli.deployment_id).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("indexnow_pipeline=info,warn"),
            1 => EnvFilter::new("indexnow_pipeline=debug,info"),
            2 => EnvFilter::new("indexnow_pipeline=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: shows what would be submitted
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== IndexNow Dry Run ===\n");

    println!("Site:");
    println!("  Domain: {}", config.site.domain);
    println!("  Key location: {}", config.site.key_location);

    println!("\nCollector:");
    println!("  Sitemap: {}", config.collector.sitemap_path.display());
    println!("  Exclusions: {:?}", config.collector.exclude_paths);

    println!("\nSubmission:");
    println!("  Endpoint: {}", config.submission.endpoint);
    println!("  Timeout: {}ms", config.submission.timeout_ms);
    println!("  Batch size: {}", config.submission.batch_size);

    let urls = collect_urls(
        &config.site.domain,
        &config.collector.exclude_paths,
        &config.collector.sitemap_path,
    )?;
    let batches = batch_urls(&urls, config.submission.batch_size)?;

    println!("\nURLs ({}):", urls.len());
    for (index, batch) in batches.iter().enumerate() {
        println!("  Batch {} ({} URLs)", index + 1, batch.len());
        for url in batch {
            println!("    * {}", url);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would submit {} URLs in {} batch(es)", urls.len(), batches.len());

    Ok(())
}

/// Handles --stats: prints rolling statistics from the submission log
async fn handle_stats(config: &Config) {
    let logger = SubmissionLogger::new(config.logger.clone());
    println!("Log: {}\n", logger.log_path().display());

    let stats = logger.get_statistics(config.logger.stats_window).await;
    print_statistics(&stats);
}

/// Handles the default mode: collect, submit and log
async fn handle_submit(config: &Config, deployment_id: Option<String>) -> anyhow::Result<ExitCode> {
    let report = run_pipeline(config, deployment_id)
        .await
        .context("IndexNow submission aborted")?;

    if report.all_succeeded() {
        tracing::info!(
            "Submitted {} of {} collected URLs",
            report.submitted_urls(),
            report.collected
        );
        Ok(ExitCode::SUCCESS)
    } else {
        for failed in report.failed_batches() {
            tracing::error!(
                "Batch of {} URLs failed: {}",
                failed.url_count,
                failed.error.as_deref().unwrap_or("unknown error")
            );
        }
        Ok(ExitCode::FAILURE)
    }
}
