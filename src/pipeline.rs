//! Deploy-time orchestration
//!
//! Ties the components together the way a deploy step uses them:
//! collect → batch → submit each batch → log each result. Configuration and
//! input problems abort the run; transient submission failures are recorded
//! and surface through [`PipelineReport::all_succeeded`]. There are no
//! retries.

use crate::collector::collect_urls;
use crate::config::Config;
use crate::logger::{LogEntry, LogOutcome, SubmissionLogger};
use crate::submit::{batch_urls, SubmissionClient, SubmissionRequest, SubmissionResult};
use crate::PipelineError;
use std::time::Duration;

/// Summary of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Number of URLs produced by the collector
    pub collected: usize,

    /// One result per submitted batch, in submission order
    pub results: Vec<SubmissionResult>,
}

impl PipelineReport {
    /// True when every batch was accepted (vacuously true for no batches)
    pub fn all_succeeded(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    /// Total number of URLs accepted by the endpoint
    pub fn submitted_urls(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.success)
            .map(|r| r.url_count)
            .sum()
    }

    /// Results of the batches that failed
    pub fn failed_batches(&self) -> impl Iterator<Item = &SubmissionResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Runs a complete submission with the default client
///
/// # Arguments
///
/// * `config` - Validated pipeline configuration
/// * `deployment_id` - Optional identifier stored with every log entry
///
/// # Returns
///
/// * `Ok(PipelineReport)` - Every batch was attempted
/// * `Err(PipelineError)` - Configuration or input error; nothing was submitted
///   for the failing batch and later ones
pub async fn run_pipeline(
    config: &Config,
    deployment_id: Option<String>,
) -> Result<PipelineReport, PipelineError> {
    let client = SubmissionClient::new(config.submission.endpoint.clone())?;
    run_pipeline_with_client(config, &client, deployment_id).await
}

/// Runs a complete submission with a caller-provided client
pub async fn run_pipeline_with_client(
    config: &Config,
    client: &SubmissionClient,
    deployment_id: Option<String>,
) -> Result<PipelineReport, PipelineError> {
    let urls = collect_urls(
        &config.site.domain,
        &config.collector.exclude_paths,
        &config.collector.sitemap_path,
    )?;

    let mut report = PipelineReport {
        collected: urls.len(),
        results: Vec::new(),
    };

    if urls.is_empty() {
        tracing::warn!(
            "No URLs found in {} for {}; nothing to submit",
            config.collector.sitemap_path.display(),
            config.site.domain
        );
        return Ok(report);
    }

    let batches = batch_urls(&urls, config.submission.batch_size)?;
    let batch_count = batches.len();
    let key = config.site.key.clone().unwrap_or_default();
    let timeout = Duration::from_millis(config.submission.timeout_ms);
    let logger = SubmissionLogger::new(config.logger.clone());

    tracing::info!(
        "Submitting {} URLs in {} batch(es) to {}",
        urls.len(),
        batch_count,
        client.endpoint()
    );

    for (index, batch) in batches.into_iter().enumerate() {
        tracing::debug!("Batch {}/{}: {} URLs", index + 1, batch_count, batch.len());

        let request = SubmissionRequest::new(
            config.site.domain.clone(),
            key.clone(),
            config.site.key_location.clone(),
            batch,
        )
        .with_timeout(timeout);

        let result = client.submit_urls(&request).await?;

        let entry = LogEntry::new(result.clone(), deployment_id.clone());
        if let LogOutcome::Fallback { reason } = logger.log_submission(&entry).await {
            tracing::debug!("Batch {} result not persisted: {}", index + 1, reason);
        }

        report.results.push(result);
    }

    if report.all_succeeded() {
        tracing::info!(
            "All {} batch(es) accepted ({} URLs)",
            batch_count,
            report.submitted_urls()
        );
    } else {
        tracing::warn!(
            "{} of {} batch(es) failed",
            report.failed_batches().count(),
            batch_count
        );
    }

    Ok(report)
}
