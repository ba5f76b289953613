use indexnow_pipeline::config::{
    CollectorConfig, Config, LoggerConfig, SiteConfig, SubmissionConfig,
};
use indexnow_pipeline::logger::SubmissionLogger;
use indexnow_pipeline::pipeline::run_pipeline;
use indexnow_pipeline::PipelineError;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "0123456789abcdef0123456789abcdef";

const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://example.com/</loc></url>
  <url><loc>https://example.com/about</loc></url>
  <url><loc>http://example.com/about</loc></url>
  <url><loc>https://example.com/portfolio</loc></url>
  <url><loc>https://example.com/contact</loc></url>
  <url><loc>https://example.com/contact/thank-you/</loc></url>
  <url><loc>https://partner.example.org/referral</loc></url>
</urlset>
"#;

/// Creates a test configuration rooted in `dir`
fn create_test_config(dir: &Path, endpoint: String, batch_size: usize) -> Config {
    Config {
        site: SiteConfig {
            domain: "example.com".to_string(),
            key: Some(KEY.to_string()),
            key_location: format!("https://example.com/{}.txt", KEY),
        },
        collector: CollectorConfig {
            sitemap_path: dir.join("out").join("sitemap.xml"),
            ..CollectorConfig::default()
        },
        submission: SubmissionConfig {
            endpoint,
            timeout_ms: 5_000,
            batch_size,
        },
        logger: LoggerConfig {
            log_dir: dir.join("logs"),
            ..LoggerConfig::default()
        },
    }
}

fn write_sitemap(dir: &Path, content: &str) {
    let out = dir.join("out");
    std::fs::create_dir_all(&out).unwrap();
    std::fs::write(out.join("sitemap.xml"), content).unwrap();
}

async fn setup(status: u16, batch_size: usize) -> (MockServer, TempDir, Config) {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    write_sitemap(dir.path(), SITEMAP);
    let config = create_test_config(
        dir.path(),
        format!("{}/indexnow", mock_server.uri()),
        batch_size,
    );

    (mock_server, dir, config)
}

#[tokio::test]
async fn test_full_pipeline_single_batch() {
    let (mock_server, _dir, config) = setup(200, 10_000).await;

    let report = run_pipeline(&config, Some("deploy-42".to_string()))
        .await
        .expect("pipeline runs");

    assert_eq!(report.collected, 4);
    assert_eq!(report.results.len(), 1);
    assert!(report.all_succeeded());
    assert_eq!(report.submitted_urls(), 4);

    let received = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(
        body["urlList"],
        serde_json::json!([
            "https://example.com/",
            "https://example.com/about/",
            "https://example.com/contact/",
            "https://example.com/portfolio/",
        ])
    );

    let log = std::fs::read_to_string(config.logger.log_path()).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains("\"deploymentId\":\"deploy-42\""));
}

#[tokio::test]
async fn test_pipeline_batches_and_logs_each_result() {
    let (mock_server, _dir, config) = setup(202, 3).await;

    let report = run_pipeline(&config, None).await.unwrap();

    assert_eq!(report.results.len(), 2);
    assert_eq!(
        report.results.iter().map(|r| r.url_count).collect::<Vec<_>>(),
        vec![3, 1]
    );
    assert_eq!(mock_server.received_requests().await.unwrap().len(), 2);

    let logger = SubmissionLogger::new(config.logger.clone());
    let stats = logger.get_statistics(10).await;
    assert_eq!(stats.total_submissions, 2);
    assert_eq!(stats.successful_submissions, 2);
    assert!((stats.average_url_count - 2.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_pipeline_records_remote_failure() {
    let (_mock_server, _dir, config) = setup(403, 10_000).await;

    let report = run_pipeline(&config, None).await.unwrap();

    assert!(!report.all_succeeded());
    let failed: Vec<_> = report.failed_batches().collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].error.as_deref(), Some("Forbidden - invalid API key"));

    let logger = SubmissionLogger::new(config.logger.clone());
    let stats = logger.get_statistics(10).await;
    assert_eq!(stats.failed_submissions, 1);
    assert_eq!(stats.last_successful_submission, None);
}

#[tokio::test]
async fn test_pipeline_with_empty_sitemap_submits_nothing() {
    let (mock_server, dir, config) = setup(200, 10_000).await;
    write_sitemap(dir.path(), "<urlset></urlset>");

    let report = run_pipeline(&config, None).await.unwrap();

    assert_eq!(report.collected, 0);
    assert!(report.results.is_empty());
    assert!(report.all_succeeded());
    assert!(mock_server.received_requests().await.unwrap().is_empty());
    assert!(!config.logger.log_path().exists());
}

#[tokio::test]
async fn test_pipeline_missing_sitemap_is_hard_failure() {
    let (mock_server, dir, config) = setup(200, 10_000).await;
    std::fs::remove_file(dir.path().join("out").join("sitemap.xml")).unwrap();

    let result = run_pipeline(&config, None).await;

    assert!(matches!(result, Err(PipelineError::Collect(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_pipeline_invalid_key_is_hard_failure() {
    let (mock_server, _dir, mut config) = setup(200, 10_000).await;
    config.site.key = Some("nothex".to_string());

    let result = run_pipeline(&config, None).await;

    assert!(matches!(result, Err(PipelineError::Submit(_))));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
