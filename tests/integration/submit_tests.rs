use indexnow_pipeline::submit::{SubmissionClient, SubmissionRequest, SubmitError};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "a1b2c3d4e5f60718";

fn urls(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("https://example.com/page-{}/", i))
        .collect()
}

fn request(url_list: Vec<String>) -> SubmissionRequest {
    SubmissionRequest::new(
        "example.com",
        KEY,
        format!("https://example.com/{}.txt", KEY),
        url_list,
    )
}

async fn mock_status(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

fn client_for(server: &MockServer) -> SubmissionClient {
    SubmissionClient::new(format!("{}/indexnow", server.uri())).expect("client builds")
}

#[tokio::test]
async fn test_accepted_submission() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(3)))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.url_count, 3);
    assert_eq!(result.error, None);
}

#[tokio::test]
async fn test_request_body_shape() {
    let mock_server = MockServer::start().await;
    mock_status(&mock_server, 202).await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(2)))
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.status_code, 202);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);

    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["host"], "example.com");
    assert_eq!(body["key"], KEY);
    assert_eq!(
        body["keyLocation"],
        format!("https://example.com/{}.txt", KEY)
    );
    assert_eq!(
        body["urlList"],
        serde_json::json!(["https://example.com/page-0/", "https://example.com/page-1/"])
    );
}

#[tokio::test]
async fn test_oversized_list_is_truncated() {
    let mock_server = MockServer::start().await;
    mock_status(&mock_server, 200).await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(10_005)))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.url_count, 10_000);

    let received = mock_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["urlList"].as_array().unwrap().len(), 10_000);
    assert_eq!(body["urlList"][9_999], "https://example.com/page-9999/");
}

#[tokio::test]
async fn test_rate_limited() {
    let mock_server = MockServer::start().await;
    mock_status(&mock_server, 429).await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(1)))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, 429);
    assert_eq!(result.error.as_deref(), Some("Rate limit exceeded"));
}

#[tokio::test]
async fn test_status_table() {
    let cases = [
        (400, "Bad request - invalid format"),
        (403, "Forbidden - invalid API key"),
        (422, "Unprocessable entity - invalid URLs"),
        (502, "Server error"),
        (404, "HTTP 404"),
    ];

    for (status, expected) in cases {
        let mock_server = MockServer::start().await;
        mock_status(&mock_server, status).await;

        let result = client_for(&mock_server)
            .submit_urls(&request(urls(1)))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.status_code, status);
        assert_eq!(result.error.as_deref(), Some(expected), "status {}", status);
    }
}

#[tokio::test]
async fn test_error_body_appended() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(
            ResponseTemplate::new(422)
                .set_body_string(r#"{"message":"URLs do not belong to the host"}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(1)))
        .await
        .unwrap();

    assert_eq!(
        result.error.as_deref(),
        Some("Unprocessable entity - invalid URLs: URLs do not belong to the host")
    );
}

#[tokio::test]
async fn test_connection_refused() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SubmissionClient::new(format!("http://{}/indexnow", addr)).unwrap();
    let result = client.submit_urls(&request(urls(2))).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.url_count, 2);
    assert!(result
        .error
        .as_deref()
        .unwrap()
        .starts_with("Network error: "));
}

#[tokio::test]
async fn test_timeout_aborts_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let result = client_for(&mock_server)
        .submit_urls(&request(urls(1)).with_timeout(Duration::from_millis(100)))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, 0);
    assert_eq!(result.error.as_deref(), Some("Request timeout after 100ms"));
    assert!(result.duration_ms >= 100);
    assert!(result.duration_ms < 5_000);
}

#[tokio::test]
async fn test_client_deadline_is_a_network_error() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexnow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&mock_server)
        .await;

    // The reqwest deadline fires long before the request's own timeout
    let http = reqwest::Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = SubmissionClient::with_client(http, format!("{}/indexnow", mock_server.uri()));

    let result = client.submit_urls(&request(urls(1))).await.unwrap();

    assert!(!result.success);
    assert_eq!(result.status_code, 0);
    let error = result.error.unwrap();
    assert!(error.starts_with("Network error: "), "{}", error);
    assert!(!error.contains("Request timeout"));
}

#[tokio::test]
async fn test_invalid_key_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut bad = request(urls(1));
    bad.key = "not-a-key".to_string();

    let result = client_for(&mock_server).submit_urls(&bad).await;
    assert!(matches!(result, Err(SubmitError::InvalidKey)));
}

#[tokio::test]
async fn test_missing_host_makes_no_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut bad = request(urls(1));
    bad.host = String::new();

    let result = client_for(&mock_server).submit_urls(&bad).await;
    assert!(matches!(result, Err(SubmitError::MissingField("host"))));
}
