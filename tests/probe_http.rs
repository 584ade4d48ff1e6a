//! Integration tests for the diagnostic probe against a mock HTTP server.

use std::time::Duration;

use network_diag::initialization::{init_probe_client, init_resolver};
use network_diag::{build_report, DiagnosticReport, ProbeConfig, ReportStatus};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn probe(url: &str, config: &ProbeConfig) -> DiagnosticReport {
    let client = init_probe_client(config).expect("failed to build probe client");
    let resolver = init_resolver();
    build_report(url, config, &client, &resolver).await
}

fn test_config(timeout_seconds: u64) -> ProbeConfig {
    ProbeConfig {
        timeout_seconds,
        user_agent: "network-diag-test/1.0".to_string(),
    }
}

#[tokio::test]
async fn test_plain_200_produces_success_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("x-diag-test", "yes")
                .set_body_string("hello"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/get", server.uri());
    let report = probe(&url, &test_config(5)).await;

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.status_code, Some(200));
    assert_eq!(report.final_url.as_deref(), Some(url.as_str()));
    assert!(report.error_message.is_empty());
    assert!(report.redirect_history.is_empty());
    assert_eq!(report.content_preview, "REMOVED");
    assert_eq!(report.headers.get("x-diag-test").map(String::as_str), Some("yes"));
    assert!(report.response_time_seconds.is_some());
}

#[tokio::test]
async fn test_non_2xx_status_is_still_success() {
    // The probe reports what the server said; a 404 is a successful probe
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let report = probe(&format!("{}/missing", server.uri()), &test_config(5)).await;

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.status_code, Some(404));
}

#[tokio::test]
async fn test_redirect_chain_is_recorded_in_order() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", format!("{uri}/b")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/c"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/c"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let start = format!("{uri}/a");
    let report = probe(&start, &test_config(5)).await;

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.status_code, Some(200));
    assert_eq!(report.final_url.as_deref(), Some(format!("{uri}/c").as_str()));
    assert_eq!(
        report.redirect_history,
        vec![(302, start.clone()), (301, format!("{uri}/b"))]
    );
}

#[tokio::test]
async fn test_relative_location_is_resolved_against_current_url() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let report = probe(&format!("{uri}/old"), &test_config(5)).await;

    assert_eq!(report.final_url.as_deref(), Some(format!("{uri}/new").as_str()));
}

#[tokio::test]
async fn test_timeout_message_names_the_configured_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let report = probe(&format!("{}/slow", server.uri()), &test_config(1)).await;

    assert_eq!(report.status, ReportStatus::Error);
    assert_eq!(report.status_code, None);
    assert_eq!(report.final_url, None);
    assert_eq!(report.response_time_seconds, None);
    assert!(
        report.error_message.contains("1"),
        "timeout message should mention the configured value: {}",
        report.error_message
    );
    assert!(report.error_message.starts_with("Request timed out after 1 seconds"));
}

#[tokio::test]
async fn test_connection_refused_is_classified_as_connection_error() {
    // Bind a listener to grab a free port, then drop it so connections fail
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind failed");
    let port = listener.local_addr().expect("no local addr").port();
    drop(listener);

    let report = probe(&format!("http://127.0.0.1:{port}/"), &test_config(2)).await;

    assert_eq!(report.status, ReportStatus::Error);
    assert!(
        report
            .error_message
            .starts_with("Connection error occurred (DNS/Firewall/Route)."),
        "unexpected message: {}",
        report.error_message
    );
    assert!(!report.error_message.contains('\''));
}

#[tokio::test]
async fn test_unresolvable_hostname_error_comes_from_the_get() {
    // DNS failure alone never sets status=error; the GET failure does, and
    // the empty ip_addresses list records that resolution found nothing
    let report = probe("https://nonexistent-host.invalid/", &test_config(2)).await;

    assert!(report.ip_addresses.is_empty());
    assert_eq!(report.status, ReportStatus::Error);
    assert!(!report.error_message.is_empty());
}

#[tokio::test]
async fn test_url_without_hostname_skips_dns_silently() {
    let report = probe("not a url at all", &test_config(2)).await;

    assert!(report.ip_addresses.is_empty());
    assert_eq!(report.status, ReportStatus::Error);
    assert!(!report.error_message.is_empty());
}

#[tokio::test]
async fn test_redirect_loop_exhausts_hop_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/loop"))
        .mount(&server)
        .await;

    let report = probe(&format!("{}/loop", server.uri()), &test_config(5)).await;

    assert_eq!(report.status, ReportStatus::Error);
    assert!(report.error_message.starts_with("A general exception occurred."));
    assert!(report.error_message.contains("hops"));
    // Partial hops are discarded on failure, matching the success-only contract
    assert!(report.redirect_history.is_empty());
}

#[tokio::test]
async fn test_redirect_without_location_is_final() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/odd"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let report = probe(&format!("{}/odd", server.uri()), &test_config(5)).await;

    assert_eq!(report.status, ReportStatus::Success);
    assert_eq!(report.status_code, Some(302));
    assert!(report.redirect_history.is_empty());
}
