//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end over real HTTP.

use rufus::config::{Config, CrawlConfig, UserAgentConfig};
use rufus::crawler::{crawl_with, Coordinator, HttpFetcher};
use rufus::output::ScrapeReport;
use rufus::url::CrawlScope;
use rufus::ScrapeClient;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Wraps a body and links into a minimal HTML page
fn page(title: &str, body: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">{}</a>"#, href, href))
        .collect();
    format!(
        "<html><head><title>{}</title></head><body><p>{}</p>{}</body></html>",
        title, body, anchors
    )
}

/// Mounts an HTML page that must be requested exactly `times` times
async fn mount_page(server: &MockServer, route: &str, html: String, times: u64) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html)
                .insert_header("content-type", "text/html"),
        )
        .expect(times)
        .mount(server)
        .await;
}

fn fetcher(timeout: Duration) -> Arc<HttpFetcher> {
    let user_agent = UserAgentConfig {
        crawler_name: "TestBot".to_string(),
        crawler_version: "1.0".to_string(),
        contact_url: None,
    };
    Arc::new(HttpFetcher::from_config(&user_agent, timeout).expect("Failed to build client"))
}

fn config(max_depth: u32, instructions: &str) -> CrawlConfig {
    CrawlConfig::new(max_depth, instructions).with_delay(Duration::ZERO)
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        page("Home", "Welcome", &["/page1", "page2"]),
        1,
    )
    .await;
    mount_page(&mock_server, "/page1", page("Page 1", "Content 1", &[]), 1).await;
    // Links back to the index, which must not be fetched again
    mount_page(
        &mock_server,
        "/page2",
        page("Page 2", "Content 2", &["/", "/page1#top"]),
        1,
    )
    .await;

    let results = crawl_with(&base_url, config(2, ""), fetcher(Duration::from_secs(5)))
        .await
        .expect("Crawl failed");

    assert_eq!(
        results.urls(),
        [
            format!("{}/", base_url),
            format!("{}/page1", base_url),
            format!("{}/page2", base_url)
        ]
    );
    assert_eq!(results.pages()[1].content, "Page 1 Content 1");
}

#[tokio::test]
async fn test_relevance_filter() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        page("Shop", "Welcome to our store", &["/faq", "/jobs"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/faq",
        page("FAQ", "Shipping takes three days. Returns are free.", &[]),
        1,
    )
    .await;
    mount_page(&mock_server, "/jobs", page("Jobs", "We are hiring", &[]), 1).await;

    let coordinator = Coordinator::new(config(1, "shipping returns"), fetcher(Duration::from_secs(5)))
        .expect("Invalid config");
    let outcome = coordinator.run(&base_url).await.expect("Crawl failed");

    assert_eq!(outcome.results.urls(), [format!("{}/faq", base_url)]);
    assert_eq!(outcome.stats.pages_fetched, 3);
    assert_eq!(outcome.stats.pages_filtered, 2);
}

#[tokio::test]
async fn test_bad_status_isolated() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        page("Home", "Index", &["/broken", "/missing", "/ok"]),
        1,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/ok", page("Ok", "Still here", &[]), 1).await;

    let coordinator =
        Coordinator::new(config(1, ""), fetcher(Duration::from_secs(5))).expect("Invalid config");
    let outcome = coordinator.run(&base_url).await.expect("Crawl failed");

    assert_eq!(
        outcome.results.urls(),
        [format!("{}/", base_url), format!("{}/ok", base_url)]
    );
    // 500 from /broken, 404 from the unmatched /missing
    assert_eq!(outcome.stats.bad_status, 2);
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", page("Home", "Index", &["/slow"]), 1).await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(page("Slow", "Eventually", &[]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let coordinator = Coordinator::new(config(1, ""), fetcher(Duration::from_millis(500)))
        .expect("Invalid config");
    let outcome = coordinator.run(&base_url).await.expect("Crawl failed");

    assert_eq!(outcome.results.len(), 1);
    assert_eq!(outcome.stats.fetch_timeouts, 1);
}

#[tokio::test]
async fn test_crawl_with_depth_limit() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(&mock_server, "/", page("Home", "Level 0", &["/a"]), 1).await;
    mount_page(&mock_server, "/a", page("A", "Level 1", &["/a/b"]), 1).await;
    mount_page(&mock_server, "/a/b", page("B", "Level 2", &[]), 0).await;

    let results = crawl_with(&base_url, config(1, ""), fetcher(Duration::from_secs(5)))
        .await
        .expect("Crawl failed");

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_scope_keeps_crawl_on_seed_host() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Same listener, different host name, so the scope tells them apart
    let other_url = other_server.uri().replace("127.0.0.1", "localhost");

    mount_page(
        &mock_server,
        "/",
        page("Home", "Index", &["/local", &format!("{}/external", other_url)]),
        1,
    )
    .await;
    mount_page(&mock_server, "/local", page("Local", "Here", &[]), 1).await;
    mount_page(&other_server, "/external", page("External", "There", &[]), 0).await;

    let seed = url::Url::parse(&base_url).expect("Invalid base URL");
    let config = config(1, "").with_scope(CrawlScope::same_domain(&seed));
    let results = crawl_with(&base_url, config, fetcher(Duration::from_secs(5)))
        .await
        .expect("Crawl failed");

    assert_eq!(results.len(), 2);
}

#[tokio::test]
async fn test_user_agent_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page("Home", "Hi", &[])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let results = crawl_with(
        &mock_server.uri(),
        config(0, ""),
        fetcher(Duration::from_secs(5)),
    )
    .await
    .expect("Crawl failed");

    assert_eq!(results.len(), 1);
}

#[tokio::test]
async fn test_scrape_client_writes_report() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/",
        page("Docs", "Product overview.", &["/features", "/faq"]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/features",
        page("Features", "Product features include sync and backup.", &[]),
        1,
    )
    .await;
    mount_page(
        &mock_server,
        "/faq",
        page("FAQ", "Customer FAQs about billing.", &[]),
        1,
    )
    .await;

    let mut app_config = Config::default();
    app_config.crawler.delay_ms = 0;
    app_config.crawler.max_depth = 1;

    let dir = TempDir::new().expect("Failed to create temp dir");
    let report_path = dir.path().join("report.json");

    let client = ScrapeClient::from_config(app_config)
        .await
        .expect("Failed to build client");
    let report = client
        .scrape(&base_url, "product features", None)
        .await
        .expect("Scrape failed");
    report.write_report(&report_path).expect("Failed to write report");

    let loaded = ScrapeReport::read_report(&report_path).expect("Failed to read report");
    assert_eq!(loaded.source_url, base_url);
    assert_eq!(loaded.instructions, "product features");
    assert_eq!(loaded.pages_found, 2);
    assert!(loaded.summary.contains("sync and backup"));
    assert_eq!(loaded.stats.pages_fetched, 3);
}
