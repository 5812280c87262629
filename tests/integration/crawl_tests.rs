//! Integration tests for the crawler
//!
//! These tests use wiremock to serve result pages and run the full
//! warm-up, pagination and output cycle over real HTTP.

use deal_scout::config::Config;
use deal_scout::crawler::{CrawlOrchestrator, Pacer, QueryStatus};
use deal_scout::navigator::HttpNavigator;
use deal_scout::output::{DealWriter, TextFileWriter};
use deal_scout::query::Query;
use deal_scout::DoneReason;
use rust_decimal::Decimal;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing every endpoint at the mock server
fn create_test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.site.home_url = format!("{}/", base_url);
    config.site.search_url = format!("{}/s", base_url);
    config.site.default_url = format!("{}/top-brands", base_url);
    config.crawler.results_timeout_ms = 200;
    config.crawler.warmup_settle_ms = 0;
    config.crawler.navigation_timeout_secs = 5;
    config
}

/// One search result item in storefront markup
fn listing(title: &str, href: &str, current: &str, list: Option<&str>) -> String {
    let list_price = list
        .map(|price| {
            format!(
                r#"<span class="a-price a-text-price"><span class="a-offscreen">{}</span></span>"#,
                price
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div data-component-type="s-search-result">
            <h2><a class="a-link-normal" href="{}"><span>{}</span></a></h2>
            <span class="a-price"><span class="a-offscreen">{}</span></span>
            {}
        </div>"#,
        href, title, current, list_price
    )
}

/// A results page with the given items and an optional next-page link
fn results_page(items: &[String], next: Option<&str>) -> String {
    let pagination = match next {
        Some(href) => format!(r#"<a class="s-pagination-next" href="{}">Next</a>"#, href),
        None => r#"<span class="s-pagination-next s-pagination-disabled">Next</span>"#.to_string(),
    };

    format!(
        "<html><head><title>Results</title></head><body>{}{}</body></html>",
        items.join("\n"),
        pagination
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn mount_home(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html("<html><body>Welcome</body></html>".to_string()))
        .expect(1)
        .mount(server)
        .await;
}

fn navigator() -> HttpNavigator {
    HttpNavigator::new(
        &deal_scout::config::UserAgentConfig::default(),
        Duration::from_secs(5),
    )
    .expect("Failed to build navigator")
}

fn orchestrator(config: Config) -> CrawlOrchestrator {
    CrawlOrchestrator::new(config).with_pacer(Pacer::none())
}

fn brands(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[tokio::test]
async fn test_brand_crawl_follows_pagination() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "Outdoor Gear Alpine"))
        .respond_with(html(results_page(
            &[
                listing("Alpine Tent", "/dp/tent", "$75.00", Some("$100.00")),
                listing("Alpine Mug", "/dp/mug", "$9.00", Some("$10.00")),
                listing("Alpine 3 in 1 Jacket", "/dp/jacket", "$20.00", Some("$100.00")),
            ],
            Some("/results/alpine/2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/results/alpine/2"))
        .respond_with(html(results_page(
            &[
                listing("Alpine Stove", "/dp/stove", "$30.00", Some("$60.00")),
                listing("Alpine Lantern", "/dp/lantern", "$15.00", None),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let queries = Query::queue_from_terms(&brands(&["Alpine"]), &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;

    let titles: Vec<_> = result.deals.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpine Tent", "Alpine Stove"]);
    assert_eq!(result.deals[0].link, format!("{}/dp/tent", base_url));
    assert_eq!(result.deals[1].discount_percent, Decimal::from(50));

    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.reports[0].pages_scanned, 2);
    assert_eq!(
        result.reports[0].status,
        QueryStatus::Completed(DoneReason::NoNextPage)
    );
    assert!(result.aborted.is_none());
}

#[tokio::test]
async fn test_failed_query_does_not_stop_queue() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "Outdoor Gear Broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "Outdoor Gear Cascade"))
        .respond_with(html(results_page(
            &[listing("Cascade Pack", "/dp/pack", "$40.00", Some("$80.00"))],
            None,
        )))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let queries =
        Query::queue_from_terms(&brands(&["Broken", "Cascade"]), &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;

    assert_eq!(result.reports.len(), 2);
    assert!(matches!(result.reports[0].status, QueryStatus::Failed(_)));
    assert_eq!(result.reports[0].pages_scanned, 0);
    assert_eq!(
        result.reports[1].status,
        QueryStatus::Completed(DoneReason::NoNextPage)
    );
    assert_eq!(result.deals.len(), 1);
    assert_eq!(result.deals[0].title, "Cascade Pack");
    assert!(result.aborted.is_none());
}

#[tokio::test]
async fn test_page_cap_limits_pages() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    // Every page links to the same next page, so only the cap ends the query
    Mock::given(method("GET"))
        .and(path("/top-brands"))
        .respond_with(html(results_page(
            &[listing("Daypack", "/dp/daypack", "$25.00", Some("$50.00"))],
            Some("/top-brands"),
        )))
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.max_pages = 3;
    let queries = Query::queue_from_terms(&[], &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;

    assert_eq!(result.reports[0].label, "default");
    assert_eq!(result.reports[0].pages_scanned, 3);
    assert_eq!(
        result.reports[0].status,
        QueryStatus::Completed(DoneReason::PageCapReached)
    );
    assert_eq!(result.deals.len(), 3);
}

#[tokio::test]
async fn test_target_stops_before_next_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("k", "Outdoor Gear Summit"))
        .respond_with(html(results_page(
            &[
                listing("Summit Poles", "/dp/poles", "$30.00", Some("$60.00")),
                listing("Summit Gloves", "/dp/gloves", "$12.00", Some("$24.00")),
            ],
            Some("/results/summit/2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/results/summit/2"))
        .respond_with(html(results_page(&[], None)))
        .expect(0)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.target_deal_count = 2;
    let queries = Query::queue_from_terms(&brands(&["Summit"]), &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;

    assert_eq!(result.deals.len(), 2);
    assert_eq!(
        result.reports[0].status,
        QueryStatus::Completed(DoneReason::TargetMet)
    );
}

#[tokio::test]
async fn test_page_without_results_ends_query() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/top-brands"))
        .respond_with(html(
            "<html><body>Sorry, we just need to make sure you're not a robot.</body></html>"
                .to_string(),
        ))
        .mount(&mock_server)
        .await;

    let config = create_test_config(&base_url);
    let queries = Query::queue_from_terms(&[], &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;

    assert!(result.deals.is_empty());
    assert_eq!(result.reports[0].pages_scanned, 1);
    assert_eq!(
        result.reports[0].status,
        QueryStatus::Completed(DoneReason::NoNextPage)
    );
}

#[tokio::test]
async fn test_crawl_writes_deal_list() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/top-brands"))
        .respond_with(html(results_page(
            &[
                listing("Tent", "/dp/tent", "$75.00", Some("$100.00")),
                listing("Headlamp", "/dp/headlamp", "$19.99", Some("$30.00")),
                listing("Cooler", "/dp/cooler", "$90.00", Some("$100.00")),
            ],
            None,
        )))
        .mount(&mock_server)
        .await;

    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let mut config = create_test_config(&base_url);
    config.output.directory = temp_dir.path().join("Deals").to_string_lossy().into_owned();

    let writer = TextFileWriter::new(&config.output);
    let queries = Query::queue_from_terms(&[], &config.site).unwrap();
    let mut nav = navigator();

    let result = orchestrator(config).run(&mut nav, &queries).await;
    let output_path = writer.write(&result.deals).expect("Failed to write deals");

    let content = std::fs::read_to_string(&output_path).expect("Failed to read deals");
    let expected = format!(
        "Tent\n\
         Price: $75 (Was $100 - 25.00% off)\n\
         Link: {base}/dp/tent\n\
         Is Top Brand? Yes (Filtered by Amazon/User)\n\
         ------------------------\n\
         \n\
         Headlamp\n\
         Price: $19.99 (Was $30 - 33.37% off)\n\
         Link: {base}/dp/headlamp\n\
         Is Top Brand? Yes (Filtered by Amazon/User)\n\
         ------------------------",
        base = base_url
    );
    assert_eq!(content, expected);
    assert_eq!(output_path, temp_dir.path().join("Deals").join("deals.txt"));
}

#[tokio::test]
async fn test_crawl_entry_point_runs_default_query() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_home(&mock_server).await;

    Mock::given(method("GET"))
        .and(path("/top-brands"))
        .respond_with(html(results_page(
            &[listing("Hammock", "/dp/hammock", "$20.00", Some("$40.00"))],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&base_url);
    config.crawler.pacing_base_ms = 0;
    config.crawler.pacing_jitter_ms = 0;

    let result = deal_scout::crawler::crawl(config, &brands(&["  "]))
        .await
        .expect("Crawl should start");

    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.reports[0].label, "default");
    assert_eq!(result.deals.len(), 1);
    assert_eq!(result.deals[0].title, "Hammock");
}
