//! Integration tests for the scraper
//!
//! These tests use wiremock to serve a small mock catalog and run the full
//! fetch → parse → accumulate → export cycle against it.

use shelf_scrape::config::Config;
use shelf_scrape::crawler::{scrape, Coordinator, StopReason};
use calamine::{open_workbook, Data, Reader, Xlsx};
use shelf_scrape::output::{export_records, OutputFormat, SHEET_NAME};
use shelf_scrape::ShelfError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Renders one product card the way the catalog does
fn product_card(id: usize) -> String {
    format!(
        r#"<li class="col-xs-6 col-sm-4 col-md-3 col-lg-3">
        <article class="product_pod">
            <div class="image_container">
                <a href="book_{id}/index.html"><img src="../media/cache/{id}.jpg" alt="Book {id}" class="thumbnail"></a>
            </div>
            <p class="star-rating {rating}"><i class="icon-star"></i></p>
            <h3><a href="book_{id}/index.html" title="Book {id}">Book {id}</a></h3>
            <div class="product_price">
                <p class="price_color">£{id}.50</p>
                <p class="instock availability"><i class="icon-ok"></i>
                    In stock
                </p>
            </div>
        </article>
        </li>"#,
        id = id,
        rating = ["One", "Two", "Three", "Four", "Five"][id % 5],
    )
}

/// Renders a listing page holding products `ids`, linking to `next` if given
fn listing_page(ids: std::ops::RangeInclusive<usize>, next: Option<&str>) -> String {
    let cards: Vec<String> = ids.map(product_card).collect();
    let pager = next
        .map(|href| {
            format!(r#"<ul class="pager"><li class="current">Page</li><li class="next"><a href="{href}">next</a></li></ul>"#)
        })
        .unwrap_or_default();
    format!(
        r#"<html><head><title>All products</title></head><body>
        <section><ol class="row">{}</ol><div>{}</div></section>
        </body></html>"#,
        cards.join("\n"),
        pager
    )
}

/// Renders a detail page; the UPC row is left out when `upc` is None
fn detail_page(category: &str, upc: Option<&str>) -> String {
    let upc_row = upc
        .map(|upc| format!("<tr><th>UPC</th><td>{upc}</td></tr>"))
        .unwrap_or_default();
    format!(
        r#"<html><body>
        <ul class="breadcrumb">
            <li><a href="../../index.html">Home</a></li>
            <li><a href="../category/books_1/index.html">Books</a></li>
            <li><a href="../category/books/x_2/index.html">{category}</a></li>
            <li class="active">Book</li>
        </ul>
        <div class="item active"><img src="../../media/cache/full.jpg" alt="Book"></div>
        <div id="product_description" class="sub-header"><h2>Product Description</h2></div>
        <p>A {category} book.</p>
        <table class="table table-striped">
            {upc_row}
            <tr><th>Product Type</th><td>Books</td></tr>
        </table>
        </body></html>"#
    )
}

async fn mount_html(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Page 1 has 20 products and links to page 2, which has 5
async fn two_page_catalog() -> MockServer {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/page-1.html",
        listing_page(1..=20, Some("page-2.html")),
    )
    .await;
    mount_html(&server, "/catalogue/page-2.html", listing_page(21..=25, None)).await;
    server
}

fn test_config(server: &MockServer, max_pages: u32, details: bool) -> Config {
    let mut config = Config::default();
    config.scraper.start_url = format!("{}/catalogue/page-1.html", server.uri());
    config.scraper.max_pages = max_pages;
    config.scraper.details = details;
    config.scraper.request_timeout = 5;
    config
}

#[tokio::test]
async fn test_all_pages_exported_to_csv() {
    let server = two_page_catalog().await;
    let config = test_config(&server, 0, false);

    let outcome = scrape(&config).await.expect("scrape failed");
    assert_eq!(outcome.records.len(), 25);
    assert_eq!(outcome.stats.pages_fetched, 2);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::LastPage));

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    let format = export_records(
        outcome.records.records(),
        outcome.include_details,
        &csv_path,
        None,
    )
    .unwrap();
    assert_eq!(format, OutputFormat::Csv);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["title", "price", "rating", "availability", "product_url"]
    );

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 25);
    assert!(rows.iter().all(|row| row.len() == 5));

    // Order follows the pages
    assert_eq!(&rows[0][0], "Book 1");
    assert_eq!(&rows[20][0], "Book 21");
    assert_eq!(&rows[24][0], "Book 25");

    // Values survive the round trip
    assert_eq!(&rows[2][1], "3.50");
    assert_eq!(&rows[2][2], "4");
    assert_eq!(&rows[2][3], "In stock");
    assert_eq!(
        rows[2][4].to_string(),
        format!("{}/catalogue/book_3/index.html", server.uri())
    );
}

#[tokio::test]
async fn test_max_pages_limits_traversal() {
    let server = two_page_catalog().await;
    let config = test_config(&server, 1, false);

    let outcome = scrape(&config).await.expect("scrape failed");
    assert_eq!(outcome.records.len(), 20);
    assert_eq!(outcome.stats.pages_fetched, 1);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::PageLimit));
}

#[tokio::test]
async fn test_max_pages_larger_than_catalog() {
    let server = two_page_catalog().await;
    let config = test_config(&server, 10, false);

    let outcome = scrape(&config).await.expect("scrape failed");
    assert_eq!(outcome.records.len(), 25);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::LastPage));
}

#[tokio::test]
async fn test_details_enrich_records() {
    let server = MockServer::start().await;
    mount_html(&server, "/catalogue/page-1.html", listing_page(1..=3, None)).await;
    mount_html(
        &server,
        "/catalogue/book_1/index.html",
        detail_page("Poetry", Some("a897fe39b1053632")),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/book_2/index.html",
        detail_page("Travel", None),
    )
    .await;
    mount_status(&server, "/catalogue/book_3/index.html", 404).await;

    let config = test_config(&server, 0, true);
    let outcome = scrape(&config).await.expect("scrape failed");
    let records = outcome.records.records();

    assert_eq!(records.len(), 3);
    assert!(outcome.include_details);
    assert_eq!(outcome.stats.details_fetched, 2);
    assert_eq!(outcome.stats.details_failed, 1);

    let first = records[0].details.as_ref().expect("details for book 1");
    assert_eq!(first.category, "Poetry");
    assert_eq!(first.upc, "a897fe39b1053632");
    assert_eq!(first.description, "A Poetry book.");
    assert_eq!(
        first.image_url,
        format!("{}/media/cache/full.jpg", server.uri())
    );

    // Missing UPC leaves the other fields populated
    let second = records[1].details.as_ref().expect("details for book 2");
    assert_eq!(second.upc, "");
    assert_eq!(second.category, "Travel");
    assert!(!second.description.is_empty());
    assert!(!second.image_url.is_empty());

    // A failed detail page keeps the base record
    assert_eq!(records[2].title, "Book 3");
    assert!(records[2].details.is_none());

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("books.csv");
    export_records(records, outcome.include_details, &csv_path, None).unwrap();

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    assert_eq!(reader.headers().unwrap().len(), 9);
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(&rows[1][5], "Travel");
    assert_eq!(&rows[1][7], "");
    assert!((5..9).all(|i| rows[2][i].is_empty()));
}

#[tokio::test]
async fn test_first_page_failure_is_fatal() {
    let server = MockServer::start().await;
    mount_status(&server, "/catalogue/page-1.html", 500).await;

    let config = test_config(&server, 0, false);
    let result = scrape(&config).await;

    assert!(matches!(result, Err(ShelfError::Status { status: 500, .. })));
}

#[tokio::test]
async fn test_later_page_failure_keeps_collected_records() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/page-1.html",
        listing_page(1..=20, Some("page-2.html")),
    )
    .await;
    mount_status(&server, "/catalogue/page-2.html", 503).await;

    let config = test_config(&server, 0, false);
    let outcome = scrape(&config).await.expect("scrape failed");

    assert_eq!(outcome.records.len(), 20);
    assert_eq!(outcome.stats.pages_failed, 1);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::FetchFailed));
}

#[tokio::test]
async fn test_duplicates_across_pages_dropped() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/page-1.html",
        listing_page(1..=5, Some("page-2.html")),
    )
    .await;
    mount_html(&server, "/catalogue/page-2.html", listing_page(4..=8, None)).await;

    let config = test_config(&server, 0, false);
    let outcome = scrape(&config).await.expect("scrape failed");

    assert_eq!(outcome.records.len(), 8);
    assert_eq!(outcome.stats.duplicates_dropped, 2);
}

#[tokio::test]
async fn test_pagination_loop_stops() {
    let server = MockServer::start().await;
    mount_html(
        &server,
        "/catalogue/page-1.html",
        listing_page(1..=2, Some("page-2.html")),
    )
    .await;
    mount_html(
        &server,
        "/catalogue/page-2.html",
        listing_page(3..=4, Some("page-1.html")),
    )
    .await;

    let config = test_config(&server, 0, false);
    let outcome = scrape(&config).await.expect("scrape failed");

    assert_eq!(outcome.records.len(), 4);
    assert_eq!(outcome.stats.stop_reason, Some(StopReason::PaginationLoop));
}

#[tokio::test]
async fn test_no_detail_requests_without_flag() {
    let server = MockServer::start().await;
    mount_html(&server, "/catalogue/page-1.html", listing_page(1..=2, None)).await;
    Mock::given(method("GET"))
        .and(path("/catalogue/book_1/index.html"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server, 0, false);
    let mut coordinator = Coordinator::new(&config).unwrap();
    let outcome = coordinator.run().await.expect("scrape failed");

    assert!(!outcome.include_details);
    assert!(outcome.records.records().iter().all(|r| r.details.is_none()));
}

#[tokio::test]
async fn test_xlsx_export_of_scrape() {
    let server = two_page_catalog().await;
    let config = test_config(&server, 0, false);
    let outcome = scrape(&config).await.expect("scrape failed");

    let dir = tempfile::tempdir().unwrap();
    let xlsx_path = dir.path().join("books.xlsx");
    let format = export_records(
        outcome.records.records(),
        outcome.include_details,
        &xlsx_path,
        None,
    )
    .unwrap();

    assert_eq!(format, OutputFormat::Xlsx);

    let mut workbook: Xlsx<_> = open_workbook(&xlsx_path).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);

    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    assert_eq!(range.height(), 26);
    assert_eq!(range.width(), 5);
    assert_eq!(range.get_value((0, 1)), Some(&Data::String("price".to_string())));
    assert_eq!(range.get_value((1, 0)), Some(&Data::String("Book 1".to_string())));
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(1.5)));
    assert_eq!(range.get_value((25, 1)), Some(&Data::Float(25.5)));
}

#[tokio::test]
async fn test_request_delay_spaces_requests() {
    let server = two_page_catalog().await;
    let mut config = test_config(&server, 0, false);
    config.scraper.request_delay = 300;

    let started = std::time::Instant::now();
    let outcome = scrape(&config).await.expect("scrape failed");

    assert_eq!(outcome.stats.pages_fetched, 2);
    assert!(started.elapsed() >= std::time::Duration::from_millis(300));
}

#[tokio::test]
async fn test_request_delay_skipped_before_first_request() {
    let server = MockServer::start().await;
    mount_html(&server, "/catalogue/page-1.html", listing_page(1..=3, None)).await;
    let mut config = test_config(&server, 0, false);
    config.scraper.request_delay = 5_000;

    let started = std::time::Instant::now();
    let outcome = scrape(&config).await.expect("scrape failed");

    assert_eq!(outcome.records.len(), 3);
    assert!(started.elapsed() < std::time::Duration::from_millis(5_000));
}
