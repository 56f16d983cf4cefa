//! Scrape coordinator - the pagination loop
//!
//! The coordinator walks listing pages one at a time:
//! - Fetch the current listing page and parse its products
//! - Optionally fetch and parse each new product's detail page
//! - Append records to the accumulator
//! - Follow the next-page link until the last page or the page limit
//!
//! Every request is awaited before the next one is sent.

use crate::config::Config;
use crate::crawler::detail::parse_detail_page;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::listing::{parse_listing_page, ListingPage};
use crate::output::ScrapeStatistics;
use crate::record::{ProductDetails, ProductRecord, RecordSet};
use crate::url::normalize_url;
use crate::ShelfError;
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

/// Why the pagination loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The last listing page had no next-page link
    LastPage,
    /// The configured page limit was reached
    PageLimit,
    /// A listing page after the first could not be loaded
    FetchFailed,
    /// The next-page link pointed back to a page already processed
    PaginationLoop,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::LastPage => "reached the last page",
            Self::PageLimit => "reached the page limit",
            Self::FetchFailed => "a listing page failed to load",
            Self::PaginationLoop => "pagination looped back to a visited page",
        };
        f.write_str(text)
    }
}

/// Driver state: either fetching a listing page or finished
#[derive(Debug, Clone, PartialEq, Eq)]
enum DriverState {
    Fetching(Url),
    Done(StopReason),
}

/// Everything a finished run produced
#[derive(Debug)]
pub struct ScrapeOutcome {
    /// Collected records, in page order
    pub records: RecordSet,

    /// Whether detail collection was requested (decides the output columns)
    pub include_details: bool,

    pub stats: ScrapeStatistics,
}

/// Main scrape coordinator
pub struct Coordinator {
    client: Client,
    start_url: Url,
    max_pages: u32,
    details: bool,
    request_delay: Duration,
    requests_sent: u64,
}

impl Coordinator {
    /// Creates a new coordinator from a validated configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ShelfError)` - Bad start URL or HTTP client could not be built
    pub fn new(config: &Config) -> Result<Self, ShelfError> {
        let start_url = normalize_url(&config.scraper.start_url)?;
        let client = build_http_client(config)?;

        Ok(Self {
            client,
            start_url,
            max_pages: config.scraper.max_pages,
            details: config.scraper.details,
            request_delay: Duration::from_millis(config.scraper.request_delay),
            requests_sent: 0,
        })
    }

    /// Runs the pagination loop to completion
    ///
    /// A failure on the first listing page is returned as an error. A failure
    /// on any later page ends the run early, keeping every record collected
    /// so far. Detail page failures only leave that record without details.
    pub async fn run(&mut self) -> Result<ScrapeOutcome, ShelfError> {
        tracing::info!(
            "Starting scrape at {} (max pages: {}, details: {})",
            self.start_url,
            if self.max_pages == 0 {
                "all".to_string()
            } else {
                self.max_pages.to_string()
            },
            self.details
        );

        let start_time = Instant::now();
        let mut records = RecordSet::new();
        let mut stats = ScrapeStatistics::default();
        let mut visited: HashSet<Url> = HashSet::new();
        let mut state = DriverState::Fetching(self.start_url.clone());

        let stop_reason = loop {
            let page_url = match state {
                DriverState::Fetching(url) => url,
                DriverState::Done(reason) => break reason,
            };
            visited.insert(page_url.clone());

            // Fetch and parse the listing page
            let listing = match self.load_listing(&page_url).await {
                Ok(listing) => listing,
                Err(e) if stats.pages_fetched == 0 => {
                    tracing::error!("First listing page {} failed: {}", page_url, e);
                    return Err(e);
                }
                Err(e) => {
                    tracing::warn!("Stopping early, listing page {} failed: {}", page_url, e);
                    stats.pages_failed += 1;
                    state = DriverState::Done(StopReason::FetchFailed);
                    continue;
                }
            };

            // Collect its products
            stats.pages_fetched += 1;
            stats.entries_skipped += listing.skipped as u64;
            let found = listing.records.len();

            for record in listing.records {
                self.accept(record, &mut records, &mut stats).await?;
            }

            tracing::info!(
                "Page {}: {} products ({} collected so far)",
                stats.pages_fetched,
                found,
                records.len()
            );

            // Follow the next-page link
            state = self.next_state(stats.pages_fetched, listing.next_page, &visited);
        };

        // Finalize statistics
        stats.stop_reason = Some(stop_reason);
        stats.records = records.len() as u64;
        stats.elapsed = start_time.elapsed();

        tracing::info!(
            "Scrape finished: {} records from {} pages in {:?} ({})",
            stats.records,
            stats.pages_fetched,
            stats.elapsed,
            stop_reason
        );

        Ok(ScrapeOutcome {
            records,
            include_details: self.details,
            stats,
        })
    }

    /// Decides where the loop goes after a page has been processed
    fn next_state(
        &self,
        pages_fetched: u64,
        next_page: Option<Url>,
        visited: &HashSet<Url>,
    ) -> DriverState {
        if self.max_pages > 0 && pages_fetched >= u64::from(self.max_pages) {
            return DriverState::Done(StopReason::PageLimit);
        }

        match next_page {
            Some(next) if visited.contains(&next) => {
                tracing::warn!("Next page {} was already processed, stopping", next);
                DriverState::Done(StopReason::PaginationLoop)
            }
            Some(next) => DriverState::Fetching(next),
            None => DriverState::Done(StopReason::LastPage),
        }
    }

    /// Fetches and parses one listing page
    async fn load_listing(&mut self, page_url: &Url) -> Result<ListingPage, ShelfError> {
        let body = self.get(page_url).await?;
        parse_listing_page(&body, page_url)
    }

    /// Enriches a record if requested and appends it to the accumulator
    async fn accept(
        &mut self,
        mut record: ProductRecord,
        records: &mut RecordSet,
        stats: &mut ScrapeStatistics,
    ) -> Result<(), ShelfError> {
        if records.contains(&record.product_url) {
            tracing::debug!("Dropping duplicate product {}", record.product_url);
            stats.duplicates_dropped += 1;
            return Ok(());
        }

        // Enrich from the detail page
        if self.details {
            let product_url = Url::parse(&record.product_url)?;
            match self.load_details(&product_url).await {
                Ok(details) => {
                    stats.details_fetched += 1;
                    record.details = Some(details);
                }
                Err(e) => {
                    tracing::warn!("Skipping details for {}: {}", product_url, e);
                    stats.details_failed += 1;
                }
            }
        }

        records.push(record);
        Ok(())
    }

    async fn load_details(
        &mut self,
        product_url: &Url,
    ) -> Result<ProductDetails, ShelfError> {
        let body = self.get(product_url).await?;
        parse_detail_page(&body, product_url)
    }

    /// Pause owed before the next request; nothing before the first one
    fn pause_before_request(&self) -> Option<Duration> {
        (self.requests_sent > 0 && !self.request_delay.is_zero()).then_some(self.request_delay)
    }

    /// Sends a GET, waiting out the configured delay between requests
    async fn get(&mut self, url: &Url) -> Result<String, ShelfError> {
        if let Some(pause) = self.pause_before_request() {
            tokio::time::sleep(pause).await;
        }
        self.requests_sent += 1;
        fetch_page(&self.client, url).await
    }
}
