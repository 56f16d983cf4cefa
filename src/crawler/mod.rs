//! Crawler module for catalog page fetching and processing
//!
//! This module contains the scraping pipeline:
//! - HTTP fetching
//! - Listing page parsing (products + next-page link)
//! - Detail page parsing (extended product fields)
//! - The pagination loop that ties them together

mod coordinator;
mod detail;
mod fetcher;
mod listing;
mod parser;

pub use coordinator::{Coordinator, ScrapeOutcome, StopReason};
pub use detail::parse_detail_page;
pub use fetcher::{build_http_client, fetch_page};
pub use listing::{parse_listing_page, parse_price, ListingPage};

use crate::config::Config;
use crate::ShelfError;

/// Runs a complete scrape
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client
/// 2. Walk the listing pages from the configured start URL
/// 3. Optionally visit each product's detail page
/// 4. Return the collected records with run statistics
///
/// # Arguments
///
/// * `config` - The validated configuration
///
/// # Returns
///
/// * `Ok(ScrapeOutcome)` - Records and statistics
/// * `Err(ShelfError)` - The first listing page could not be loaded, or setup failed
pub async fn scrape(config: &Config) -> Result<ScrapeOutcome, ShelfError> {
    Coordinator::new(config)?.run().await
}
