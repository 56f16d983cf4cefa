//! Run statistics
//!
//! Counters collected by the coordinator during a run and the end-of-run
//! summary printed by the binary.

use crate::crawler::StopReason;
use std::time::Duration;

/// Counters for one scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeStatistics {
    /// Listing pages fetched and parsed
    pub pages_fetched: u64,

    /// Listing pages that failed to load (the run stops at the first one)
    pub pages_failed: u64,

    /// Product cards skipped as malformed
    pub entries_skipped: u64,

    /// Products dropped because their URL was already collected
    pub duplicates_dropped: u64,

    /// Detail pages fetched and parsed
    pub details_fetched: u64,

    /// Detail pages that failed; those records have no extended fields
    pub details_failed: u64,

    /// Records in the final output
    pub records: u64,

    pub stop_reason: Option<StopReason>,

    pub elapsed: Duration,
}

impl ScrapeStatistics {
    /// Returns the detail success rate as a percentage
    pub fn detail_success_rate(&self) -> f64 {
        let attempted = self.details_fetched + self.details_failed;
        if attempted == 0 {
            return 0.0;
        }
        (self.details_fetched as f64 / attempted as f64) * 100.0
    }

    /// Returns true if anything was skipped or failed during the run
    pub fn had_problems(&self) -> bool {
        self.pages_failed > 0 || self.entries_skipped > 0 || self.details_failed > 0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ScrapeStatistics) {
    println!("=== Scrape Statistics ===\n");

    println!("Listing pages:");
    println!("  Fetched: {}", stats.pages_fetched);
    if stats.pages_failed > 0 {
        println!("  Failed: {}", stats.pages_failed);
    }
    if let Some(reason) = stats.stop_reason {
        println!("  Stopped because: {}", reason);
    }
    println!();

    println!("Products:");
    println!("  Records: {}", stats.records);
    println!("  Malformed entries skipped: {}", stats.entries_skipped);
    println!("  Duplicates dropped: {}", stats.duplicates_dropped);
    println!();

    let attempted = stats.details_fetched + stats.details_failed;
    if attempted > 0 {
        println!("Detail pages:");
        println!("  Fetched: {}", stats.details_fetched);
        println!("  Failed: {}", stats.details_failed);
        println!(
            "  Success rate: {:.1}%",
            stats.detail_success_rate()
        );
        println!();
    }

    println!("Elapsed: {:.2}s", stats.elapsed.as_secs_f64());
}
