//! Shelf-Scrape main entry point
//!
//! This is the command-line interface for the Shelf-Scrape catalog scraper.

use clap::{Parser, ValueEnum};
use shelf_scrape::config::{load_config, validate, Config};
use shelf_scrape::crawler::{scrape, ScrapeOutcome};
use shelf_scrape::output::{export_records, print_statistics};
use shelf_scrape::{OutputFormat, ShelfError};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shelf-Scrape: a catalog scraper
///
/// Walks the listing pages of a book catalog, optionally visits every
/// product's detail page, and saves the records as CSV or XLSX.
#[derive(Parser, Debug)]
#[command(name = "shelf-scrape")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a paginated book catalog to CSV or XLSX", long_about = None)]
struct Cli {
    /// Optional TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// First listing page
    #[arg(long, value_name = "URL")]
    start_url: Option<String>,

    /// Maximum number of listing pages to process (0 = all)
    #[arg(long, value_name = "N")]
    max_pages: Option<u32>,

    /// Visit each product's detail page for category, description, UPC and image
    #[arg(long)]
    details: bool,

    /// Output file; a .csv extension selects CSV, anything else XLSX
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Export format, overriding the output file's extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FormatArg {
    Csv,
    Xlsx,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Xlsx => OutputFormat::Xlsx,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    // Run the scrape
    let outcome = match scrape(&config).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    if outcome.records.is_empty() {
        tracing::warn!("No records collected, writing header only");
    }

    // Export
    if let Err(e) = save(&config, &outcome) {
        tracing::error!("Writing {} failed: {}", config.output.path, e);
        return Err(e.into());
    }

    if outcome.stats.had_problems() {
        tracing::warn!("Some pages or product details were skipped; see the log above");
    }

    // Print summary
    if !cli.quiet {
        print_statistics(&outcome.stats);
        println!();
        println!(
            "Saved {} records → {}",
            outcome.records.len(),
            config.output.path
        );
    }

    Ok(())
}

/// Writes the collected records to the configured output file
fn save(config: &Config, outcome: &ScrapeOutcome) -> Result<OutputFormat, ShelfError> {
    let format = export_records(
        outcome.records.records(),
        outcome.include_details,
        Path::new(&config.output.path),
        config.output.format,
    )?;
    Ok(format)
}

/// Loads the config file (if any) and layers the command-line flags on top
fn build_config(cli: &Cli) -> Result<Config, shelf_scrape::ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)?
        }
        None => Config::default(),
    };

    if let Some(start_url) = &cli.start_url {
        config.scraper.start_url = start_url.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.scraper.max_pages = max_pages;
    }
    if cli.details {
        config.scraper.details = true;
    }
    if let Some(output) = &cli.output {
        config.output.path = output.to_string_lossy().into_owned();
    }
    if let Some(format) = cli.format {
        config.output.format = Some(format.into());
    }

    validate(&config)?;
    Ok(config)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scrape=info,warn"),
            1 => EnvFilter::new("shelf_scrape=debug,info"),
            2 => EnvFilter::new("shelf_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
