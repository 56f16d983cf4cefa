//! Configuration module for Shelf-Scrape
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Command-line flags are layered on top by the binary.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf.toml")).unwrap();
//! println!("Starting from: {}", config.scraper.start_url);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, OutputConfig, ScraperConfig, UserAgentConfig, DEFAULT_START_URL, DEFAULT_USER_AGENT,
};

pub use parser::{load_config, parse_config};
pub use validation::validate;
