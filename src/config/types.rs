use crate::output::OutputFormat;
use serde::Deserialize;

/// Default first listing page
pub const DEFAULT_START_URL: &str = "https://books.toscrape.com/catalogue/page-1.html";

/// Default User-Agent header; the catalog serves ordinary desktop browsers
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36";

/// Main configuration structure for Shelf-Scrape
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Scraping behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// First listing page to fetch
    #[serde(rename = "start-url", default = "default_start_url")]
    pub start_url: String,

    /// Maximum number of listing pages to process (0 = all)
    #[serde(rename = "max-pages", default)]
    pub max_pages: u32,

    /// Whether to visit each product's detail page
    #[serde(default)]
    pub details: bool,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Pause between consecutive requests (milliseconds, 0 = none)
    #[serde(rename = "request-delay", default)]
    pub request_delay: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            max_pages: 0,
            details: false,
            request_timeout: default_request_timeout(),
            request_delay: 0,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Value sent in the User-Agent header
    #[serde(default = "default_user_agent")]
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: default_user_agent(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Destination file
    #[serde(default = "default_output_path")]
    pub path: String,

    /// Explicit export format; inferred from the path's extension when absent
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
        }
    }
}

fn default_start_url() -> String {
    DEFAULT_START_URL.to_string()
}

fn default_request_timeout() -> u64 {
    20
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_output_path() -> String {
    "books.xlsx".to_string()
}
