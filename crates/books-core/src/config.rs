//! Scraper configuration

use std::path::PathBuf;

use crate::client::ClientConfig;

/// Catalog root the pagination cursor starts from
pub const DEFAULT_ROOT_URL: &str = "https://books.toscrape.com/";

/// File the result sink writes to
pub const DEFAULT_OUTPUT_PATH: &str = "BooksData.json";

/// Item budget for a bounded scrape when the caller gives none
pub const DEFAULT_BUDGET: usize = 500;

/// Ceiling used by "scrape everything" runs
pub const DEFAULT_FULL_SCRAPE_BUDGET: usize = 1000;

/// Configuration for a `BookScraper`
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Absolute URL of the first listing page
    pub root_url: String,
    /// Path of the JSON artifact
    pub output_path: PathBuf,
    /// Budget used by `scrape_all`
    pub full_scrape_budget: usize,
    /// HTTP client settings
    pub client: ClientConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            root_url: DEFAULT_ROOT_URL.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            full_scrape_budget: DEFAULT_FULL_SCRAPE_BUDGET,
            client: ClientConfig::default(),
        }
    }
}
