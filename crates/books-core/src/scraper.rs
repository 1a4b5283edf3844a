//! Main books scraper API
//!
//! This module drives a scrape run: fetch a listing page, extract every item
//! on it, follow the next-page link, and repeat until the item budget is
//! spent or pagination ends. Whatever was collected is written to the result
//! sink once the run stops, successful or not.

use std::time::Instant;

use scraper::Html;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::client::BooksClient;
use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::parser::{book_fragments, extract_book, next_page_url};
use crate::sink::ResultSink;
use crate::types::{Book, ScrapeOutcome, ScrapeStatus};

/// Step of a scrape run.
#[derive(Debug)]
enum ScrapeState {
    /// About to fetch the page at this URL
    Fetching(String),
    /// Page fetched, items not yet extracted
    Extracting { url: String, html: String },
    /// Page done; holds the next page URL if there is one
    Advancing(Option<String>),
    /// Run finished
    Done(ScrapeStatus),
}

/// Records and next link extracted from one listing page.
#[derive(Debug)]
struct PageExtract {
    books: Vec<Book>,
    next_url: Option<String>,
}

/// Main scraper API for paginated book catalogs
///
/// # Example
/// ```no_run
/// use books_core::{BookScraper, ScraperConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = BookScraper::new(ScraperConfig::default())?;
///
///     let outcome = scraper.scrape(50).await;
///     println!("{} books, {}", outcome.total_scraped, outcome.status);
///
///     Ok(())
/// }
/// ```
pub struct BookScraper {
    client: BooksClient,
    config: ScraperConfig,
    sink: ResultSink,
}

impl BookScraper {
    /// Create a new scraper, building its HTTP client from `config.client`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: ScraperConfig) -> Result<Self> {
        let client = BooksClient::with_config(config.client.clone())?;
        Ok(Self::with_client(client, config))
    }

    /// Create a new scraper with a pre-built client.
    pub fn with_client(client: BooksClient, config: ScraperConfig) -> Self {
        let sink = ResultSink::new(config.output_path.clone());
        Self {
            client,
            config,
            sink,
        }
    }

    /// The scraper's configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// The sink this scraper writes to
    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }

    /// Scrape at most `budget` books, starting from the catalog root.
    ///
    /// Never fails: fetch, parse and persistence errors end the run and are
    /// recorded in the outcome's status, with all records collected so far
    /// kept and saved.
    pub async fn scrape(&self, budget: usize) -> ScrapeOutcome {
        let start = Instant::now();
        let mut books = Vec::new();

        info!(budget, root = %self.config.root_url, "starting scrape");
        let mut status = self.run(budget, &mut books).await;

        if let Err(e) = self.sink.save(&books).await {
            error!(error = %e, "failed to save scraped books");
            if status == ScrapeStatus::Completed {
                status = ScrapeStatus::Failed(e.to_string());
            }
        }

        let outcome = ScrapeOutcome::new(books, start.elapsed(), status);
        info!(
            total = outcome.total_scraped,
            elapsed_ms = outcome.elapsed.as_millis() as u64,
            status = %outcome.status,
            "scrape finished"
        );
        outcome
    }

    /// Scrape up to the configured full-scrape ceiling.
    pub async fn scrape_all(&self) -> ScrapeOutcome {
        self.scrape(self.config.full_scrape_budget).await
    }

    /// Drive the fetch/extract/advance loop, appending to `books`.
    async fn run(&self, budget: usize, books: &mut Vec<Book>) -> ScrapeStatus {
        let root = match parse_url(&self.config.root_url) {
            Ok(root) => root,
            Err(e) => {
                error!(error = %e, "invalid catalog root");
                return ScrapeStatus::Failed(e.to_string());
            }
        };

        let mut state = if budget == 0 {
            ScrapeState::Advancing(None)
        } else {
            ScrapeState::Fetching(self.config.root_url.clone())
        };

        loop {
            state = match state {
                ScrapeState::Fetching(url) => {
                    info!(url = %url, "scraping page");
                    match self.client.fetch(&url).await {
                        Ok(html) => ScrapeState::Extracting { url, html },
                        Err(e) => {
                            error!(url = %url, error = %e, "stopping scrape");
                            ScrapeState::Done(ScrapeStatus::Failed(e.to_string()))
                        }
                    }
                }
                ScrapeState::Extracting { url, html } => {
                    let remaining = budget - books.len();
                    match extract_page(&html, &url, &root, remaining) {
                        Ok(page) => {
                            books.extend(page.books);
                            info!(scraped = books.len(), "scraped books so far");
                            ScrapeState::Advancing(page.next_url)
                        }
                        Err(e) => {
                            error!(url = %url, error = %e, "stopping scrape");
                            ScrapeState::Done(ScrapeStatus::Failed(e.to_string()))
                        }
                    }
                }
                ScrapeState::Advancing(Some(next)) if books.len() < budget => {
                    debug!(next = %next, "following next page");
                    ScrapeState::Fetching(next)
                }
                ScrapeState::Advancing(_) => ScrapeState::Done(ScrapeStatus::Completed),
                ScrapeState::Done(status) => return status,
            };
        }
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|e| ScrapeError::InvalidUrl(format!("{} ({})", url, e)))
}

/// Extract up to `remaining` books from one page, plus its next-page link.
///
/// Item links resolve against the catalog `root`; the next-page link
/// resolves against the page's own `url`. Items that fail extraction are
/// skipped and do not count against `remaining`. A page without any item
/// containers has no next page.
fn extract_page(html: &str, url: &str, root: &Url, remaining: usize) -> Result<PageExtract> {
    let current = parse_url(url)?;
    let document = Html::parse_document(html);

    let fragments = book_fragments(&document)?;
    if fragments.is_empty() {
        warn!(url, "no items on page");
        return Ok(PageExtract {
            books: Vec::new(),
            next_url: None,
        });
    }

    let mut books = Vec::new();
    for fragment in &fragments {
        if books.len() >= remaining {
            break;
        }
        match extract_book(fragment, root) {
            Ok(book) => books.push(book),
            Err(e) => warn!(url, error = %e, "skipping item"),
        }
    }

    let next_url = next_page_url(&document, &current)?;
    Ok(PageExtract { books, next_url })
}
