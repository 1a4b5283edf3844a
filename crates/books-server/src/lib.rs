//! Books Scraper HTTP Service
//!
//! This crate exposes the books scraper over HTTP with axum.
//!
//! # Usage
//!
//! ```rust,no_run
//! use books_core::ScraperConfig;
//! use books_server::{build_app, ScraperState};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let state = ScraperState::new(ScraperConfig::default())?;
//! let app = build_app(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Routes
//! - `POST /api/scraper/scrape?maxBooks=N` - Bounded scrape
//! - `POST /api/scraper/scrape-all` - Scrape up to the configured ceiling
//! - `GET /api/scraper/status` - Inspect the saved artifact
//! - `GET /api/scraper/download` - Download the saved artifact

pub mod config;
pub mod routes;

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use books_core::{BookScraper, ResultSink, ScraperConfig};

pub use config::Config;

/// Shared state for the route handlers.
///
/// The scraper sits behind a mutex so only one scrape runs at a time. The
/// sink is cloned out so status and download never wait on a running scrape.
#[derive(Clone)]
pub struct ScraperState {
    scraper: Arc<Mutex<BookScraper>>,
    sink: ResultSink,
}

impl ScraperState {
    /// Create state around a new scraper.
    ///
    /// # Errors
    /// Returns an error if the scraper's HTTP client cannot be created.
    pub fn new(config: ScraperConfig) -> books_core::Result<Self> {
        Ok(Self::from_scraper(BookScraper::new(config)?))
    }

    /// Create state around an existing scraper.
    pub fn from_scraper(scraper: BookScraper) -> Self {
        let sink = scraper.sink().clone();
        Self {
            scraper: Arc::new(Mutex::new(scraper)),
            sink,
        }
    }

    /// Get a reference to the inner scraper.
    pub fn scraper(&self) -> &Arc<Mutex<BookScraper>> {
        &self.scraper
    }

    /// Get the artifact sink.
    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }
}

/// Build the axum router for the scraper API.
pub fn build_app(state: ScraperState) -> Router {
    Router::new()
        .route("/api/scraper/scrape", post(routes::scrape_books))
        .route("/api/scraper/scrape-all", post(routes::scrape_all_books))
        .route("/api/scraper/status", get(routes::get_status))
        .route("/api/scraper/download", get(routes::download_data))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
}
