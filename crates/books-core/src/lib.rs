//! Books Scraper Core Library
//!
//! This crate provides the core scraping functionality for paginated book
//! catalogs such as books.toscrape.com.
//!
//! # Features
//! - Walk listing pages by following "next" links, under an item budget
//! - Extract title, price, rating and absolute links per item
//! - Keep partial results when a page fails
//! - Persist results as a pretty-printed JSON artifact

pub mod client;
pub mod config;
pub mod error;
pub mod parser;
pub mod scraper;
pub mod sink;
pub mod types;

// Re-export main types for convenience
pub use client::{BooksClient, ClientConfig};
pub use config::{ScraperConfig, DEFAULT_BUDGET, DEFAULT_FULL_SCRAPE_BUDGET, DEFAULT_OUTPUT_PATH, DEFAULT_ROOT_URL};
pub use error::{Result, ScrapeError};
pub use scraper::BookScraper;
pub use sink::ResultSink;
pub use types::{ArtifactStatus, Book, ScrapeOutcome, ScrapeStatus, IN_STOCK};
