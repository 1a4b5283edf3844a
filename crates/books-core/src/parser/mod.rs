//! HTML parsers for catalog listing pages
//!
//! This module contains the pieces that read a listing page:
//! - `book`: Extract one record per item fragment
//! - `rating`: Map star-rating classes to labels
//! - `pagination`: Find the next listing page

pub mod book;
pub mod pagination;
pub mod rating;

use scraper::Selector;

use crate::error::{Result, ScrapeError};

// Re-export main parsing functions
pub use book::{book_fragments, extract_book, resolve_url};
pub use pagination::next_page_url;
pub use rating::{normalize_rating, NOT_RATED};

/// Compile a CSS selector, mapping failures to `ParseError`.
pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}
