//! Error types for the books scraper
//!
//! This module defines all error types used throughout the library.
//! ScrapeError implements Serialize so boundary layers can embed it in JSON.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for books scraper operations
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// A link or base URL could not be resolved
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Reading or writing the output artifact failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The output artifact does not exist yet
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ScrapeError {
    /// Whether this error means "nothing there" rather than a fault.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ScrapeError::NotFound(_))
    }
}

/// Serialize ScrapeError as its display string
impl Serialize for ScrapeError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for books scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;
