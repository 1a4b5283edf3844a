//! Data types for the books scraper
//!
//! This module contains the core data structures used throughout the library.
//! Records serialize with lower-camel-case field names, matching the
//! persisted artifact format.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Availability marker written for every record.
///
/// The listing markup is not consulted for stock state.
pub const IN_STOCK: &str = "In stock";

/// One catalog entry scraped from a listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Title from the link's `title` attribute, empty if missing
    pub title: String,
    /// Price text exactly as displayed (e.g. "£51.77")
    pub price: String,
    /// One of the labels produced by `normalize_rating`
    pub rating: String,
    /// Availability text, currently always `IN_STOCK`
    pub stock_availability: String,
    /// Absolute product page URL, empty if the item had no link
    pub product_link: String,
    /// Absolute cover image URL, empty if the item had no image
    pub image_url: String,
}

/// How a scrape run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScrapeStatus {
    /// Pagination ended or the budget was reached
    Completed,
    /// The run stopped early; the detail describes the failure
    Failed(String),
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeStatus::Completed => write!(f, "success"),
            ScrapeStatus::Failed(detail) => write!(f, "error: {}", detail),
        }
    }
}

impl Serialize for ScrapeStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Aggregate result of one scrape run
///
/// Returned whether or not the run failed; `books` always holds everything
/// collected before the run stopped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeOutcome {
    /// Records in discovery order
    pub books: Vec<Book>,
    /// Number of records in `books`
    pub total_scraped: usize,
    /// Wall-clock duration of the run
    #[serde(serialize_with = "serialize_duration_secs")]
    pub elapsed: Duration,
    /// Completion status
    pub status: ScrapeStatus,
}

impl ScrapeOutcome {
    /// Build an outcome, deriving the count from the records
    pub fn new(books: Vec<Book>, elapsed: Duration, status: ScrapeStatus) -> Self {
        Self {
            total_scraped: books.len(),
            books,
            elapsed,
            status,
        }
    }

    /// Whether the run completed without a run-level error
    pub fn is_success(&self) -> bool {
        self.status == ScrapeStatus::Completed
    }
}

fn serialize_duration_secs<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Snapshot of the persisted artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactStatus {
    /// Whether the artifact file exists
    pub data_file_exists: bool,
    /// Records in the artifact, zero if missing or unreadable
    pub total_books_in_file: usize,
    /// Last modification time, if the file exists
    pub last_modified: Option<DateTime<Utc>>,
}

impl ArtifactStatus {
    /// Status for an artifact that has not been produced yet
    pub fn missing() -> Self {
        Self {
            data_file_exists: false,
            total_books_in_file: 0,
            last_modified: None,
        }
    }
}
