//! JSON artifact persistence
//!
//! The sink owns a single file path. `save` overwrites it with the full
//! record set; `status` and `read_bytes` inspect it without scraping.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::error::{Result, ScrapeError};
use crate::types::{ArtifactStatus, Book};

/// Writes and inspects the scraped-books JSON artifact
#[derive(Debug, Clone)]
pub struct ResultSink {
    path: PathBuf,
}

impl ResultSink {
    /// Create a sink for the given artifact path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the artifact
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serialize `books` as pretty-printed JSON and overwrite the artifact.
    pub async fn save(&self, books: &[Book]) -> Result<()> {
        let json = serde_json::to_string_pretty(books)?;
        tokio::fs::write(&self.path, json).await?;
        info!(path = %self.path.display(), count = books.len(), "saved books");
        Ok(())
    }

    /// Report whether the artifact exists, how many records it holds and
    /// when it was last written.
    ///
    /// An unreadable or malformed artifact is logged and counted as zero
    /// records.
    pub async fn status(&self) -> ArtifactStatus {
        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return ArtifactStatus::missing(),
        };

        let last_modified = metadata.modified().ok().map(DateTime::<Utc>::from);

        let total_books_in_file = match self.load().await {
            Ok(books) => books.len(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "error reading data file");
                0
            }
        };

        ArtifactStatus {
            data_file_exists: true,
            total_books_in_file,
            last_modified,
        }
    }

    /// Read the raw artifact bytes.
    ///
    /// # Errors
    /// `ScrapeError::NotFound` if no artifact has been produced yet.
    pub async fn read_bytes(&self) -> Result<Vec<u8>> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ScrapeError::NotFound(
                "No data file found. Please run the scraper first.".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Load and decode the records currently in the artifact.
    pub async fn load(&self) -> Result<Vec<Book>> {
        let bytes = self.read_bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
