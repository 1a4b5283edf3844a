//! Route handlers for the scraper API

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use books_core::{ArtifactStatus, ScrapeError, ScrapeOutcome, DEFAULT_BUDGET, DEFAULT_OUTPUT_PATH};

use crate::ScraperState;

/// Query parameters for a bounded scrape
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeParams {
    pub max_books: Option<usize>,
}

/// Summary returned by both scrape routes
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResponse {
    pub status: String,
    pub total_books: usize,
    pub time_taken: String,
    pub message: String,
}

impl From<&ScrapeOutcome> for ScrapeResponse {
    fn from(outcome: &ScrapeOutcome) -> Self {
        let (status, message) = if outcome.is_success() {
            (
                "Completed".to_string(),
                format!("Successfully scraped {} books", outcome.total_scraped),
            )
        } else {
            (
                outcome.status.to_string(),
                format!("Scraped {} books before stopping", outcome.total_scraped),
            )
        };

        Self {
            status,
            total_books: outcome.total_scraped,
            time_taken: format!("{:.3}s", outcome.elapsed.as_secs_f64()),
            message,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps core errors onto HTTP responses
#[derive(Debug)]
pub struct ApiError(ScrapeError);

impl From<ScrapeError> for ApiError {
    fn from(e: ScrapeError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!(error = %self.0, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = match self.0 {
            ScrapeError::NotFound(message) => message,
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Run a bounded scrape (default budget 500).
pub async fn scrape_books(
    Extension(state): Extension<ScraperState>,
    Query(params): Query<ScrapeParams>,
) -> Json<ScrapeResponse> {
    let budget = params.max_books.unwrap_or(DEFAULT_BUDGET);
    tracing::info!(budget, "starting to scrape books");

    let scraper = state.scraper().lock().await;
    let outcome = scraper.scrape(budget).await;
    Json(ScrapeResponse::from(&outcome))
}

/// Run a scrape up to the configured ceiling.
pub async fn scrape_all_books(Extension(state): Extension<ScraperState>) -> Json<ScrapeResponse> {
    tracing::info!("starting to scrape all books");

    let scraper = state.scraper().lock().await;
    let outcome = scraper.scrape_all().await;
    Json(ScrapeResponse::from(&outcome))
}

/// Report on the saved artifact without scraping.
pub async fn get_status(Extension(state): Extension<ScraperState>) -> Json<ArtifactStatus> {
    Json(state.sink().status().await)
}

/// Return the saved artifact as a JSON download.
pub async fn download_data(Extension(state): Extension<ScraperState>) -> Result<Response, ApiError> {
    let bytes = state.sink().read_bytes().await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", DEFAULT_OUTPUT_PATH),
            ),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use books_core::{Book, ScrapeStatus, IN_STOCK};

    fn outcome(status: ScrapeStatus, n: usize) -> ScrapeOutcome {
        let books = (0..n)
            .map(|i| Book {
                title: format!("Book {}", i),
                price: "£1.00".to_string(),
                rating: "Not rated".to_string(),
                stock_availability: IN_STOCK.to_string(),
                product_link: String::new(),
                image_url: String::new(),
            })
            .collect();
        ScrapeOutcome::new(books, Duration::from_millis(2500), status)
    }

    #[test]
    fn test_response_for_success() {
        let response = ScrapeResponse::from(&outcome(ScrapeStatus::Completed, 3));
        assert_eq!(response.status, "Completed");
        assert_eq!(response.total_books, 3);
        assert_eq!(response.time_taken, "2.500s");
        assert_eq!(response.message, "Successfully scraped 3 books");
    }

    #[test]
    fn test_response_for_failure() {
        let response =
            ScrapeResponse::from(&outcome(ScrapeStatus::Failed("HTTP 503".to_string()), 1));
        assert_eq!(response.status, "error: HTTP 503");
        assert_eq!(response.total_books, 1);
        assert_eq!(response.message, "Scraped 1 books before stopping");
    }

    #[test]
    fn test_response_serializes_camel_case() {
        let json = serde_json::to_value(ScrapeResponse::from(&outcome(ScrapeStatus::Completed, 0)))
            .unwrap();
        assert!(json.get("totalBooks").is_some());
        assert!(json.get("timeTaken").is_some());
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response = ApiError(ScrapeError::NotFound("missing".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_other_errors_map_to_500() {
        let response = ApiError(ScrapeError::ParseError("bad".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
