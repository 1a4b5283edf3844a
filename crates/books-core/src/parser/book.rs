//! Listing item parser
//!
//! Extracts one `Book` from an `article.product_pod` fragment of a catalog
//! listing page.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{Result, ScrapeError};
use crate::types::{Book, IN_STOCK};

use super::rating::normalize_rating;
use super::selector;

/// Item containers on a listing page
const ITEM_SELECTOR: &str = "article.product_pod";
const TITLE_LINK_SELECTOR: &str = "h3 a";
const PRICE_SELECTOR: &str = "p.price_color";
const RATING_SELECTOR: &str = "p.star-rating";
const IMAGE_SELECTOR: &str = "img";

/// Collect the item fragments of a listing page in document order.
pub fn book_fragments(document: &Html) -> Result<Vec<ElementRef<'_>>> {
    let items = selector(ITEM_SELECTOR)?;
    Ok(document.select(&items).collect())
}

/// Extract a single book from an item fragment.
///
/// Missing sub-fields fall back to empty strings (or "Not rated" for the
/// rating). Relative links are resolved against `base`.
///
/// # Errors
/// Returns `ScrapeError::InvalidUrl` if a link is present but cannot be
/// resolved. Callers treat this as a failure of this item only.
pub fn extract_book(fragment: &ElementRef, base: &Url) -> Result<Book> {
    let link_selector = selector(TITLE_LINK_SELECTOR)?;
    let link = fragment.select(&link_selector).next();

    let title = link
        .and_then(|a| a.value().attr("title"))
        .map(|t| t.trim().to_string())
        .unwrap_or_default();

    let price_selector = selector(PRICE_SELECTOR)?;
    let price = fragment
        .select(&price_selector)
        .next()
        .map(|p| p.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let rating_selector = selector(RATING_SELECTOR)?;
    let rating_hint = fragment
        .select(&rating_selector)
        .next()
        .and_then(|p| p.value().attr("class"))
        .unwrap_or("");
    let rating = normalize_rating(rating_hint).to_string();

    let product_link = resolve_optional(base, link.and_then(|a| a.value().attr("href")))?;

    let image_selector = selector(IMAGE_SELECTOR)?;
    let image_url = resolve_optional(
        base,
        fragment
            .select(&image_selector)
            .next()
            .and_then(|img| img.value().attr("src")),
    )?;

    Ok(Book {
        title,
        price,
        rating,
        stock_availability: IN_STOCK.to_string(),
        product_link,
        image_url,
    })
}

/// Resolve a reference against a base URL into an absolute URL string.
///
/// # Examples
/// ```
/// use books_core::parser::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://books.toscrape.com/").unwrap();
/// assert_eq!(
///     resolve_url(&base, "catalogue/a-light-in-the-attic_1000/index.html").unwrap(),
///     "https://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html"
/// );
/// ```
pub fn resolve_url(base: &Url, reference: &str) -> Result<String> {
    base.join(reference)
        .map(String::from)
        .map_err(|e| ScrapeError::InvalidUrl(format!("{} ({})", reference, e)))
}

/// Empty or missing references stay empty rather than resolving to `base`.
fn resolve_optional(base: &Url, reference: Option<&str>) -> Result<String> {
    match reference.map(str::trim) {
        Some(r) if !r.is_empty() => resolve_url(base, r),
        _ => Ok(String::new()),
    }
}
