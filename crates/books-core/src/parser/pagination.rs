//! Next-page discovery for catalog listings

use scraper::Html;
use url::Url;

use crate::error::Result;

use super::book::resolve_url;
use super::selector;

const NEXT_LINK_SELECTOR: &str = "li.next a";

/// Find the absolute URL of the next listing page.
///
/// The `li.next a` link is resolved against `current`, the URL the page was
/// fetched from. Returns `Ok(None)` when the page has no next link, or when
/// the link has no usable `href`.
pub fn next_page_url(document: &Html, current: &Url) -> Result<Option<String>> {
    let next_selector = selector(NEXT_LINK_SELECTOR)?;

    let href = document
        .select(&next_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty());

    match href {
        Some(href) => resolve_url(current, href).map(Some),
        None => Ok(None),
    }
}
