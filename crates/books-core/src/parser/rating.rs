//! Star rating normalization
//!
//! The listing marks ratings with a class such as `star-rating Three`.

/// Label for items without a recognizable rating
pub const NOT_RATED: &str = "Not rated";

/// Ordinal words in ascending order, paired with their labels.
const RATING_LABELS: [(&str, &str); 5] = [
    ("One", "1 star"),
    ("Two", "2 stars"),
    ("Three", "3 stars"),
    ("Four", "4 stars"),
    ("Five", "5 stars"),
];

/// Map a rating class hint to a human-readable label.
///
/// Searches the hint (case-sensitive) for "One" through "Five" in that
/// order and returns the label of the first word found. Empty hints and
/// hints with no ordinal word yield `"Not rated"`.
///
/// # Examples
/// ```
/// use books_core::parser::normalize_rating;
///
/// assert_eq!(normalize_rating("star-rating Three"), "3 stars");
/// assert_eq!(normalize_rating("star-rating"), "Not rated");
/// assert_eq!(normalize_rating(""), "Not rated");
/// ```
pub fn normalize_rating(hint: &str) -> &'static str {
    if hint.is_empty() {
        return NOT_RATED;
    }

    RATING_LABELS
        .iter()
        .find(|(word, _)| hint.contains(word))
        .map(|(_, label)| *label)
        .unwrap_or(NOT_RATED)
}
