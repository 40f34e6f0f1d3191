//! Song-chart extractor
//!
//! Reads a year-end "Hot 100" chart listing. Titles are taken from
//! `.c-title` elements inside `.o-chart-results-list__item` rows, in document
//! order (chart rank).

use scraper::Html;

use super::{element_text, selector};
use crate::models::{YearKey, MAX_MUSIC};

const TITLE_SELECTOR: &str = ".o-chart-results-list__item .c-title";

/// First `MAX_MUSIC` non-empty titles in document order
pub fn extract(html: &str) -> Vec<String> {
    let Some(titles) = selector(TITLE_SELECTOR) else {
        return Vec::new();
    };

    Html::parse_document(html)
        .select(&titles)
        .map(element_text)
        .filter(|title| !title.is_empty())
        .take(MAX_MUSIC)
        .collect()
}

/// "Song 1 from {year}" … "Song 5 from {year}"
pub fn placeholders(year: YearKey) -> Vec<String> {
    (1..=MAX_MUSIC)
        .map(|i| format!("Song {} from {}", i, year))
        .collect()
}
