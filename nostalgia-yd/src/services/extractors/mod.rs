//! Source extractors
//!
//! Each extractor turns one raw third-party payload into a bounded, ordered list
//! of facts. Extraction is pure and total: a payload without the expected
//! structure yields an empty result, never an error. Every structural
//! assumption about external markup lives here so it can change without touching
//! the aggregator or the cache.
//!
//! # Extractors
//! 1. **song_chart** - year-end chart page → song titles
//! 2. **historical_events** - encyclopedia year article → event descriptions
//! 3. **archived_snapshot** - availability API response → snapshot URL
//!
//! Each module also owns the deterministic fallback used when extraction
//! yields nothing.

pub mod archived_snapshot;
pub mod historical_events;
pub mod song_chart;

use scraper::{ElementRef, Selector};

/// Parse a constant CSS selector
///
/// `None` only if the selector literal itself is malformed, which callers treat
/// as "no matches".
fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

/// Visible text of an element with whitespace collapsed to single spaces
fn element_text(element: ElementRef<'_>) -> String {
    let raw: String = element.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
