//! Historical-events extractor
//!
//! Reads an encyclopedia year article. Strategies, in order:
//! 1. The first list following the element with `id="Events"`: its items.
//! 2. The article body paragraphs (`#mw-content-text p`), cut to
//!    `PARAGRAPH_CHARS` characters with `CONTINUATION` appended.
//!
//! A section that exists but yields no items falls through to paragraphs.

use scraper::{ElementRef, Html};

use super::{element_text, selector};
use crate::models::{YearKey, MAX_EVENTS};

/// Paragraph summaries are cut to this many characters
pub const PARAGRAPH_CHARS: usize = 100;

/// Appended to every paragraph summary
pub const CONTINUATION: &str = "...";

const SECTION_ANCHOR_SELECTOR: &str = r#"[id="Events"]"#;
const PARAGRAPH_SELECTOR: &str = "#mw-content-text p";

/// Up to `MAX_EVENTS` event descriptions in document order
pub fn extract(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let items = section_items(&document);
    if !items.is_empty() {
        return items;
    }

    paragraph_summaries(&document)
}

/// "Event 1 from {year}" … "Event 5 from {year}"
pub fn placeholders(year: YearKey) -> Vec<String> {
    (1..=MAX_EVENTS)
        .map(|i| format!("Event {} from {}", i, year))
        .collect()
}

fn section_items(document: &Html) -> Vec<String> {
    let (Some(anchor_selector), Some(item_selector)) =
        (selector(SECTION_ANCHOR_SELECTOR), selector("li"))
    else {
        return Vec::new();
    };
    let Some(anchor) = document.select(&anchor_selector).next() else {
        return Vec::new();
    };

    // Pre-order traversal: everything after the anchor comes after it in the
    // document, so the first <ul> found there is the section's list.
    let anchor_id = (*anchor).id();
    let list = document
        .root_element()
        .descendants()
        .skip_while(|node| node.id() != anchor_id)
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().name() == "ul");

    let Some(list) = list else {
        return Vec::new();
    };

    list.select(&item_selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(MAX_EVENTS)
        .collect()
}

fn paragraph_summaries(document: &Html) -> Vec<String> {
    let Some(paragraphs) = selector(PARAGRAPH_SELECTOR) else {
        return Vec::new();
    };

    document
        .select(&paragraphs)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .take(MAX_EVENTS)
        .map(|text| summarize(&text))
        .collect()
}

/// First `PARAGRAPH_CHARS` characters plus `CONTINUATION`
fn summarize(text: &str) -> String {
    let mut summary: String = text.chars().take(PARAGRAPH_CHARS).collect();
    summary.push_str(CONTINUATION);
    summary
}
