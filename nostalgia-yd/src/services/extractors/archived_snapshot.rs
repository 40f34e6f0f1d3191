//! Archived-snapshot extractor
//!
//! Reads a Wayback Machine availability response:
//!
//! ```json
//! {"archived_snapshots": {"closest": {"available": true, "url": "http://web.archive.org/web/...", "timestamp": "..."}}}
//! ```
//!
//! An empty `archived_snapshots` object means no snapshot exists.

use chrono::NaiveDate;
use reqwest::Url;
use serde::Deserialize;

use crate::models::YearKey;

/// Wildcard archive listing used when no snapshot can be resolved
const ARCHIVE_BROWSE_URL: &str = "https://web.archive.org/web";

#[derive(Debug, Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    archived_snapshots: Option<ArchivedSnapshots>,
}

#[derive(Debug, Deserialize)]
struct ArchivedSnapshots {
    #[serde(default)]
    closest: Option<ClosestSnapshot>,
}

#[derive(Debug, Deserialize)]
struct ClosestSnapshot {
    #[serde(default)]
    available: Option<bool>,
    #[serde(default)]
    url: Option<String>,
}

/// Snapshot URL from an availability response, if one is resolvable
pub fn extract(payload: &str) -> Option<String> {
    let response: AvailabilityResponse = serde_json::from_str(payload).ok()?;
    let closest = response.archived_snapshots?.closest?;

    if closest.available == Some(false) {
        return None;
    }

    closest
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
}

/// `YYYYMMDDhhmmss` for January 1st, 00:00:00 of `year`
pub fn snapshot_timestamp(year: YearKey) -> String {
    NaiveDate::from_ymd_opt(year.value(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.format("%Y%m%d%H%M%S").to_string())
        .unwrap_or_else(|| format!("{:04}0101000000", year.value()))
}

/// Availability query for one site, or `None` if `base` is not a valid URL
pub fn availability_url(base: &str, site_url: &str, year: YearKey) -> Option<String> {
    Url::parse_with_params(
        base,
        &[("url", site_url), ("timestamp", snapshot_timestamp(year).as_str())],
    )
    .ok()
    .map(String::from)
}

/// Deterministic wildcard archive query for `site_url` around `year`
pub fn fallback_url(site_url: &str, year: YearKey) -> String {
    format!("{}/{}0101*/{}", ARCHIVE_BROWSE_URL, year, site_url)
}
