//! Year-data aggregator
//!
//! Runs the three source lookups for one year concurrently and composes their
//! results into a `NostalgiaRecord`. Source failures never escape: a failed or
//! timed-out fetch is logged and the extractor's fallback takes its place, so
//! `aggregate` always returns a fully populated record.

use futures::future::join_all;
use nostalgia_common::Error;
use std::sync::Arc;
use tracing::{debug, warn};

use super::extractors::{archived_snapshot, historical_events, song_chart};
use super::source_client::{fetch_bounded, SourceClient};
use crate::config::{SourceConfig, TrackedSite};
use crate::models::{NostalgiaRecord, Website, YearKey};

/// Orchestrates the source extractors for one year
pub struct Aggregator {
    client: Arc<dyn SourceClient>,
    sources: SourceConfig,
}

impl Aggregator {
    /// Fails if no tracked site is configured (the websites field could never
    /// be populated).
    pub fn new(client: Arc<dyn SourceClient>, sources: SourceConfig) -> nostalgia_common::Result<Self> {
        if sources.sites.is_empty() {
            return Err(Error::Config(
                "At least one tracked site is required".to_string(),
            ));
        }
        Ok(Self { client, sources })
    }

    pub async fn aggregate(&self, year: YearKey) -> NostalgiaRecord {
        let (music, events, websites) =
            tokio::join!(self.music(year), self.events(year), self.websites(year));

        debug!(
            year = %year,
            music = music.len(),
            events = events.len(),
            websites = websites.len(),
            "Aggregated year data"
        );

        NostalgiaRecord::from_extracted(music, events, websites)
    }

    /// Chart titles, or "Song i from {year}" placeholders
    pub async fn music(&self, year: YearKey) -> Vec<String> {
        let url = self.sources.chart_url_for(year);
        let songs = match fetch_bounded(self.client.as_ref(), &url, self.sources.page_timeout()).await
        {
            Ok(body) => song_chart::extract(&body),
            Err(e) => {
                warn!(year = %year, source = "song_chart", error = %e, "Source fetch failed");
                Vec::new()
            }
        };

        if songs.is_empty() {
            debug!(year = %year, "No chart titles found, using placeholders");
            return song_chart::placeholders(year);
        }
        songs
    }

    /// Article events, or "Event i from {year}" placeholders
    pub async fn events(&self, year: YearKey) -> Vec<String> {
        let url = self.sources.article_url_for(year);
        let events =
            match fetch_bounded(self.client.as_ref(), &url, self.sources.page_timeout()).await {
                Ok(body) => historical_events::extract(&body),
                Err(e) => {
                    warn!(year = %year, source = "historical_events", error = %e, "Source fetch failed");
                    Vec::new()
                }
            };

        if events.is_empty() {
            debug!(year = %year, "No events found, using placeholders");
            return historical_events::placeholders(year);
        }
        events
    }

    /// One entry per tracked site, in configured order
    ///
    /// Sites are looked up concurrently and independently.
    pub async fn websites(&self, year: YearKey) -> Vec<Website> {
        join_all(
            self.sources
                .sites
                .iter()
                .map(|site| self.website(site, year)),
        )
        .await
    }

    async fn website(&self, site: &TrackedSite, year: YearKey) -> Website {
        let snapshot = match archived_snapshot::availability_url(
            &self.sources.availability_url,
            &site.url,
            year,
        ) {
            Some(url) => {
                match fetch_bounded(self.client.as_ref(), &url, self.sources.snapshot_timeout())
                    .await
                {
                    Ok(body) => archived_snapshot::extract(&body),
                    Err(e) => {
                        warn!(year = %year, site = %site.name, error = %e, "Snapshot lookup failed");
                        None
                    }
                }
            }
            None => {
                warn!(base = %self.sources.availability_url, "Invalid availability URL");
                None
            }
        };

        Website {
            name: site.name.clone(),
            url: snapshot.unwrap_or_else(|| archived_snapshot::fallback_url(&site.url, year)),
        }
    }
}
