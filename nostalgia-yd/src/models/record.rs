//! Aggregated facts for one year

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Songs kept per record
pub const MAX_MUSIC: usize = 5;
/// Events kept per record
pub const MAX_EVENTS: usize = 5;
/// Archived sites kept per record
pub const MAX_WEBSITES: usize = 3;

/// Archived snapshot link for one tracked site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub name: String,
    pub url: String,
}

/// Record construction failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("Record field '{0}' is empty")]
    EmptyField(&'static str),
}

/// Immutable snapshot of facts for one year
///
/// Every field holds at least one entry (genuine or placeholder) and at most the
/// field's limit; longer inputs are cut, empty inputs are rejected. Deserialising
/// goes through the same checks, so a malformed stored document cannot become a
/// record.
///
/// Serialises as `{"music": [...], "events": [...], "websites": [{"name", "url"}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecordDocument")]
pub struct NostalgiaRecord {
    music: Vec<String>,
    events: Vec<String>,
    websites: Vec<Website>,
}

/// Untrusted document shape before invariant checks
#[derive(Deserialize)]
struct RecordDocument {
    music: Vec<String>,
    events: Vec<String>,
    websites: Vec<Website>,
}

impl TryFrom<RecordDocument> for NostalgiaRecord {
    type Error = RecordError;

    fn try_from(doc: RecordDocument) -> Result<Self, Self::Error> {
        NostalgiaRecord::new(doc.music, doc.events, doc.websites)
    }
}

impl NostalgiaRecord {
    pub fn new(
        mut music: Vec<String>,
        mut events: Vec<String>,
        mut websites: Vec<Website>,
    ) -> Result<Self, RecordError> {
        if music.is_empty() {
            return Err(RecordError::EmptyField("music"));
        }
        if events.is_empty() {
            return Err(RecordError::EmptyField("events"));
        }
        if websites.is_empty() {
            return Err(RecordError::EmptyField("websites"));
        }

        music.truncate(MAX_MUSIC);
        events.truncate(MAX_EVENTS);
        websites.truncate(MAX_WEBSITES);

        Ok(Self {
            music,
            events,
            websites,
        })
    }

    /// Compose from extractor output that already went through fallbacks
    ///
    /// Callers guarantee every field is non-empty; only the limits are applied.
    pub(crate) fn from_extracted(
        mut music: Vec<String>,
        mut events: Vec<String>,
        mut websites: Vec<Website>,
    ) -> Self {
        debug_assert!(!music.is_empty() && !events.is_empty() && !websites.is_empty());

        music.truncate(MAX_MUSIC);
        events.truncate(MAX_EVENTS);
        websites.truncate(MAX_WEBSITES);

        Self {
            music,
            events,
            websites,
        }
    }

    pub fn music(&self) -> &[String] {
        &self.music
    }

    pub fn events(&self) -> &[String] {
        &self.events
    }

    pub fn websites(&self) -> &[Website] {
        &self.websites
    }
}
