//! Data models for year lookups

pub mod record;
pub mod year;

pub use record::{NostalgiaRecord, RecordError, Website, MAX_EVENTS, MAX_MUSIC, MAX_WEBSITES};
pub use year::{ValidationError, YearKey, MIN_YEAR};
