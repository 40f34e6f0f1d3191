//! Service layer for nostalgia-yd

pub mod aggregator;
pub mod cache_store;
pub mod extractors;
pub mod identity;
pub mod rate_limiter;
pub mod source_client;

pub use aggregator::Aggregator;
pub use cache_store::{CacheStore, CacheWriteError};
pub use identity::{HeaderIdentity, Identity, IdentityProvider};
pub use rate_limiter::{Admission, SlidingWindowLimiter};
pub use source_client::{HttpSourceClient, SourceClient, SourceFetchError};
