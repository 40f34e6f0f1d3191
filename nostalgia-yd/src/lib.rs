//! nostalgia-yd library - year data service
//!
//! Serves a "snapshot of the past" for a calendar year: top songs, notable
//! events, and archived front pages of well-known sites. Results are aggregated
//! from third-party sources on first request and cached per year.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use crate::error::ApiError;

use axum::Router;
use chrono::{DateTime, Utc};
use nostalgia_common::DocumentStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServiceConfig;
use crate::services::{
    Aggregator, CacheStore, HeaderIdentity, IdentityProvider, SlidingWindowLimiter, SourceClient,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<CacheStore>,
    pub limiter: Arc<SlidingWindowLimiter>,
    pub aggregator: Arc<Aggregator>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        cache: CacheStore,
        limiter: SlidingWindowLimiter,
        aggregator: Aggregator,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            limiter: Arc::new(limiter),
            aggregator: Arc::new(aggregator),
            identity,
            startup_time: Utc::now(),
        }
    }

    /// Wire the service components from configuration
    pub fn from_config(
        config: &ServiceConfig,
        store: Arc<dyn DocumentStore>,
        client: Arc<dyn SourceClient>,
    ) -> nostalgia_common::Result<Self> {
        Ok(Self::new(
            CacheStore::new(store),
            SlidingWindowLimiter::from_config(&config.rate_limit),
            Aggregator::new(client, config.sources.clone())?,
            Arc::new(HeaderIdentity::from_config(&config.identity)?),
        ))
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::nostalgia_routes(state.clone()))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
