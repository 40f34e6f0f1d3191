//! Year lookup endpoint
//!
//! Cache-aside: a cached record is returned as is; on a miss the year is
//! aggregated from the live sources, cached, and returned. A failed cache write
//! still returns the fresh record.

use axum::{extract::State, Extension, Json};
use tracing::{debug, info, warn};

use crate::models::{NostalgiaRecord, YearKey};
use crate::AppState;

/// GET /nostalgia/:year (and the legacy GET /get_nostalgia_data/:year)
///
/// Runs behind the gating middleware, which supplies the validated year.
pub async fn get_nostalgia(
    State(state): State<AppState>,
    Extension(year): Extension<YearKey>,
) -> Json<NostalgiaRecord> {
    if let Some(record) = state.cache.lookup(year).await {
        debug!(year = %year, "Cache hit");
        return Json(record);
    }

    info!(year = %year, "Cache miss, aggregating from sources");
    let record = state.aggregator.aggregate(year).await;

    if let Err(e) = state.cache.upsert(year, &record).await {
        warn!(year = %year, error = %e, "Cache write failed, serving uncached record");
    }

    Json(record)
}
