//! HTTP API handlers for nostalgia-yd

pub mod gating;
pub mod health;
pub mod nostalgia;

pub use gating::{enforce_rate_limit, require_identity, validate_year};
pub use health::health_routes;
pub use nostalgia::get_nostalgia;

use axum::{middleware, routing::get, Router};

use crate::AppState;

/// Year lookup routes with the gating pipeline applied
///
/// `route_layer` wraps outward, so the last layer added runs first.
pub fn nostalgia_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/nostalgia/:year", get(get_nostalgia))
        .route("/get_nostalgia_data/:year", get(get_nostalgia))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            enforce_rate_limit,
        ))
        .route_layer(middleware::from_fn_with_state(state, require_identity))
        .route_layer(middleware::from_fn(validate_year))
}
