//! Request gating middleware
//!
//! Three stages guard the year lookup routes, applied in this order:
//! 1. `validate_year`: the path segment must be a valid `YearKey`
//! 2. `require_identity`: the caller must present an identity
//! 3. `enforce_rate_limit`: the identity must be admitted by the limiter
//!
//! A rejection at any stage ends the request; later stages (and the handler)
//! never run. The validated `YearKey` and `Identity` are passed on as request
//! extensions.

use axum::{
    extract::{Path, Request, State},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::YearKey;
use crate::services::{Admission, Identity};
use crate::AppState;

/// Reject years that are non-numeric or outside `[MIN_YEAR, current year]`
pub async fn validate_year(
    Path(raw): Path<String>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let year = YearKey::parse(&raw).map_err(|e| {
        debug!(year = %raw, error = %e, "Rejected year");
        e
    })?;

    request.extensions_mut().insert(year);
    Ok(next.run(request).await)
}

/// Reject requests without a caller identity
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = state
        .identity
        .current_identity(request.headers())
        .ok_or(ApiError::Unauthenticated)?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Admit or deny the identity through the sliding-window limiter
pub async fn enforce_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = request
        .extensions()
        .get::<Identity>()
        .cloned()
        .ok_or(ApiError::Unauthenticated)?;

    match state.limiter.admit(identity.as_str()) {
        Admission::Allowed => Ok(next.run(request).await),
        Admission::Denied { retry_after } => {
            warn!(
                identity = %identity,
                retry_after_ms = retry_after.as_millis() as u64,
                "Rate limit exceeded"
            );
            Err(ApiError::rate_limited(retry_after))
        }
    }
}
