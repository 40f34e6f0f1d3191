//! Error types for nostalgia-yd HTTP surface
//!
//! Only request-level failures appear here. Source fetch and cache write
//! failures are absorbed by the service layer and never reach a response.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::models::ValidationError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Year path segment rejected (400)
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No caller identity (401)
    #[error("Authentication required")]
    Unauthenticated,

    /// Admission denied (429)
    #[error("Rate limit exceeded. Retry in {retry_after_secs} seconds.")]
    RateLimited { retry_after_secs: u64 },
}

impl ApiError {
    /// Denial with `retry_after` rounded up to whole seconds, at least 1
    pub fn rate_limited(retry_after: Duration) -> Self {
        let mut secs = retry_after.as_secs();
        if retry_after.subsec_nanos() > 0 {
            secs += 1;
        }
        ApiError::RateLimited {
            retry_after_secs: secs.max(1),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "INVALID_YEAR",
            ApiError::Unauthenticated => "UNAUTHENTICATED",
            ApiError::RateLimited { .. } => "RATE_LIMITED",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        }));

        let mut response = (self.status(), body).into_response();
        if let ApiError::RateLimited { retry_after_secs } = self {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_retry_after_rounding() {
        assert!(matches!(
            ApiError::rate_limited(Duration::from_millis(1)),
            ApiError::RateLimited { retry_after_secs: 1 }
        ));
        assert!(matches!(
            ApiError::rate_limited(Duration::ZERO),
            ApiError::RateLimited { retry_after_secs: 1 }
        ));
        assert!(matches!(
            ApiError::rate_limited(Duration::from_secs(50)),
            ApiError::RateLimited { retry_after_secs: 50 }
        ));
        assert!(matches!(
            ApiError::rate_limited(Duration::from_millis(49_001)),
            ApiError::RateLimited { retry_after_secs: 50 }
        ));
    }

    #[tokio::test]
    async fn test_validation_response() {
        let error = ApiError::from(ValidationError::NotNumeric("abc".to_string()));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_YEAR");
        assert_eq!(
            body["error"]["message"],
            "Invalid year 'abc'. Must be a positive integer."
        );
    }

    #[tokio::test]
    async fn test_rate_limited_response_has_retry_after() {
        let response = ApiError::RateLimited { retry_after_secs: 42 }.into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(response.headers()[header::RETRY_AFTER], "42");
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "RATE_LIMITED");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::rate_limited(Duration::from_secs(3)).status(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }
}
