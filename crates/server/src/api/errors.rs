//! API error types mapped to HTTP status codes.
//!
//! Every [`ApiError`] renders the same JSON shape as the gate's rejection:
//! `{"success": false, "message": "..."}`.

use crate::api::gate::X_RATELIMIT_REMAINING;
use crate::api::models::MessageResponse;
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

/// Application-level error type that implements `IntoResponse`.
///
/// - `TooManyRequests` → 429 (with `X-RateLimit-Remaining: 0` and `Retry-After`)
/// - `NotFound` → 404
/// - `RequestTimeout` → 408
/// - `Internal` → 500
#[derive(Debug)]
pub enum ApiError {
    /// The bucket is empty (429).
    TooManyRequests { retry_after_secs: u64 },
    /// No route matched (404).
    NotFound(String),
    /// The handler did not finish in time (408).
    RequestTimeout(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::TooManyRequests { retry_after_secs } => {
                let mut resp = (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(MessageResponse::failure("Too many requests")),
                )
                    .into_response();
                let headers = resp.headers_mut();
                headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(0u64));
                headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs));
                resp
            }
            other => {
                let (status, message) = match other {
                    ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
                    ApiError::RequestTimeout(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
                    ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
                    ApiError::TooManyRequests { .. } => unreachable!(),
                };
                (status, Json(MessageResponse::failure(message))).into_response()
            }
        }
    }
}
