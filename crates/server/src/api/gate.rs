//! Admission gate: one token per request, or 429.

use crate::api::errors::ApiError;
use crate::api::handlers::AppState;
use crate::api::metrics;
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;

/// Tokens left after this request was admitted. Always `0` on a 429.
pub const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Consumes the oldest token before running the inner handler.
///
/// The remaining count is taken at consumption time, in the same critical
/// section as the removal, and attached to whatever the handler returns.
/// When the bucket is empty the handler is never invoked.
pub async fn admission_middleware(
    State(state): State<AppState>,
    req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<axum::response::Response, ApiError> {
    let Some(consumed) = state.bucket.try_consume() else {
        tracing::debug!(path = %req.uri().path(), "bucket empty, request rejected");
        metrics::record_rejected();
        return Err(ApiError::TooManyRequests {
            retry_after_secs: state.config.retry_after_secs(),
        });
    };

    tracing::debug!(
        token = consumed.token.issued_at_ms(),
        remaining = consumed.remaining,
        "token used"
    );
    metrics::record_admitted();

    let mut response = next.run(req).await;
    response
        .headers_mut()
        .insert(X_RATELIMIT_REMAINING, HeaderValue::from(consumed.remaining));
    Ok(response)
}
