//! HTTP request handlers and shared application state.

use crate::api::errors::ApiError;
use crate::api::metrics;
use crate::api::models::{BucketResponse, MessageResponse};
use axum::extract::State;
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use rand::Rng;
use tokengate_core::{BucketConfig, BucketStore};

/// Values the demo endpoint picks from.
pub const CHOICES: [&str; 3] = ["rock 🪨", "paper 📃", "scissors ✂️"];

/// Shared application state passed to every handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub bucket: BucketStore,
    pub config: BucketConfig,
    pub prometheus_handle: PrometheusHandle,
}

impl AppState {
    /// Builds state around a fresh, empty bucket sized from `config`.
    pub fn new(config: BucketConfig, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            bucket: BucketStore::new(config.capacity),
            config,
            prometheus_handle,
        }
    }
}

/// `GET /bucket`
///
/// Not gated: reading the bucket never consumes a token.
pub async fn bucket_status(State(state): State<AppState>) -> Json<BucketResponse> {
    Json(state.bucket.snapshot().into())
}

/// `GET /test`
pub async fn demo() -> Json<MessageResponse> {
    Json(MessageResponse::ok(format!("You got {}", random_choice())))
}

fn random_choice() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..CHOICES.len());
    CHOICES[idx]
}

/// `GET /metrics`
pub async fn metrics_endpoint(State(state): State<AppState>) -> String {
    metrics::update_bucket_metrics(state.bucket.len());
    state.prometheus_handle.render()
}

/// Fallback for unmatched routes. Sits behind the gate, so it still costs a token.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_choice_covers_all_values() {
        let seen: HashSet<&str> = (0..500).map(|_| random_choice()).collect();
        assert_eq!(seen.len(), CHOICES.len());
        assert!(seen.iter().all(|c| CHOICES.contains(c)));
    }
}
