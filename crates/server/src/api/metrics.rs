//! Prometheus metrics recording.

use metrics::{counter, gauge, histogram};
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a request let through by the gate.
pub fn record_admitted() {
    counter!("tokengate_admitted_total").increment(1);
}

/// Records a request turned away with 429.
pub fn record_rejected() {
    counter!("tokengate_rejected_total").increment(1);
}

/// Records a scheduler tick that added a token.
pub fn record_refill() {
    counter!("tokengate_refills_total").increment(1);
}

/// Sets `tokengate_bucket_tokens`. Called at scrape time with a size read
/// under the bucket lock, so the gauge never lags the bucket.
pub fn update_bucket_metrics(size: usize) {
    gauge!("tokengate_bucket_tokens").set(size as f64);
}
