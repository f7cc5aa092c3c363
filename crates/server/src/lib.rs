//! tokengate-server — HTTP request gate for tokengate.
//!
//! Provides the REST API, the admission middleware and the refill timer.
//! Bucket state and its invariants live in `tokengate-core`.

/// REST API layer: Axum router, admission gate, handlers, models, metrics.
pub mod api;
/// `RUST_LOG`-driven log filter and subscriber setup.
pub mod logging;
/// Fixed-cadence refill timer.
pub mod scheduler;
