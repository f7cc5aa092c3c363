//! Global configuration constants for tokengate.
//!
//! Bucket sizing, refill cadence and server defaults are defined here.
//! These are compile-time defaults; runtime overrides are handled via CLI
//! arguments and environment variables in the server's `main.rs`.

/// Default HTTP server port, used when neither `--port` nor `PORT` is set.
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum number of tokens held by the bucket.
pub const DEFAULT_BUCKET_CAPACITY: usize = 10;

/// Default interval (in seconds) between two refills.
///
/// Also advertised to rejected clients through the `Retry-After` header.
pub const DEFAULT_REFILL_INTERVAL_SECS: u64 = 2;

/// Upper bound accepted for the bucket capacity.
pub const MAX_BUCKET_CAPACITY: usize = 1_000_000;

/// Upper bound accepted for the refill interval (one hour).
pub const MAX_REFILL_INTERVAL_SECS: u64 = 3600;

/// Per-request timeout in seconds.
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
