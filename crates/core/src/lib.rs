//! # tokengate-core
//!
//! Fixed-schedule token bucket: a bounded FIFO of timestamped tokens that is
//! refilled one token per tick and drained one token per admitted request.
//!
//! This is the core library crate with zero async dependencies. The HTTP
//! gate and the refill timer live in `tokengate-server`.

/// Token bucket state: tokens, capacity, refill and FIFO consumption.
pub mod bucket;
/// Global configuration constants: defaults and validation limits.
pub mod config;
/// Shared, mutex-guarded handle to the process-wide bucket.
pub mod store;

pub use bucket::{BucketConfig, BucketSnapshot, Consumed, Token, TokenBucket};
pub use store::BucketStore;
