//! Fixed-schedule token bucket.
//!
//! Unlike a continuously refilling bucket, tokens here are discrete values:
//! each one records the wall-clock time (ms since the Unix epoch) at which it
//! was added. Refills append to the back, consumption pops from the front, so
//! tokens always leave in the order they arrived.

use crate::config;
use std::collections::VecDeque;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A single available token, stamped with the time it was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    issued_at_ms: u64,
}

impl Token {
    /// Creates a token issued at the given Unix timestamp in milliseconds.
    pub fn new(issued_at_ms: u64) -> Self {
        Self { issued_at_ms }
    }

    /// Unix timestamp (ms) at which the token was added to the bucket.
    pub fn issued_at_ms(&self) -> u64 {
        self.issued_at_ms
    }
}

/// Result of a successful [`TokenBucket::try_consume`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consumed {
    /// The oldest token, now removed from the bucket.
    pub token: Token,
    /// Tokens left in the bucket after the removal.
    pub remaining: usize,
}

/// Point-in-time view of a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BucketSnapshot {
    pub capacity: usize,
    pub size: usize,
    /// Token timestamps, oldest first.
    pub tokens: Vec<u64>,
}

/// Bucket sizing and refill cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketConfig {
    pub capacity: usize,
    pub refill_interval: Duration,
}

impl BucketConfig {
    /// Validates and builds a config from a capacity and an interval in whole seconds.
    pub fn new(capacity: usize, refill_interval_secs: u64) -> Result<Self, String> {
        if capacity == 0 || capacity > config::MAX_BUCKET_CAPACITY {
            return Err(format!(
                "bucket capacity must be 1-{}, got {}",
                config::MAX_BUCKET_CAPACITY,
                capacity
            ));
        }
        if refill_interval_secs == 0 || refill_interval_secs > config::MAX_REFILL_INTERVAL_SECS {
            return Err(format!(
                "refill interval must be 1-{} seconds, got {}",
                config::MAX_REFILL_INTERVAL_SECS,
                refill_interval_secs
            ));
        }
        Ok(Self {
            capacity,
            refill_interval: Duration::from_secs(refill_interval_secs),
        })
    }

    /// Seconds a rejected client should wait before retrying: one refill period.
    pub fn retry_after_secs(&self) -> u64 {
        self.refill_interval.as_secs().max(1)
    }
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            capacity: config::DEFAULT_BUCKET_CAPACITY,
            refill_interval: Duration::from_secs(config::DEFAULT_REFILL_INTERVAL_SECS),
        }
    }
}

/// A bounded FIFO of timestamped tokens.
///
/// Invariant: `0 <= len() <= capacity()`. The bucket starts empty.
#[derive(Debug)]
pub struct TokenBucket {
    capacity: usize,
    tokens: VecDeque<Token>,
}

impl TokenBucket {
    /// Creates an empty bucket holding at most `capacity` tokens.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            tokens: VecDeque::new(),
        }
    }

    /// Adds one token stamped with the current time.
    ///
    /// Returns `false` (and changes nothing) if the bucket is already full.
    pub fn refill(&mut self) -> bool {
        self.refill_at(now_ms())
    }

    /// Adds one token stamped with `issued_at_ms`, unless the bucket is full.
    pub fn refill_at(&mut self, issued_at_ms: u64) -> bool {
        if self.tokens.len() >= self.capacity {
            return false;
        }
        self.tokens.push_back(Token::new(issued_at_ms));
        true
    }

    /// Removes and returns the oldest token, or `None` if the bucket is empty.
    pub fn try_consume(&mut self) -> Option<Consumed> {
        let token = self.tokens.pop_front()?;
        Some(Consumed {
            token,
            remaining: self.tokens.len(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Copies the current state out of the bucket.
    pub fn snapshot(&self) -> BucketSnapshot {
        BucketSnapshot {
            capacity: self.capacity,
            size: self.tokens.len(),
            tokens: self.tokens.iter().map(Token::issued_at_ms).collect(),
        }
    }
}

/// Milliseconds since the Unix epoch, or 0 if the system clock is before it.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
