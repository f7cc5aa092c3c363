//! Shared handle to the process-wide token bucket.
//!
//! [`BucketStore`] is cheap to clone; every clone points at the same
//! [`TokenBucket`]. The refill timer and the request path each hold one, and
//! every read-modify-write happens under a single mutex acquisition.

use crate::bucket::{BucketSnapshot, Consumed, TokenBucket};
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe, clonable owner of the bucket state.
#[derive(Clone)]
pub struct BucketStore {
    inner: Arc<Mutex<TokenBucket>>,
    capacity: usize,
}

impl BucketStore {
    /// Creates a store around an empty bucket of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TokenBucket::new(capacity))),
            capacity,
        }
    }

    /// Adds one token stamped with the current time if below capacity.
    ///
    /// Returns the bucket size after the call and whether a token was added.
    pub fn refill(&self) -> (usize, bool) {
        let mut bucket = self.inner.lock();
        let added = bucket.refill();
        let size = bucket.len();
        drop(bucket);
        if !added {
            tracing::trace!(size, "bucket full, refill skipped");
        }
        (size, added)
    }

    /// Removes the oldest token. `None` means the bucket is exhausted.
    pub fn try_consume(&self) -> Option<Consumed> {
        self.inner.lock().try_consume()
    }

    /// Consistent copy of the bucket taken under the lock.
    pub fn snapshot(&self) -> BucketSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
