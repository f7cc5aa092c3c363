//! Request and response data transfer objects for the REST API.

use serde::Serialize;
use tokengate_core::BucketSnapshot;

/// Response body for `GET /bucket`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketResponse {
    pub bucket_limit: usize,
    pub current_bucket_size: usize,
    /// Token timestamps (ms since the Unix epoch), oldest first.
    pub bucket: Vec<u64>,
}

impl From<BucketSnapshot> for BucketResponse {
    fn from(snap: BucketSnapshot) -> Self {
        Self {
            bucket_limit: snap.capacity,
            current_bucket_size: snap.size,
            bucket: snap.tokens,
        }
    }
}

/// `{success, message}` body used by the demo handler and by every error.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
