//! Check-in token derivation
//!
//! The token binds visitor, booth and timestamp to deter tampering and
//! replay: lowercase hex SHA-256 over the UTF-8 bytes of
//! `visitorId + boothId + timestamp + salt`, with the timestamp rendered in
//! decimal and no separators anywhere. The backend recomputes the digest
//! from the same formula and salt, so any change here is a protocol change.

use crate::types::{BoothId, VisitorId};
use sha2::{Digest, Sha256};

/// Derive the check-in token for one submission attempt
///
/// Pure function of its inputs: identical inputs always yield the identical
/// digest. `timestamp` is epoch milliseconds.
#[must_use]
pub fn derive(visitor_id: &VisitorId, booth_id: &BoothId, timestamp: i64, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(visitor_id.as_str().as_bytes());
    hasher.update(booth_id.as_str().as_bytes());
    hasher.update(timestamp.to_string().as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode(hasher.finalize())
}
