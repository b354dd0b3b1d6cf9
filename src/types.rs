//! Core types for the check-in client
//!
//! Defines the fundamental types of the flow:
//! - Booth and visitor identifiers
//! - The vote submission and its wire shape
//! - Server results and their raw wire shape
//! - Display state and geolocation options

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identifier for a physical voting location, carried in the scanned QR
/// code's URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoothId(pub String);

impl BoothId {
    /// Create a booth ID from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BoothId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Semi-stable identifier derived from device characteristics by the
/// fingerprint provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisitorId(pub String);

impl VisitorId {
    /// Create a visitor ID from any string-like value
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for VisitorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A resolved geographic fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPosition {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

/// Options for a geolocation request
///
/// Mirrors the option set the backend expects the client to use: a fresh,
/// high-accuracy fix or nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeoOptions {
    /// Request the most accurate fix available
    pub high_accuracy: bool,
    /// Give up after this long
    pub timeout: Duration,
    /// Maximum acceptable age of a cached fix
    pub maximum_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(10),
            maximum_age: Duration::ZERO,
        }
    }
}

/// One vote submission, constructed once per attempt and immutable after
/// construction.
///
/// Field names are pinned to the backend's wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct VoteSubmission {
    /// Booth being voted for
    #[serde(rename = "boothId")]
    pub booth_id: String,
    /// Device fingerprint of the voter
    #[serde(rename = "visitorId")]
    pub visitor_id: String,
    /// Latitude of the fix at submission time
    pub lat: f64,
    /// Longitude of the fix at submission time
    pub lng: f64,
    /// Epoch milliseconds at token derivation time
    pub timestamp: i64,
    /// Integrity token binding visitor, booth and timestamp
    pub token: String,
}

/// Raw response body from the vote endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RawVoteResponse {
    /// Outcome tag declared by the server
    pub result: String,
    /// Distance from the venue in meters, for out-of-area rejections
    pub distance: Option<f64>,
    /// Optional server-supplied detail for unknown results
    pub message: Option<String>,
}

/// Outcome declared by the vote endpoint
#[derive(Debug, Clone, PartialEq)]
pub enum ServerResult {
    /// Vote recorded
    Success,
    /// This device already voted
    Duplicate,
    /// Fix was outside the venue, with the measured distance in meters
    OutOfArea {
        /// Distance from the venue in meters, if the server reported one
        distance: Option<f64>,
    },
    /// Token did not verify or the request window expired
    InvalidToken,
    /// Any other tag, with the server-supplied detail if present
    Other {
        /// Server-supplied detail
        message: Option<String>,
    },
}

impl ServerResult {
    /// Map a raw response body onto the closed outcome set
    #[must_use]
    pub fn from_raw(raw: RawVoteResponse) -> Self {
        match raw.result.as_str() {
            "success" => Self::Success,
            "duplicate" => Self::Duplicate,
            "out_of_area" => Self::OutOfArea {
                distance: raw.distance,
            },
            "invalid_token" => Self::InvalidToken,
            _ => Self::Other {
                message: raw.message,
            },
        }
    }
}

/// Which screen is visible
///
/// Exactly one state holds at a time, and transitions are one-directional
/// per run: once an outcome is known the flow never returns to `Loading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// Waiting on permission, fingerprint or network
    Loading,
    /// Vote recorded
    Success,
    /// Terminal failure, message shown to the user
    Error,
}
