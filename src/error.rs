//! Error types for the check-in flow
//!
//! Provides the full failure taxonomy of a run:
//! - Local short-circuits (bot trap, missing booth ID)
//! - Platform failures (geolocation, fingerprint)
//! - Transport failures (network, non-OK status, malformed body)
//! - Server-declared rejections (duplicate, out of area, invalid token)
//!
//! Every error terminates the run; nothing is retried automatically. All of
//! them render on the single error screen, differentiated only by the text
//! from [`CheckinError::user_message`].

use crate::types::ServerResult;

/// Generic text for failures the user can only fix by retrying elsewhere
const COMMUNICATION_ERROR: &str =
    "A communication error occurred. Please try again in an area with better signal.";

/// Main check-in error type
#[derive(Debug, thiserror::Error)]
pub enum CheckinError {
    /// Honey-pot value was non-empty
    #[error("honey-pot value present, treating request as automated")]
    BotDetected,

    /// Scanned URL carried no `booth` query parameter
    #[error("no booth ID in scanned URL")]
    MissingBoothId,

    /// Geolocation failed
    #[error("geolocation failed: {0}")]
    Location(#[from] LocationError),

    /// Fingerprint provider failed
    #[error("fingerprint failed: {0}")]
    Fingerprint(#[from] FingerprintError),

    /// Request never produced a response
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Submission could not be encoded
    #[error("failed to encode submission: {0}")]
    Encode(#[from] serde_json::Error),

    /// Endpoint answered with a non-OK status
    #[error("vote endpoint returned HTTP {status}")]
    HttpStatus {
        /// Status code of the response
        status: u16,
    },

    /// Response body was not valid JSON or lacked the `result` field
    ///
    /// Kept distinct from [`CheckinError::ServerError`] so logs can tell a
    /// broken body apart from a server-declared unknown result.
    #[error("malformed response body: {0}")]
    MalformedResponse(String),

    /// Server rejected the vote: this device already voted
    #[error("server rejected vote: duplicate device")]
    Duplicate,

    /// Server rejected the vote: fix was outside the venue
    #[error("server rejected vote: out of area")]
    OutOfArea {
        /// Distance from the venue in meters, if reported
        distance: Option<f64>,
    },

    /// Server rejected the vote: token did not verify
    #[error("server rejected vote: invalid token")]
    InvalidToken,

    /// Server declared an unknown result
    #[error("server error: {}", .message.as_deref().unwrap_or("unknown"))]
    ServerError {
        /// Server-supplied detail
        message: Option<String>,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl CheckinError {
    /// Map a server-declared rejection onto an error
    ///
    /// `ServerResult::Success` is not an error; callers dispatch it before
    /// reaching here.
    #[must_use]
    pub fn from_rejection(result: ServerResult) -> Self {
        match result {
            ServerResult::Success => Self::ServerError {
                message: Some("success treated as rejection".to_string()),
            },
            ServerResult::Duplicate => Self::Duplicate,
            ServerResult::OutOfArea { distance } => Self::OutOfArea { distance },
            ServerResult::InvalidToken => Self::InvalidToken,
            ServerResult::Other { message } => Self::ServerError { message },
        }
    }

    /// Whether the failure was declared by the server rather than produced
    /// locally
    #[inline]
    #[must_use]
    pub fn is_server_rejection(&self) -> bool {
        matches!(
            self,
            Self::Duplicate | Self::OutOfArea { .. } | Self::InvalidToken | Self::ServerError { .. }
        )
    }

    /// Whether the run short-circuited before any platform or network call
    #[inline]
    #[must_use]
    pub fn is_local_short_circuit(&self) -> bool {
        matches!(self, Self::BotDetected | Self::MissingBoothId)
    }

    /// The text shown on the error screen for this failure
    ///
    /// Permission denial and the server rejections keep their own
    /// instructive texts; everything else collapses into one generic
    /// communication-error message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::BotDetected => "Invalid access detected.".to_string(),
            Self::MissingBoothId => {
                "Could not read the QR code. No booth ID was found.".to_string()
            }
            Self::Location(LocationError::PermissionDenied) => {
                "Location access is not allowed. Please turn on location services in your device settings."
                    .to_string()
            }
            Self::Duplicate => {
                "This device has already voted. Re-voting is not allowed to prevent fraud."
                    .to_string()
            }
            Self::OutOfArea { distance } => match distance {
                Some(meters) => format!(
                    "Voting is only possible from inside the event venue. (off by approx. {}m)",
                    meters.round() as i64
                ),
                None => "Voting is only possible from inside the event venue.".to_string(),
            },
            Self::InvalidToken => {
                "The session has expired or the request was invalid. Please scan the QR code again."
                    .to_string()
            }
            Self::ServerError { message } => format!(
                "A system error occurred: {}",
                message.as_deref().unwrap_or("unknown error")
            ),
            Self::MalformedResponse(_) => {
                "A system error occurred: unknown error".to_string()
            }
            Self::Location(_)
            | Self::Fingerprint(_)
            | Self::Network(_)
            | Self::Encode(_)
            | Self::HttpStatus { .. }
            | Self::Config(_) => COMMUNICATION_ERROR.to_string(),
        }
    }
}

/// Geolocation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    /// User or platform denied the location request
    #[error("permission denied")]
    PermissionDenied,

    /// No fix could be produced
    #[error("position unavailable: {0}")]
    Unavailable(String),

    /// No fix arrived inside the configured timeout
    #[error("timed out waiting for a fix")]
    Timeout,
}

/// Fingerprint provider failure
///
/// No outcome of its own on the error screen; it folds into the generic
/// communication text like any other unclassified failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct FingerprintError(pub String);

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was absent
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// A setting could not be parsed
    #[error("invalid value for {key}: {value}")]
    Invalid {
        /// Setting name
        key: &'static str,
        /// Offending value
        value: String,
    },
}
