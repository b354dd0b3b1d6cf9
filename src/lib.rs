//! Booth check-in client
//!
//! Client-side check-in flow for an event-booth voting system:
//! - Reads the booth identifier from a scanned QR code's URL
//! - Resolves the visitor's position and device fingerprint
//! - Derives a replay-resistant SHA-256 token
//! - Submits one vote to the tallying endpoint and renders the outcome
//!
//! The flow is a single linear async pipeline behind trait seams for the
//! platform services ([`platform::LocationProvider`],
//! [`platform::FingerprintProvider`]) and the transport
//! ([`gateway::VoteGateway`]), so everything above the seams is testable
//! without a device or a network.
//!
//! # Example
//!
//! ```rust,ignore
//! use booth_checkin::prelude::*;
//!
//! # async fn example() {
//! let config = CheckinConfig::from_env().unwrap();
//! let gateway = HttpVoteGateway::new(config.api_url.clone());
//! let controller =
//!     CheckinController::new(config, FixedLocation::at(35.68, 139.76), HostFingerprint::new(), gateway);
//!
//! let mut screen = TerminalScreen::default();
//! let request = CheckinRequest::new("https://vote.example.com/c?booth=booth-7");
//! let state = controller.run(&request, &mut screen).await;
//! # let _ = state;
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod platform;
pub mod query;
pub mod screen;
pub mod token;
pub mod types;

// Re-exports for convenience
pub use config::CheckinConfig;
pub use controller::{CheckinController, CheckinRequest};
pub use error::{CheckinError, ConfigError, FingerprintError, LocationError};
pub use gateway::{HttpVoteGateway, VoteGateway};
pub use platform::{FingerprintProvider, FixedLocation, HostFingerprint, LocationProvider};
pub use screen::{ScreenSink, TerminalScreen};
pub use types::{
    BoothId, DisplayState, GeoOptions, GeoPosition, ServerResult, VisitorId, VoteSubmission,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running the check-in flow
    pub use crate::{
        CheckinConfig, CheckinController, CheckinError, CheckinRequest, DisplayState,
        FixedLocation, HostFingerprint, HttpVoteGateway, ScreenSink, TerminalScreen,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
