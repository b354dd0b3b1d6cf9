//! Runtime configuration
//!
//! Endpoint URL, digest salt and timings are injected at startup
//! (environment or CLI) rather than baked into the binary.

use crate::error::ConfigError;
use std::env;
use std::time::Duration;
use tracing::info;

/// Environment variable carrying the vote endpoint URL
pub const ENV_API_URL: &str = "CHECKIN_API_URL";
/// Environment variable carrying the digest salt
pub const ENV_SALT: &str = "CHECKIN_SALT";
/// Environment variable overriding the cosmetic pre-submit delay (ms)
pub const ENV_SUBMIT_DELAY_MS: &str = "CHECKIN_SUBMIT_DELAY_MS";
/// Environment variable overriding the geolocation timeout (ms)
pub const ENV_LOCATION_TIMEOUT_MS: &str = "CHECKIN_LOCATION_TIMEOUT_MS";

const DEFAULT_SUBMIT_DELAY_MS: u64 = 1500;
const DEFAULT_LOCATION_TIMEOUT_MS: u64 = 10_000;

/// Check-in client configuration
///
/// The salt must match the backend's exactly, since both sides derive the
/// same digest. It ships inside client-side configuration, so treat it as
/// tamper deterrence only, never as a secret: anyone holding the client can
/// read it.
#[derive(Debug, Clone)]
pub struct CheckinConfig {
    /// Vote endpoint URL
    pub api_url: String,
    /// Shared digest salt (must match the backend)
    pub salt: String,
    /// Cosmetic pause before submission, lets the loading screen play
    pub submit_delay: Duration,
    /// How long to wait for a geolocation fix
    pub location_timeout: Duration,
}

impl CheckinConfig {
    /// Create a configuration from explicit values, with default timings
    #[inline]
    #[must_use]
    pub fn new(api_url: impl Into<String>, salt: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            salt: salt.into(),
            submit_delay: Duration::from_millis(DEFAULT_SUBMIT_DELAY_MS),
            location_timeout: Duration::from_millis(DEFAULT_LOCATION_TIMEOUT_MS),
        }
    }

    /// Load configuration from the environment
    ///
    /// `CHECKIN_API_URL` and `CHECKIN_SALT` are required; the timing
    /// overrides fall back to their defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = require(ENV_API_URL)?;
        let salt = require(ENV_SALT)?;

        let submit_delay_ms = optional_millis(ENV_SUBMIT_DELAY_MS, DEFAULT_SUBMIT_DELAY_MS)?;
        let location_timeout_ms =
            optional_millis(ENV_LOCATION_TIMEOUT_MS, DEFAULT_LOCATION_TIMEOUT_MS)?;

        Ok(Self {
            api_url,
            salt,
            submit_delay: Duration::from_millis(submit_delay_ms),
            location_timeout: Duration::from_millis(location_timeout_ms),
        })
    }

    /// With a different pre-submit delay
    #[inline]
    #[must_use]
    pub fn with_submit_delay(mut self, delay: Duration) -> Self {
        self.submit_delay = delay;
        self
    }

    /// With a different geolocation timeout
    #[inline]
    #[must_use]
    pub fn with_location_timeout(mut self, timeout: Duration) -> Self {
        self.location_timeout = timeout;
        self
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn optional_millis(key: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(key) {
        Ok(value) => value.parse().map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => {
            info!("{key} not set, using default {default}ms");
            Ok(default)
        }
    }
}
