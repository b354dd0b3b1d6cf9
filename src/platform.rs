//! Platform service seams
//!
//! Geolocation and device fingerprinting are external platform services.
//! The controller only sees the two traits here; the concrete types adapt
//! them to a host CLI, where a "fix" is operator-supplied and the
//! fingerprint comes from stable host identifiers.

use crate::error::{FingerprintError, LocationError};
use crate::types::{GeoOptions, GeoPosition, VisitorId};
use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Source of the visitor's geographic position
///
/// A request suspends until a fix arrives, the user denies permission, or
/// `options.timeout` elapses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Resolve the current position under the given options
    async fn current_position(&self, options: &GeoOptions) -> Result<GeoPosition, LocationError>;
}

/// Source of the semi-stable visitor identifier
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FingerprintProvider: Send + Sync {
    /// Resolve the visitor identifier for this device
    async fn visitor_id(&self) -> Result<VisitorId, FingerprintError>;
}

/// Operator-supplied position for hosts without a positioning service
///
/// An unset fix resolves to [`LocationError::Unavailable`], the same branch
/// a platform without geolocation support takes. The fix is always fresh,
/// so the freshness options have no effect here.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation {
    fix: Option<GeoPosition>,
}

impl FixedLocation {
    /// Provider that resolves to the given coordinates
    #[inline]
    #[must_use]
    pub fn at(lat: f64, lng: f64) -> Self {
        Self {
            fix: Some(GeoPosition { lat, lng }),
        }
    }

    /// Provider with no fix; every request fails as unavailable
    #[inline]
    #[must_use]
    pub fn unavailable() -> Self {
        Self { fix: None }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(&self, _options: &GeoOptions) -> Result<GeoPosition, LocationError> {
        self.fix
            .ok_or_else(|| LocationError::Unavailable("no location fix configured".to_string()))
    }
}

/// Visitor identifier derived from stable host identifiers
///
/// Prefers the machine ID; falls back to hostname/user/home environment
/// values. The digest is truncated to 16 hex chars, which is plenty for a
/// semi-stable identifier and keeps submissions compact.
#[derive(Debug, Clone)]
pub struct HostFingerprint {
    machine_id_path: PathBuf,
}

impl HostFingerprint {
    const VISITOR_ID_LEN: usize = 16;

    /// Fingerprint provider reading the conventional machine-id location
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            machine_id_path: PathBuf::from("/etc/machine-id"),
        }
    }

    /// Fingerprint provider reading a specific machine-id file
    #[inline]
    #[must_use]
    pub fn with_machine_id_path(path: impl Into<PathBuf>) -> Self {
        Self {
            machine_id_path: path.into(),
        }
    }

    fn identity_material(&self) -> String {
        if let Ok(contents) = std::fs::read_to_string(&self.machine_id_path) {
            let trimmed = contents.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }

        ["HOSTNAME", "USER", "HOME"]
            .iter()
            .filter_map(|key| std::env::var(key).ok())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl Default for HostFingerprint {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FingerprintProvider for HostFingerprint {
    async fn visitor_id(&self) -> Result<VisitorId, FingerprintError> {
        let material = self.identity_material();
        if material.is_empty() {
            return Err(FingerprintError(
                "no stable host identifiers available".to_string(),
            ));
        }

        let digest = hex::encode(Sha256::digest(material.as_bytes()));
        Ok(VisitorId::new(&digest[..Self::VISITOR_ID_LEN]))
    }
}
