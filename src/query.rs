//! Booth-ID extraction from the scanned URL
//!
//! The QR code encodes a URL whose query string carries the booth
//! identifier under the `booth` key. Anything else in the query is ignored.

use crate::types::BoothId;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct CheckinQuery {
    booth: Option<String>,
}

/// Extract the booth ID from a scanned URL or bare query string
///
/// Accepts a full URL (`https://host/path?booth=b-1`) or just the query
/// part (`booth=b-1`). An absent or empty `booth` value yields `None`; a
/// query string that does not parse at all is treated the same way, since
/// for this flow both mean the QR scan did not produce a usable booth.
#[must_use]
pub fn booth_id(scanned: &str) -> Option<BoothId> {
    let query = match scanned.split_once('?') {
        Some((_, rest)) => rest,
        None => scanned,
    };
    // Fragments are never part of the query
    let query = query.split('#').next().unwrap_or("");

    let parsed: CheckinQuery = serde_qs::from_str(query).unwrap_or_default();
    parsed
        .booth
        .filter(|booth| !booth.is_empty())
        .map(BoothId::new)
}
