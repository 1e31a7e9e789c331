//! Hosted zone metadata.

use serde::{Deserialize, Serialize};

/// A hosted zone as returned by the record store.
///
/// Immutable once fetched; re-fetched at the start of every restore run
/// so the diff never works against stale data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Provider-assigned zone identifier, without the `/hostedzone/` prefix
    pub id: String,

    /// Zone domain name as returned by the provider (trailing dot included)
    pub name: String,

    /// Whether this is a private zone
    #[serde(default)]
    pub private: bool,

    /// Number of record sets the provider reports for the zone
    #[serde(default)]
    pub record_count: Option<i64>,
}

impl Zone {
    /// Canonical domain: lowercased with the trailing separator stripped.
    ///
    /// Matches the form the exporter writes into `HostedZoneName`.
    pub fn domain(&self) -> String {
        self.name.trim_end_matches('.').to_ascii_lowercase()
    }
}

/// Strip the `/hostedzone/` prefix some provider APIs prepend to zone ids.
pub fn normalize_zone_id(id: &str) -> String {
    id.rsplit('/').next().unwrap_or(id).to_string()
}
