//! Snapshot document parsing and structural validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{canonical_name, RecordSet, RecordType};
use crate::{Error, Result};

/// A captured snapshot of one hosted zone's record sets.
///
/// The JSON shape matches the files the exporter writes to blob storage:
/// zone id, zone name (trailing dot stripped) and the ordered record list.
/// `CapturedAt` is absent in files produced by older exporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    #[serde(rename = "HostedZoneId")]
    pub zone_id: String,

    #[serde(rename = "HostedZoneName")]
    pub zone_name: String,

    #[serde(rename = "CapturedAt", default, skip_serializing_if = "Option::is_none")]
    pub captured_at: Option<DateTime<Utc>>,

    #[serde(rename = "ResourceRecordSets")]
    pub records: Vec<RecordSet>,
}

impl ZoneSnapshot {
    /// Parse a snapshot document from raw bytes.
    ///
    /// Fails with [`Error::MalformedSnapshot`] when required fields are
    /// absent, a record type is unrecognized, or a record carries both an
    /// alias target and a value list. Performs no I/O.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        let snapshot: ZoneSnapshot = serde_json::from_slice(data)
            .map_err(|e| Error::MalformedSnapshot(e.to_string()))?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Serialize back to the snapshot document format.
    pub fn to_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if self.zone_id.is_empty() {
            return Err(Error::MalformedSnapshot(
                "HostedZoneId is empty".to_string(),
            ));
        }
        if self.zone_name.is_empty() {
            return Err(Error::MalformedSnapshot(
                "HostedZoneName is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Records eligible for restore.
    ///
    /// SOA and NS records at the zone apex describe the zone itself and
    /// always belong to the target zone, so they are never restored.
    pub fn restorable_records(&self) -> Vec<&RecordSet> {
        let apex = canonical_name(&self.zone_name);
        self.records
            .iter()
            .filter(|r| {
                !(matches!(r.record_type, RecordType::Soa | RecordType::Ns)
                    && canonical_name(&r.name) == apex)
            })
            .collect()
    }

    /// Number of records excluded by [`Self::restorable_records`].
    pub fn apex_records_skipped(&self) -> usize {
        self.records.len() - self.restorable_records().len()
    }
}
