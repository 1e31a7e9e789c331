//! File-backed record store.
//!
//! Keeps the full zone state (zones, record sets, health checks) in a
//! single JSON file and rewrites it after every applied change batch.
//! Useful for local end-to-end runs and for rehearsing a restore against
//! a captured copy of production state without provider credentials.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{Change, ChangeInfo, MemoryRecordStore, RecordStore};
use crate::error::Error;
use crate::record::RecordSet;
use crate::zone::Zone;
use crate::Result;

/// On-disk shape of the zone-state file. Record sets use the same wire
/// form as snapshot documents, so state files can be inspected and
/// hand-edited with the same vocabulary.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ZoneStateFile {
    #[serde(rename = "Zones", default)]
    zones: Vec<Zone>,

    #[serde(rename = "Records", default)]
    records: BTreeMap<String, Vec<RecordSet>>,

    #[serde(rename = "HealthChecks", default)]
    health_checks: Vec<String>,
}

/// [`RecordStore`] persisted to a local JSON state file.
///
/// All reads are served from memory; writes go through the in-memory
/// store's transactional validation first and are flushed to disk only
/// after the batch has been accepted. The flush is write-then-rename so
/// a crash mid-save never truncates the state file.
pub struct FileRecordStore {
    path: PathBuf,
    inner: MemoryRecordStore,
}

impl FileRecordStore {
    /// Open an existing state file, or start from empty state if `path`
    /// does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let state = match tokio::fs::read(&path).await {
            Ok(raw) => serde_json::from_slice::<ZoneStateFile>(&raw).map_err(|e| {
                Error::Config(format!(
                    "malformed zone state file {}: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => ZoneStateFile::default(),
            Err(e) => return Err(Error::Io(e)),
        };

        let inner = MemoryRecordStore::new();
        for zone in state.zones {
            inner.add_zone(zone);
        }
        for (zone_id, records) in state.records {
            for record in records {
                inner.seed_record(&zone_id, record);
            }
        }
        for id in state.health_checks {
            inner.add_health_check(&id);
        }

        Ok(Self { path, inner })
    }

    async fn save(&self) -> Result<()> {
        let zones = self.inner.zones();
        let mut records = BTreeMap::new();
        for zone in &zones {
            records.insert(zone.id.clone(), self.inner.records(&zone.id));
        }
        let state = ZoneStateFile {
            zones,
            records,
            health_checks: self.inner.health_checks(),
        };

        let raw = serde_json::to_vec_pretty(&state)?;
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl RecordStore for FileRecordStore {
    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        self.inner.get_zone(zone_id).await
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        self.inner.list_record_sets(zone_id).await
    }

    async fn health_check_exists(&self, health_check_id: &str) -> Result<bool> {
        self.inner.health_check_exists(health_check_id).await
    }

    async fn apply_change_batch(&self, zone_id: &str, changes: &[Change]) -> Result<ChangeInfo> {
        let info = self.inner.apply_change_batch(zone_id, changes).await?;
        self.save().await?;
        Ok(info)
    }
}
