//! Record store client abstraction.
//!
//! The restore engine talks to the DNS provider through the [`RecordStore`]
//! trait: zone lookup, record enumeration, health-check existence and
//! transactional change batches. Any backend honoring these semantics
//! (per-batch atomicity, a maximum batch size, duplicate-key rejection
//! within one batch) can substitute for the real provider; the in-memory
//! implementation is used by tests.

mod file;
mod memory;

pub use file::FileRecordStore;
pub use memory::MemoryRecordStore;

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::record::RecordSet;
use crate::zone::Zone;
use crate::Result;

/// Record store backend selection, loaded from the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RecordStoreConfig {
    /// Zone state persisted to a local JSON file.
    File { path: PathBuf },

    /// Ephemeral in-memory state; useful for rehearsals and tests.
    Memory,
}

/// Construct a record store from its configuration.
pub async fn create_record_store(config: &RecordStoreConfig) -> Result<Arc<dyn RecordStore>> {
    match config {
        RecordStoreConfig::File { path } => Ok(Arc::new(FileRecordStore::open(path).await?)),
        RecordStoreConfig::Memory => Ok(Arc::new(MemoryRecordStore::new())),
    }
}

/// Maximum number of changes the provider accepts in one transactional
/// batch. Matches the batch size the original tooling submits.
pub const MAX_CHANGE_BATCH_SIZE: usize = 100;

/// Write action understood by the provider's change API.
///
/// `Upsert` replaces the record set at the identity key wholesale; the
/// provider never merges field-by-field. Deletes are intentionally not
/// representable here: restore is additive/corrective only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Create,
    Upsert,
}

impl std::fmt::Display for ChangeAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeAction::Create => f.write_str("CREATE"),
            ChangeAction::Upsert => f.write_str("UPSERT"),
        }
    }
}

/// One change within a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Change {
    #[serde(rename = "Action")]
    pub action: ChangeAction,

    #[serde(rename = "ResourceRecordSet")]
    pub record_set: RecordSet,
}

/// Provider acknowledgement for an applied batch.
#[derive(Debug, Clone)]
pub struct ChangeInfo {
    /// Provider-assigned change id
    pub id: String,
}

/// Read/write access to the DNS provider's zone and record-set APIs.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch zone metadata by id.
    async fn get_zone(&self, zone_id: &str) -> Result<Zone>;

    /// Enumerate every record set in the zone.
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>>;

    /// Whether a health check with this id exists in the target account.
    async fn health_check_exists(&self, health_check_id: &str) -> Result<bool>;

    /// Apply a change batch atomically: the provider either applies every
    /// change or rejects the batch in full.
    async fn apply_change_batch(&self, zone_id: &str, changes: &[Change]) -> Result<ChangeInfo>;
}
