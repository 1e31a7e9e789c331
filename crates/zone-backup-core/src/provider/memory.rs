//! In-memory record store for tests and local dry-runs.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::Mutex;

use super::{Change, ChangeAction, ChangeInfo, RecordStore, MAX_CHANGE_BATCH_SIZE};
use crate::error::ProviderError;
use crate::record::{RecordKey, RecordSet};
use crate::zone::{normalize_zone_id, Zone};
use crate::Result;

/// Deterministic in-memory [`RecordStore`] with provider-compatible
/// semantics: CREATE fails on an existing identity key, UPSERT replaces
/// wholesale, batches apply all-or-nothing.
///
/// Tracks every write call and health-check lookup so tests can assert
/// "zero write calls" and lookup deduplication. Throttling failures can
/// be injected with [`Self::throttle_next`].
#[derive(Default)]
pub struct MemoryRecordStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    zones: HashMap<String, Zone>,
    // Per zone, keyed by identity key; IndexMap keeps provider listing order.
    records: HashMap<String, IndexMap<RecordKey, RecordSet>>,
    health_checks: HashSet<String>,
    health_check_lookups: Vec<String>,
    write_calls: usize,
    change_counter: usize,
    throttle_remaining: usize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hosted zone.
    pub fn add_zone(&self, zone: Zone) {
        let mut inner = self.inner.lock();
        let id = normalize_zone_id(&zone.id);
        inner.records.entry(id.clone()).or_default();
        inner.zones.insert(id, zone);
    }

    /// Seed a live record directly, bypassing change-batch bookkeeping.
    pub fn seed_record(&self, zone_id: &str, record: RecordSet) {
        let mut inner = self.inner.lock();
        inner
            .records
            .entry(normalize_zone_id(zone_id))
            .or_default()
            .insert(record.key(), record);
    }

    /// Register an existing health check.
    pub fn add_health_check(&self, id: &str) {
        self.inner.lock().health_checks.insert(id.to_string());
    }

    /// Fail the next `n` change-batch calls with a throttling error.
    pub fn throttle_next(&self, n: usize) {
        self.inner.lock().throttle_remaining = n;
    }

    /// Number of `apply_change_batch` calls observed, throttled ones included.
    pub fn write_calls(&self) -> usize {
        self.inner.lock().write_calls
    }

    /// Every health-check id queried, in call order.
    pub fn health_check_lookups(&self) -> Vec<String> {
        self.inner.lock().health_check_lookups.clone()
    }

    /// Every registered zone.
    pub fn zones(&self) -> Vec<Zone> {
        self.inner.lock().zones.values().cloned().collect()
    }

    /// Every registered health-check id.
    pub fn health_checks(&self) -> Vec<String> {
        self.inner.lock().health_checks.iter().cloned().collect()
    }

    /// Current live records of a zone, in listing order.
    pub fn records(&self, zone_id: &str) -> Vec<RecordSet> {
        self.inner
            .lock()
            .records
            .get(&normalize_zone_id(zone_id))
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn get_zone(&self, zone_id: &str) -> Result<Zone> {
        let inner = self.inner.lock();
        inner
            .zones
            .get(&normalize_zone_id(zone_id))
            .cloned()
            .ok_or_else(|| ProviderError::ZoneNotFound(zone_id.to_string()).into())
    }

    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<RecordSet>> {
        let inner = self.inner.lock();
        let id = normalize_zone_id(zone_id);
        if !inner.zones.contains_key(&id) {
            return Err(ProviderError::ZoneNotFound(zone_id.to_string()).into());
        }
        Ok(inner
            .records
            .get(&id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn health_check_exists(&self, health_check_id: &str) -> Result<bool> {
        let mut inner = self.inner.lock();
        inner.health_check_lookups.push(health_check_id.to_string());
        Ok(inner.health_checks.contains(health_check_id))
    }

    async fn apply_change_batch(&self, zone_id: &str, changes: &[Change]) -> Result<ChangeInfo> {
        let mut inner = self.inner.lock();
        inner.write_calls += 1;

        if inner.throttle_remaining > 0 {
            inner.throttle_remaining -= 1;
            return Err(ProviderError::Throttling("rate exceeded".to_string()).into());
        }

        let id = normalize_zone_id(zone_id);
        if !inner.zones.contains_key(&id) {
            return Err(ProviderError::ZoneNotFound(zone_id.to_string()).into());
        }

        if changes.is_empty() {
            return Err(
                ProviderError::InvalidChangeBatch("empty change batch".to_string()).into(),
            );
        }
        if changes.len() > MAX_CHANGE_BATCH_SIZE {
            return Err(ProviderError::InvalidChangeBatch(format!(
                "batch of {} exceeds limit of {}",
                changes.len(),
                MAX_CHANGE_BATCH_SIZE
            ))
            .into());
        }

        // All-or-nothing: validate the whole batch before mutating.
        let mut seen_keys = HashSet::new();
        for change in changes {
            let key = change.record_set.key();
            if !seen_keys.insert(key.clone()) {
                return Err(ProviderError::InvalidChangeBatch(format!(
                    "duplicate change for {}",
                    key
                ))
                .into());
            }
            if change.action == ChangeAction::Create
                && inner.records.get(&id).is_some_and(|m| m.contains_key(&key))
            {
                return Err(ProviderError::InvalidChangeBatch(format!(
                    "CREATE for existing record {}",
                    key
                ))
                .into());
            }
        }

        let zone_records = inner.records.entry(id).or_default();
        for change in changes {
            zone_records.insert(change.record_set.key(), change.record_set.clone());
        }

        inner.change_counter += 1;
        Ok(ChangeInfo {
            id: format!("change-{:06}", inner.change_counter),
        })
    }
}
