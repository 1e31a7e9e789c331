//! Restore engine orchestration.
//!
//! One invocation runs the pipeline strictly in order: fetch zone →
//! domain validation → health-check validation → categorization → batch
//! planning → (dry-run report | sequential batch apply). The live-zone
//! read is never interleaved with the engine's own writes, and batches
//! are applied one at a time because the provider serializes changes per
//! zone.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::provider::{RecordStore, MAX_CHANGE_BATCH_SIZE};
use crate::record::RecordKey;
use crate::restore::diff::{categorize, PlannedChange};
use crate::restore::plan::{build_change_batches, ChangeBatch};
use crate::restore::report::{
    ActionCounts, ApplyReport, ConflictEntry, MissingHealthCheck, PreflightReport, RestoreOutcome,
};
use crate::restore::validate::{find_missing_health_checks, validate_domain};
use crate::snapshot::ZoneSnapshot;
use crate::zone::{normalize_zone_id, Zone};
use crate::{Error, Result};

/// Per-invocation restore options.
#[derive(Debug, Clone)]
pub struct RestoreOptions {
    /// Target zone id; defaults to the id embedded in the snapshot
    pub target_zone_id: Option<String>,

    /// Report only, no write calls
    pub dry_run: bool,

    /// Maximum changes per batch
    pub max_batch_size: usize,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            target_zone_id: None,
            dry_run: false,
            max_batch_size: MAX_CHANGE_BATCH_SIZE,
        }
    }
}

/// Bounded exponential backoff for throttling-class failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Attempts per batch, first try included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Upper bound on a single backoff delay, in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_backoff_ms() -> u64 {
    500
}

fn default_max_backoff_ms() -> u64 {
    8_000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
        }
    }
}

impl RetryPolicy {
    fn backoff(&self, attempt: u32) -> Duration {
        let exp = self
            .initial_backoff_ms
            .saturating_mul(1u64 << attempt.min(16));
        Duration::from_millis(exp.min(self.max_backoff_ms))
    }
}

/// Fully validated restore plan: the preflight report plus the batches a
/// live apply would submit. Constructed and discarded within a single
/// invocation.
#[derive(Debug)]
pub struct RestorePlan {
    pub zone: Zone,
    pub report: PreflightReport,
    pub batches: Vec<ChangeBatch>,
}

/// Restore engine for one record store.
///
/// Engines targeting different zones share no mutable state and may run
/// fully in parallel.
pub struct RestoreEngine {
    store: Arc<dyn RecordStore>,
    retry: RetryPolicy,
    shutdown_tx: broadcast::Sender<()>,
}

impl RestoreEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            store,
            retry: RetryPolicy::default(),
            shutdown_tx,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Sender for external signal handling. Cancellation is honored at
    /// batch boundaries only: a batch in flight is allowed to finish
    /// because the provider offers no partial-batch cancellation.
    pub fn shutdown_handle(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }

    /// Dry-run: validate, categorize and plan without issuing any write.
    pub async fn preflight(
        &self,
        snapshot: &ZoneSnapshot,
        options: &RestoreOptions,
    ) -> Result<PreflightReport> {
        Ok(self.plan(snapshot, options).await?.report)
    }

    /// Apply a previously computed plan in live mode.
    pub async fn apply(&self, plan: &RestorePlan) -> Result<ApplyReport> {
        self.apply_batches(&plan.zone.id, &plan.batches, plan.report.counts)
            .await
    }

    /// Run the restore. In dry-run mode this is equivalent to
    /// [`Self::preflight`]; in live mode batches are applied strictly in
    /// order after the preflight report is assembled.
    pub async fn run(
        &self,
        snapshot: &ZoneSnapshot,
        options: &RestoreOptions,
    ) -> Result<RestoreOutcome> {
        let plan = self.plan(snapshot, options).await?;

        if options.dry_run {
            info!(
                "Dry-run complete for zone {}: {} create, {} upsert, {} identical, {} blocked on health checks",
                plan.zone.id,
                plan.report.counts.create,
                plan.report.counts.upsert,
                plan.report.counts.skip_identical,
                plan.report.counts.skip_missing_health_check,
            );
            return Ok(RestoreOutcome {
                preflight: plan.report,
                apply: None,
            });
        }

        let apply = self.apply(&plan).await?;
        Ok(RestoreOutcome {
            preflight: plan.report,
            apply: Some(apply),
        })
    }

    /// Pipeline front half: everything up to (and including) batch
    /// planning, with zero writes.
    pub async fn plan(
        &self,
        snapshot: &ZoneSnapshot,
        options: &RestoreOptions,
    ) -> Result<RestorePlan> {
        let zone_id = options
            .target_zone_id
            .clone()
            .unwrap_or_else(|| snapshot.zone_id.clone());
        let zone_id = normalize_zone_id(&zone_id);

        info!(
            "Planning restore of snapshot for '{}' into zone {}",
            snapshot.zone_name, zone_id
        );

        // Zone metadata is fetched fresh per invocation; the domain check
        // aborts before any further I/O.
        let zone = self.store.get_zone(&zone_id).await?;
        validate_domain(snapshot, &zone)?;

        let records = snapshot.restorable_records();
        let apex_records_skipped = snapshot.records.len() - records.len();
        if apex_records_skipped > 0 {
            debug!(
                "Excluding {} apex SOA/NS record(s) from the plan",
                apex_records_skipped
            );
        }

        let missing = find_missing_health_checks(self.store.as_ref(), &records).await;

        let live_records = self.store.list_record_sets(&zone_id).await?;
        info!("Found {} live record set(s) in target zone", live_records.len());
        let live: IndexMap<RecordKey, _> = live_records
            .into_iter()
            .map(|r| (r.key(), r))
            .collect();

        let planned = categorize(&records, &live, &missing);
        let counts = ActionCounts::tally(&planned);

        let conflicts: Vec<ConflictEntry> = planned
            .iter()
            .filter(|c| c.conflict)
            .map(|c| ConflictEntry {
                record: c.display_name(),
                detail: c.reason.clone(),
            })
            .collect();

        let missing_health_checks = collect_missing_health_checks(&planned, &missing);

        let batches = build_change_batches(&planned, options.max_batch_size);

        let report = PreflightReport {
            zone_id: zone.id.clone(),
            zone_name: zone.domain(),
            counts,
            changes: planned,
            conflicts,
            missing_health_checks,
            apex_records_skipped,
            batches_planned: batches.len(),
        };

        Ok(RestorePlan {
            zone,
            report,
            batches,
        })
    }

    /// Apply batches strictly in order, retrying throttled batches with
    /// bounded exponential backoff. Already-applied batches are never
    /// rolled back; on failure the error reports exactly how far the run
    /// got so a re-run of the same snapshot is safe.
    async fn apply_batches(
        &self,
        zone_id: &str,
        batches: &[ChangeBatch],
        counts: ActionCounts,
    ) -> Result<ApplyReport> {
        let start = Instant::now();
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut change_ids = Vec::new();
        let mut changes_applied = 0usize;
        let mut cancelled = false;

        if batches.is_empty() {
            info!("No changes to apply; zone already matches the snapshot");
        } else {
            info!(
                "Applying {} change(s) in {} batch(es)",
                counts.writes(),
                batches.len()
            );
        }

        for (index, batch) in batches.iter().enumerate() {
            if shutdown_rx.try_recv().is_ok() {
                warn!(
                    "Shutdown signal received, stopping after {}/{} batches",
                    index,
                    batches.len()
                );
                cancelled = true;
                break;
            }

            let info = self.apply_one_batch(zone_id, batch, index, batches.len()).await?;
            info!(
                "Applied batch {}/{}: {} change(s) (change id {})",
                index + 1,
                batches.len(),
                batch.len(),
                info.id
            );
            changes_applied += batch.len();
            change_ids.push(info.id);
        }

        Ok(ApplyReport {
            batches_applied: change_ids.len(),
            batches_total: batches.len(),
            changes_applied,
            change_ids,
            cancelled,
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }

    async fn apply_one_batch(
        &self,
        zone_id: &str,
        batch: &ChangeBatch,
        index: usize,
        total: usize,
    ) -> Result<crate::provider::ChangeInfo> {
        let mut attempt = 0u32;
        loop {
            match self.store.apply_change_batch(zone_id, &batch.changes).await {
                Ok(info) => return Ok(info),
                Err(Error::Provider(e)) if e.is_throttling() && attempt + 1 < self.retry.max_attempts => {
                    let delay = self.retry.backoff(attempt);
                    warn!(
                        "Batch {}/{} throttled (attempt {}/{}), backing off {:?}",
                        index + 1,
                        total,
                        attempt + 1,
                        self.retry.max_attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(Error::Provider(e)) => {
                    return Err(Error::BatchApply {
                        applied: index,
                        total,
                        source: e,
                    });
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Group missing health-check ids with the records they block, in
/// snapshot order.
fn collect_missing_health_checks(
    planned: &[PlannedChange],
    missing: &std::collections::HashSet<String>,
) -> Vec<MissingHealthCheck> {
    let mut by_id: HashMap<&str, Vec<String>> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for change in planned {
        if let Some(id) = change.record.health_check_id.as_deref() {
            if missing.contains(id) {
                let entry = by_id.entry(id).or_default();
                if entry.is_empty() {
                    order.push(id);
                }
                entry.push(change.display_name());
            }
        }
    }

    order
        .into_iter()
        .map(|id| MissingHealthCheck {
            id: id.to_string(),
            records: by_id.remove(id).unwrap_or_default(),
        })
        .collect()
}
