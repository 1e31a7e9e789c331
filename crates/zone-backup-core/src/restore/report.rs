//! Restore reports.
//!
//! A preflight report is produced on every invocation before any write;
//! live runs additionally produce an apply report. Reports are
//! serializable for machine-readable CLI output but never persisted by
//! the engine itself.

use serde::Serialize;

use crate::restore::diff::{PlannedAction, PlannedChange};

/// Per-action counts over the categorized snapshot.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ActionCounts {
    pub create: usize,
    pub upsert: usize,
    pub skip_identical: usize,
    pub skip_missing_health_check: usize,
}

impl ActionCounts {
    pub fn tally(changes: &[PlannedChange]) -> Self {
        let mut counts = ActionCounts::default();
        for change in changes {
            match change.action {
                PlannedAction::Create => counts.create += 1,
                PlannedAction::Upsert => counts.upsert += 1,
                PlannedAction::SkipIdentical => counts.skip_identical += 1,
                PlannedAction::SkipMissingHealthCheck => counts.skip_missing_health_check += 1,
            }
        }
        counts
    }

    /// Number of records that would be written.
    pub fn writes(&self) -> usize {
        self.create + self.upsert
    }
}

/// A structural conflict surfaced by the differ.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictEntry {
    /// Record label (`name TYPE (Set: id)`)
    pub record: String,
    pub detail: String,
}

/// A health check referenced by the snapshot but absent from the target
/// account, with the records it blocks.
#[derive(Debug, Clone, Serialize)]
pub struct MissingHealthCheck {
    pub id: String,
    pub records: Vec<String>,
}

/// Dry-run output: everything the engine would do, before any write.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    /// Target zone id
    pub zone_id: String,

    /// Target zone domain
    pub zone_name: String,

    pub counts: ActionCounts,

    /// Every categorized record, in snapshot order
    pub changes: Vec<PlannedChange>,

    pub conflicts: Vec<ConflictEntry>,

    pub missing_health_checks: Vec<MissingHealthCheck>,

    /// Apex SOA/NS records excluded before planning
    pub apex_records_skipped: usize,

    /// Number of change batches the plan was partitioned into
    pub batches_planned: usize,
}

impl PreflightReport {
    /// Whether a live run would issue any write call.
    pub fn has_writes(&self) -> bool {
        self.batches_planned > 0
    }
}

/// Result of applying the plan in live mode.
#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    /// Batches fully applied
    pub batches_applied: usize,

    /// Batches in the plan
    pub batches_total: usize,

    /// Changes contained in the applied batches
    pub changes_applied: usize,

    /// Provider change ids, one per applied batch
    pub change_ids: Vec<String>,

    /// Run was stopped at a batch boundary by a shutdown signal
    pub cancelled: bool,

    pub duration_ms: u64,
}

/// Combined output of one restore invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RestoreOutcome {
    pub preflight: PreflightReport,

    /// Present for live runs only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub apply: Option<ApplyReport>,
}
