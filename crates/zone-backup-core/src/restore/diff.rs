//! Record categorization: the core restore decision algorithm.
//!
//! Each snapshot record is matched against the live record at the same
//! identity key and classified. Live records with no snapshot counterpart
//! are left untouched: restore is additive/corrective, never destructive.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::record::{RecordKey, RecordSet};

/// Classification of one snapshot record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlannedAction {
    /// No live record at this key
    Create,
    /// Live record differs; it will be replaced wholesale
    Upsert,
    /// Live record is structurally identical
    SkipIdentical,
    /// Record references a health check missing from the target account
    SkipMissingHealthCheck,
}

impl PlannedAction {
    pub fn is_write(&self) -> bool {
        matches!(self, PlannedAction::Create | PlannedAction::Upsert)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PlannedAction::Create => "CREATE",
            PlannedAction::Upsert => "UPSERT",
            PlannedAction::SkipIdentical => "SKIP_IDENTICAL",
            PlannedAction::SkipMissingHealthCheck => "SKIP_MISSING_HEALTH_CHECK",
        }
    }
}

impl std::fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One categorized snapshot record.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedChange {
    pub action: PlannedAction,

    /// The record as captured in the snapshot
    pub record: RecordSet,

    /// The live record at the same identity key, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live: Option<RecordSet>,

    /// Human-readable explanation of the classification
    pub reason: String,

    /// Alias-vs-plain shape mismatch at this key. The record is still
    /// upserted, but the mismatch is surfaced in the report because it is
    /// common ground for user error.
    pub conflict: bool,
}

impl PlannedChange {
    pub fn display_name(&self) -> String {
        self.record.display_name()
    }
}

/// Categorize snapshot records against the live zone.
///
/// `live` must hold the zone's current records keyed by identity key;
/// `missing_health_checks` comes from the health-check validator and takes
/// precedence over the create/update decision.
pub fn categorize(
    snapshot_records: &[&RecordSet],
    live: &IndexMap<RecordKey, RecordSet>,
    missing_health_checks: &HashSet<String>,
) -> Vec<PlannedChange> {
    snapshot_records
        .iter()
        .map(|record| categorize_one(record, live, missing_health_checks))
        .collect()
}

fn categorize_one(
    record: &RecordSet,
    live: &IndexMap<RecordKey, RecordSet>,
    missing_health_checks: &HashSet<String>,
) -> PlannedChange {
    if let Some(hc_id) = &record.health_check_id {
        if missing_health_checks.contains(hc_id) {
            return PlannedChange {
                action: PlannedAction::SkipMissingHealthCheck,
                record: (*record).clone(),
                live: live.get(&record.key()).cloned(),
                reason: format!("health check {} does not exist in the target account", hc_id),
                conflict: false,
            };
        }
    }

    match live.get(&record.key()) {
        None => PlannedChange {
            action: PlannedAction::Create,
            record: (*record).clone(),
            live: None,
            reason: "no live record at this key".to_string(),
            conflict: false,
        },
        Some(existing) if record.structurally_equal(existing) => PlannedChange {
            action: PlannedAction::SkipIdentical,
            record: (*record).clone(),
            live: Some(existing.clone()),
            reason: "identical record already exists".to_string(),
            conflict: false,
        },
        Some(existing) => {
            let shape_conflict = record.is_alias() != existing.is_alias();
            let reason = if shape_conflict {
                if record.is_alias() {
                    "live record is a plain value record but the snapshot is an alias".to_string()
                } else {
                    "live record is an alias but the snapshot is a plain value record".to_string()
                }
            } else {
                "live record differs and will be overwritten".to_string()
            };
            PlannedChange {
                action: PlannedAction::Upsert,
                record: (*record).clone(),
                live: Some(existing.clone()),
                reason,
                conflict: shape_conflict,
            }
        }
    }
}
