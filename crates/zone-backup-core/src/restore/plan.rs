//! Change batch partitioning.

use std::collections::HashSet;

use crate::provider::{Change, ChangeAction};
use crate::record::RecordKey;
use crate::restore::diff::{PlannedAction, PlannedChange};

/// An ordered, size-bounded group of changes applied in one provider
/// transaction.
#[derive(Debug, Clone)]
pub struct ChangeBatch {
    pub changes: Vec<Change>,
}

impl ChangeBatch {
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Partition categorized records into change batches.
///
/// Only CREATE/UPSERT actions are retained, in their input order, so the
/// dry-run output and a live apply describe the same sequence. Each batch
/// holds at most `max_batch_size` changes and never two changes for the
/// same identity key (the provider rejects duplicate keys within one
/// transaction); a repeated key seals the current batch.
pub fn build_change_batches(planned: &[PlannedChange], max_batch_size: usize) -> Vec<ChangeBatch> {
    assert!(max_batch_size > 0, "batch size must be positive");

    let mut batches = Vec::new();
    let mut current: Vec<Change> = Vec::new();
    let mut current_keys: HashSet<RecordKey> = HashSet::new();

    for change in planned {
        let action = match change.action {
            PlannedAction::Create => ChangeAction::Create,
            PlannedAction::Upsert => ChangeAction::Upsert,
            PlannedAction::SkipIdentical | PlannedAction::SkipMissingHealthCheck => continue,
        };

        let key = change.record.key();
        if current.len() >= max_batch_size || current_keys.contains(&key) {
            batches.push(ChangeBatch {
                changes: std::mem::take(&mut current),
            });
            current_keys.clear();
        }

        current_keys.insert(key);
        current.push(Change {
            action,
            record_set: change.record.clone(),
        });
    }

    if !current.is_empty() {
        batches.push(ChangeBatch { changes: current });
    }

    batches
}
