//! Change-batch partitioning tests.

use std::collections::HashSet;

use zone_backup_core::restore::{build_change_batches, categorize};
use zone_backup_core::ChangeAction;

use super::helpers::{a_record, live_map};

#[test]
fn batches_respect_the_size_bound() {
    let records: Vec<_> = (0..25)
        .map(|i| a_record(&format!("host-{}.example.com.", i), 300, &["192.0.2.1"]))
        .collect();
    let refs: Vec<_> = records.iter().collect();
    let planned = categorize(&refs, &live_map(&[]), &HashSet::new());

    let batches = build_change_batches(&planned, 10);
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].len(), 10);
    assert_eq!(batches[1].len(), 10);
    assert_eq!(batches[2].len(), 5);
    assert!(batches.iter().all(|b| b.len() <= 10));
}

#[test]
fn batch_concatenation_reproduces_the_plan_order() {
    let records: Vec<_> = (0..7)
        .map(|i| a_record(&format!("host-{}.example.com.", i), 300, &["192.0.2.1"]))
        .collect();
    let refs: Vec<_> = records.iter().collect();
    let planned = categorize(&refs, &live_map(&[]), &HashSet::new());

    let batches = build_change_batches(&planned, 3);
    let flattened: Vec<_> = batches
        .iter()
        .flat_map(|b| b.changes.iter())
        .map(|c| c.record_set.name.clone())
        .collect();
    let expected: Vec<_> = records.iter().map(|r| r.name.clone()).collect();
    assert_eq!(flattened, expected);
}

#[test]
fn non_write_actions_are_excluded() {
    let create = a_record("a.example.com.", 300, &["192.0.2.1"]);
    let skip = a_record("b.example.com.", 300, &["192.0.2.2"]);
    let live = live_map(&[a_record("b.example.com.", 300, &["192.0.2.2"])]);
    let planned = categorize(&[&create, &skip], &live, &HashSet::new());

    let batches = build_change_batches(&planned, 100);
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[0].changes[0].action, ChangeAction::Create);
    assert_eq!(batches[0].changes[0].record_set.name, "a.example.com.");
}

#[test]
fn repeated_identity_key_seals_the_current_batch() {
    // Two snapshot entries for the same key; the second must not share a
    // batch with the first.
    let first = a_record("dup.example.com.", 300, &["192.0.2.1"]);
    let second = a_record("dup.example.com.", 300, &["192.0.2.2"]);
    let other = a_record("other.example.com.", 300, &["192.0.2.3"]);
    let planned = categorize(&[&first, &second, &other], &live_map(&[]), &HashSet::new());

    let batches = build_change_batches(&planned, 100);
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].len(), 1);
    assert_eq!(batches[1].len(), 2);
    assert_eq!(batches[1].changes[0].record_set.name, "dup.example.com.");
    assert_eq!(batches[1].changes[1].record_set.name, "other.example.com.");
}

#[test]
fn all_skips_produce_no_batches() {
    let skip = a_record("a.example.com.", 300, &["192.0.2.1"]);
    let live = live_map(&[a_record("a.example.com.", 300, &["192.0.2.1"])]);
    let planned = categorize(&[&skip], &live, &HashSet::new());

    let batches = build_change_batches(&planned, 100);
    assert!(batches.is_empty());
}

#[test]
fn upserts_map_to_upsert_actions() {
    let upsert = a_record("a.example.com.", 300, &["192.0.2.1"]);
    let live = live_map(&[a_record("a.example.com.", 300, &["198.51.100.1"])]);
    let planned = categorize(&[&upsert], &live, &HashSet::new());

    let batches = build_change_batches(&planned, 100);
    assert_eq!(batches[0].changes[0].action, ChangeAction::Upsert);
}
