//! Categorization tests: one snapshot record against the live zone.

use std::collections::HashSet;

use zone_backup_core::restore::{categorize, ActionCounts, PlannedAction};

use super::helpers::{a_record, alias_record, live_map, weighted_record};

fn no_missing() -> HashSet<String> {
    HashSet::new()
}

#[test]
fn record_without_live_counterpart_is_created() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10"]);
    let planned = categorize(&[&snap], &live_map(&[]), &no_missing());

    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].action, PlannedAction::Create);
    assert!(planned[0].live.is_none());
    assert!(!planned[0].conflict);
}

#[test]
fn identical_record_is_skipped() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10"]);
    let live = live_map(&[a_record("www.example.com.", 300, &["192.0.2.10"])]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::SkipIdentical);
}

#[test]
fn differing_record_is_upserted_without_conflict() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10"]);
    let live = live_map(&[a_record("www.example.com.", 300, &["198.51.100.7"])]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::Upsert);
    assert!(!planned[0].conflict);
    assert!(planned[0].live.is_some());
}

#[test]
fn value_order_does_not_trigger_an_upsert() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10", "192.0.2.11"]);
    let live = live_map(&[a_record("www.example.com.", 300, &["192.0.2.11", "192.0.2.10"])]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::SkipIdentical);
}

#[test]
fn name_case_does_not_trigger_an_upsert() {
    let snap = a_record("WWW.Example.COM.", 300, &["192.0.2.10"]);
    let live = live_map(&[a_record("www.example.com.", 300, &["192.0.2.10"])]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::SkipIdentical);
}

#[test]
fn alias_over_plain_record_is_flagged_as_conflict() {
    let snap = alias_record("www.example.com.", "Z2FDTNDATAQYW2", "lb.example.com.");
    let live = live_map(&[a_record("www.example.com.", 300, &["192.0.2.10"])]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::Upsert);
    assert!(planned[0].conflict);
    assert!(planned[0].reason.contains("alias"));
}

#[test]
fn plain_over_alias_record_is_flagged_as_conflict() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10"]);
    let live = live_map(&[alias_record(
        "www.example.com.",
        "Z2FDTNDATAQYW2",
        "lb.example.com.",
    )]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::Upsert);
    assert!(planned[0].conflict);
}

#[test]
fn missing_health_check_takes_precedence_over_create() {
    let snap = weighted_record("api.example.com.", "east", 10, "192.0.2.20", Some("hc-1"));
    let missing: HashSet<String> = ["hc-1".to_string()].into_iter().collect();

    let planned = categorize(&[&snap], &live_map(&[]), &missing);
    assert_eq!(planned[0].action, PlannedAction::SkipMissingHealthCheck);
    assert!(planned[0].reason.contains("hc-1"));
}

#[test]
fn missing_health_check_takes_precedence_over_upsert() {
    let snap = weighted_record("api.example.com.", "east", 10, "192.0.2.20", Some("hc-1"));
    let live = live_map(&[weighted_record(
        "api.example.com.",
        "east",
        99,
        "192.0.2.20",
        Some("hc-1"),
    )]);
    let missing: HashSet<String> = ["hc-1".to_string()].into_iter().collect();

    let planned = categorize(&[&snap], &live, &missing);
    assert_eq!(planned[0].action, PlannedAction::SkipMissingHealthCheck);
}

#[test]
fn present_health_check_follows_normal_flow() {
    let snap = weighted_record("api.example.com.", "east", 10, "192.0.2.20", Some("hc-1"));

    let planned = categorize(&[&snap], &live_map(&[]), &no_missing());
    assert_eq!(planned[0].action, PlannedAction::Create);
}

#[test]
fn set_identifiers_separate_records_at_the_same_name() {
    let snap = weighted_record("api.example.com.", "west", 5, "192.0.2.30", None);
    // Same name and type, different identifier: not the same slot.
    let live = live_map(&[weighted_record(
        "api.example.com.",
        "east",
        10,
        "192.0.2.20",
        None,
    )]);

    let planned = categorize(&[&snap], &live, &no_missing());
    assert_eq!(planned[0].action, PlannedAction::Create);
}

#[test]
fn live_only_records_are_never_part_of_the_plan() {
    let snap = a_record("www.example.com.", 300, &["192.0.2.10"]);
    let live = live_map(&[
        a_record("www.example.com.", 300, &["192.0.2.10"]),
        a_record("orphan.example.com.", 300, &["203.0.113.1"]),
    ]);

    let planned = categorize(&[&snap], &live, &no_missing());
    // One entry per snapshot record; the orphan is untouched and unreported.
    assert_eq!(planned.len(), 1);
}

#[test]
fn action_counts_tally_and_writes() {
    let create = a_record("a.example.com.", 300, &["192.0.2.1"]);
    let skip = a_record("b.example.com.", 300, &["192.0.2.2"]);
    let upsert = a_record("c.example.com.", 300, &["192.0.2.3"]);
    let live = live_map(&[
        a_record("b.example.com.", 300, &["192.0.2.2"]),
        a_record("c.example.com.", 300, &["198.51.100.3"]),
    ]);

    let planned = categorize(&[&create, &skip, &upsert], &live, &no_missing());
    let counts = ActionCounts::tally(&planned);

    assert_eq!(counts.create, 1);
    assert_eq!(counts.upsert, 1);
    assert_eq!(counts.skip_identical, 1);
    assert_eq!(counts.skip_missing_health_check, 0);
    assert_eq!(counts.writes(), 2);
}
