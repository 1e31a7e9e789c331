//! Test helper utilities.
//!
//! Record and snapshot builders shared across the unit tests.

use indexmap::IndexMap;

use zone_backup_core::{
    AliasTarget, RecordData, RecordKey, RecordSet, RecordType, RoutingPolicy,
};

/// Plain A record with the given TTL and values.
pub fn a_record(name: &str, ttl: i64, values: &[&str]) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        record_type: RecordType::A,
        set_identifier: None,
        routing: RoutingPolicy::Simple,
        health_check_id: None,
        data: RecordData::Values {
            ttl: Some(ttl),
            values: values.iter().map(|v| v.to_string()).collect(),
        },
    }
}

/// Alias A record pointing at another resource.
pub fn alias_record(name: &str, target_zone: &str, dns_name: &str) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        record_type: RecordType::A,
        set_identifier: None,
        routing: RoutingPolicy::Simple,
        health_check_id: None,
        data: RecordData::Alias(AliasTarget {
            hosted_zone_id: target_zone.to_string(),
            dns_name: dns_name.to_string(),
            evaluate_target_health: false,
        }),
    }
}

/// Weighted A record, optionally guarded by a health check.
pub fn weighted_record(
    name: &str,
    set_id: &str,
    weight: i64,
    value: &str,
    health_check_id: Option<&str>,
) -> RecordSet {
    RecordSet {
        name: name.to_string(),
        record_type: RecordType::A,
        set_identifier: Some(set_id.to_string()),
        routing: RoutingPolicy::Weighted { weight },
        health_check_id: health_check_id.map(str::to_string),
        data: RecordData::Values {
            ttl: Some(60),
            values: vec![value.to_string()],
        },
    }
}

/// Live-record map keyed the way the engine keys it.
pub fn live_map(records: &[RecordSet]) -> IndexMap<RecordKey, RecordSet> {
    records.iter().map(|r| (r.key(), r.clone())).collect()
}
