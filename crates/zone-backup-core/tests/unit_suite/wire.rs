//! Wire-format tests: the provider-API JSON shape of record sets.

use serde_json::json;

use zone_backup_core::{FailoverRole, RecordData, RecordSet, RoutingPolicy};

fn parse(value: serde_json::Value) -> Result<RecordSet, serde_json::Error> {
    serde_json::from_value(value)
}

#[test]
fn weighted_record_parses() {
    let record = parse(json!({
        "Name": "api.example.com.",
        "Type": "A",
        "SetIdentifier": "us-east-1",
        "Weight": 10,
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.20"}],
        "HealthCheckId": "hc-1"
    }))
    .unwrap();

    assert_eq!(record.routing, RoutingPolicy::Weighted { weight: 10 });
    assert_eq!(record.set_identifier.as_deref(), Some("us-east-1"));
    assert_eq!(record.health_check_id.as_deref(), Some("hc-1"));
}

#[test]
fn latency_record_parses() {
    let record = parse(json!({
        "Name": "api.example.com.",
        "Type": "A",
        "SetIdentifier": "eu",
        "Region": "eu-west-1",
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.21"}]
    }))
    .unwrap();

    assert_eq!(
        record.routing,
        RoutingPolicy::Latency {
            region: "eu-west-1".to_string()
        }
    );
}

#[test]
fn failover_record_parses() {
    let record = parse(json!({
        "Name": "app.example.com.",
        "Type": "A",
        "SetIdentifier": "primary",
        "Failover": "PRIMARY",
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.22"}]
    }))
    .unwrap();

    assert_eq!(record.routing, RoutingPolicy::Failover(FailoverRole::Primary));
}

#[test]
fn geolocation_record_parses() {
    let record = parse(json!({
        "Name": "geo.example.com.",
        "Type": "A",
        "SetIdentifier": "europe",
        "GeoLocation": {"ContinentCode": "EU"},
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.23"}]
    }))
    .unwrap();

    match record.routing {
        RoutingPolicy::Geolocation(geo) => {
            assert_eq!(geo.continent_code.as_deref(), Some("EU"))
        }
        other => panic!("unexpected routing policy: {:?}", other),
    }
}

#[test]
fn multivalue_record_parses() {
    let record = parse(json!({
        "Name": "mv.example.com.",
        "Type": "A",
        "SetIdentifier": "one",
        "MultiValueAnswer": true,
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.24"}]
    }))
    .unwrap();

    assert_eq!(record.routing, RoutingPolicy::MultiValueAnswer);
}

#[test]
fn alias_record_parses_without_ttl() {
    let record = parse(json!({
        "Name": "www.example.com.",
        "Type": "A",
        "AliasTarget": {
            "HostedZoneId": "Z2FDTNDATAQYW2",
            "DNSName": "d123.cloudfront.net.",
            "EvaluateTargetHealth": false
        }
    }))
    .unwrap();

    match record.data {
        RecordData::Alias(target) => {
            assert_eq!(target.hosted_zone_id, "Z2FDTNDATAQYW2");
            assert_eq!(target.dns_name, "d123.cloudfront.net.");
        }
        other => panic!("expected alias data, got {:?}", other),
    }
}

#[test]
fn mixed_routing_policies_are_rejected() {
    let result = parse(json!({
        "Name": "api.example.com.",
        "Type": "A",
        "SetIdentifier": "bad",
        "Weight": 10,
        "Region": "eu-west-1",
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.20"}]
    }));
    assert!(result.is_err());
}

#[test]
fn routing_policy_without_set_identifier_is_rejected() {
    let result = parse(json!({
        "Name": "api.example.com.",
        "Type": "A",
        "Weight": 10,
        "TTL": 60,
        "ResourceRecords": [{"Value": "192.0.2.20"}]
    }));
    assert!(result.is_err());
}

#[test]
fn serialization_uses_the_provider_field_names() {
    let record = super::helpers::weighted_record(
        "api.example.com.",
        "us-east-1",
        10,
        "192.0.2.20",
        Some("hc-1"),
    );
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["Name"], "api.example.com.");
    assert_eq!(value["Type"], "A");
    assert_eq!(value["Weight"], 10);
    assert_eq!(value["SetIdentifier"], "us-east-1");
    assert_eq!(value["HealthCheckId"], "hc-1");
    assert_eq!(value["TTL"], 60);
    assert_eq!(value["ResourceRecords"][0]["Value"], "192.0.2.20");
    // Unset routing fields are omitted, not null.
    assert!(value.get("Region").is_none());
    assert!(value.get("AliasTarget").is_none());
}

#[test]
fn plain_record_round_trips() {
    let record = super::helpers::a_record("www.example.com.", 300, &["192.0.2.10", "192.0.2.11"]);
    let value = serde_json::to_value(&record).unwrap();
    let back: RecordSet = serde_json::from_value(value).unwrap();
    assert!(record.structurally_equal(&back));
}
